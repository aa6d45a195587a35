//! In-memory tag store for development and testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{canonical_prefix, in_prefix};
use crate::domain::{Quality, TagDataType, TagDefinition, TagPath, TagRecord, TagStore, TagValue, TagWrite};
use crate::shared::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredTag {
    data_type: TagDataType,
    value: Option<TagValue>,
    updated_at: Option<DateTime<Utc>>,
}

/// Tag store held in memory. Writes to tags that were never configured
/// report [`Quality::BadNotFound`].
#[derive(Default)]
pub struct InMemoryTagStore {
    tags: DashMap<String, StoredTag>,
}

impl InMemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, path: &TagPath) -> Option<TagValue> {
        self.tags.get(&path.canonical()).and_then(|t| t.value.clone())
    }
}

#[async_trait]
impl TagStore for InMemoryTagStore {
    async fn write(&self, writes: &[TagWrite]) -> StoreResult<Vec<Quality>> {
        let now = Utc::now();
        Ok(writes
            .iter()
            .map(|write| match self.tags.get_mut(&write.path.canonical()) {
                Some(mut tag) => {
                    tag.value = Some(write.value.clone());
                    tag.updated_at = Some(now);
                    Quality::Good
                }
                None => Quality::BadNotFound,
            })
            .collect())
    }

    async fn configure(&self, parent: &str, definitions: &[TagDefinition]) -> StoreResult<()> {
        let parent = TagPath::new(parent);
        for def in definitions {
            if def.name.is_empty() || def.name.contains('/') {
                return Err(StoreError::InvalidPath(format!("{}/{}", parent, def.name)));
            }
            self.tags
                .entry(parent.child(&def.name).canonical())
                .or_insert_with(|| StoredTag {
                    data_type: def.data_type,
                    value: None,
                    updated_at: None,
                });
        }
        Ok(())
    }

    async fn browse(&self, prefix: &str) -> StoreResult<Vec<TagRecord>> {
        let prefix = canonical_prefix(prefix);
        let mut records: Vec<TagRecord> = self
            .tags
            .iter()
            .filter(|entry| in_prefix(entry.key(), &prefix))
            .map(|entry| TagRecord {
                path: TagPath::new(entry.key().clone()),
                data_type: entry.data_type,
                value: entry.value.clone(),
                updated_at: entry.updated_at,
            })
            .collect();
        records.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(records)
    }
}
