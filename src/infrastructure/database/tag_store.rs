//! SeaORM implementation of TagStore

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use super::entities::tag;
use crate::domain::{Quality, TagDataType, TagDefinition, TagPath, TagRecord, TagStore, TagValue, TagWrite};
use crate::infrastructure::storage::{canonical_prefix, in_prefix};
use crate::shared::{StoreError, StoreResult};

pub struct SqliteTagStore {
    db: DatabaseConnection,
}

impl SqliteTagStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_record(model: tag::Model) -> StoreResult<TagRecord> {
    let data_type = model
        .data_type
        .parse::<TagDataType>()
        .map_err(|e| StoreError::Corrupt(format!("{}: {}", model.path, e)))?;
    let value = model
        .value
        .as_deref()
        .map(serde_json::from_str::<TagValue>)
        .transpose()?;

    Ok(TagRecord {
        path: TagPath::new(model.path),
        data_type,
        value,
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl TagStore for SqliteTagStore {
    async fn write(&self, writes: &[TagWrite]) -> StoreResult<Vec<Quality>> {
        let now = Utc::now();
        let txn = self.db.begin().await?;
        let mut qualities = Vec::with_capacity(writes.len());

        for write in writes {
            let existing = tag::Entity::find_by_id(write.path.canonical())
                .one(&txn)
                .await?;

            let quality = match existing {
                Some(model) => {
                    let mut active: tag::ActiveModel = model.into();
                    active.value = Set(Some(serde_json::to_string(&write.value)?));
                    active.updated_at = Set(Some(now));
                    active.update(&txn).await?;
                    Quality::Good
                }
                None => Quality::BadNotFound,
            };
            qualities.push(quality);
        }

        txn.commit().await?;
        Ok(qualities)
    }

    async fn configure(&self, parent: &str, definitions: &[TagDefinition]) -> StoreResult<()> {
        let parent_path = TagPath::new(parent);
        let parent_key = parent_path.canonical();
        let txn = self.db.begin().await?;

        for def in definitions {
            if def.name.is_empty() || def.name.contains('/') {
                return Err(StoreError::InvalidPath(format!("{}/{}", parent, def.name)));
            }
            let path = parent_path.child(&def.name).canonical();

            if tag::Entity::find_by_id(path.clone()).one(&txn).await?.is_some() {
                debug!("Tag {} already exists, ignoring", path);
                continue;
            }

            tag::ActiveModel {
                path: Set(path),
                parent: Set(parent_key.clone()),
                name: Set(def.name.clone()),
                data_type: Set(def.data_type.to_string()),
                value: Set(None),
                created_at: Set(Utc::now()),
                updated_at: Set(None),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn browse(&self, prefix: &str) -> StoreResult<Vec<TagRecord>> {
        let prefix = canonical_prefix(prefix);
        let models = tag::Entity::find()
            .filter(tag::Column::Path.starts_with(&prefix))
            .order_by_asc(tag::Column::Path)
            .all(&self.db)
            .await?;

        // LIKE treats `_` as a wildcard, so re-check the prefix literally
        models
            .into_iter()
            .filter(|m| in_prefix(&m.path, &prefix))
            .map(to_record)
            .collect()
    }
}
