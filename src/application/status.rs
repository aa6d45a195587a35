//! Run bookkeeping tags under `<base>/Status`

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use super::batch_writer::create_missing_tag;
use super::layout::{self, TagLayout};
use crate::domain::{TagStore, TagWrite};

pub struct StatusRecorder {
    store: Arc<dyn TagStore>,
    layout: TagLayout,
}

impl StatusRecorder {
    pub fn new(store: Arc<dyn TagStore>, layout: TagLayout) -> Self {
        Self { store, layout }
    }

    pub async fn record_success(&self, at: DateTime<Utc>) {
        let writes = vec![
            TagWrite::new(self.layout.status(layout::LAST_UPDATED), at),
            TagWrite::new(self.layout.status(layout::LAST_UPDATE_SUCCESS), true),
        ];
        self.write(writes).await;
    }

    /// `LastUpdated` is left untouched so it keeps the last good run
    pub async fn record_failure(&self, message: &str, at: DateTime<Utc>) {
        let writes = vec![
            TagWrite::new(self.layout.status(layout::LAST_UPDATE_SUCCESS), false),
            TagWrite::new(self.layout.status(layout::LAST_ERROR), message),
            TagWrite::new(self.layout.status(layout::LAST_ERROR_TIME), at),
        ];
        self.write(writes).await;
    }

    // Never fails the caller. Status tags the store does not know yet are
    // created and written once more.
    async fn write(&self, writes: Vec<TagWrite>) {
        let qualities = match self.store.write(&writes).await {
            Ok(qualities) => qualities,
            Err(e) => {
                error!("Failed to write status tags: {}", e);
                return;
            }
        };

        let mut missing = Vec::new();
        for (index, write) in writes.iter().enumerate() {
            if !qualities.get(index).is_some_and(|q| q.is_good()) {
                missing.push(write.clone());
            }
        }
        if missing.is_empty() {
            debug!("Status tags written");
            return;
        }

        debug!("Creating {} missing status tags", missing.len());
        for write in &missing {
            create_missing_tag(self.store.as_ref(), write).await;
        }

        match self.store.write(&missing).await {
            Ok(qualities) => {
                let bad = qualities.iter().filter(|q| !q.is_good()).count()
                    + missing.len().saturating_sub(qualities.len());
                if bad > 0 {
                    warn!("{} of {} status tags were not written", bad, writes.len());
                } else {
                    debug!("Status tags written after creation");
                }
            }
            Err(e) => error!("Failed to write status tags after creation: {}", e),
        }
    }
}
