//! Ports - the two external systems a sync run talks to

use async_trait::async_trait;

use crate::domain::depot::DepotDocument;
use crate::domain::tag::{Quality, TagDefinition, TagRecord, TagWrite};
use crate::shared::{FetchError, StoreResult};

/// Source of depot telemetry
#[async_trait]
pub trait DepotSource: Send + Sync {
    async fn fetch(&self) -> Result<DepotDocument, FetchError>;
}

/// Target tag database
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Write one chunk; returns one quality per item, in order
    async fn write(&self, writes: &[TagWrite]) -> StoreResult<Vec<Quality>>;

    /// Create memory tags under `parent`, leaving existing tags untouched
    async fn configure(&self, parent: &str, definitions: &[TagDefinition]) -> StoreResult<()>;

    /// List tags whose path starts with `prefix`, ordered by path
    async fn browse(&self, prefix: &str) -> StoreResult<Vec<TagRecord>>;
}
