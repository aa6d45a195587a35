//! Wiring of the sync pipeline from configuration.
//!
//! Used by the CLI; keeps construction of the store, the HTTP source and the
//! service in one place.

use std::sync::Arc;

use tracing::info;

use crate::application::{PollStats, Poller, SyncService};
use crate::config::{AppConfig, StoreBackend};
use crate::domain::{DepotSource, TagStore};
use crate::infrastructure::{init_database, HttpDepotSource, InMemoryTagStore, SqliteTagStore};
use crate::shared::{ShutdownSignal, StoreError, SyncError};

/// Open the configured tag store
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn TagStore>, StoreError> {
    match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory tag store");
            Ok(Arc::new(InMemoryTagStore::new()))
        }
        StoreBackend::Sqlite => {
            let db = init_database(&config.database()).await?;
            Ok(Arc::new(SqliteTagStore::new(db)))
        }
    }
}

pub fn build_source(config: &AppConfig) -> Result<Arc<dyn DepotSource>, SyncError> {
    let source = HttpDepotSource::new(config.api.url.clone(), config.api_timeout())?;
    info!("Depot API: {}", source.url());
    Ok(Arc::new(source))
}

pub fn build_service(config: &AppConfig, store: Arc<dyn TagStore>) -> Result<SyncService, SyncError> {
    Ok(SyncService::new(build_source(config)?, store, config.sync_settings()))
}

/// Poll until `shutdown` fires
pub async fn watch(config: &AppConfig, store: Arc<dyn TagStore>, shutdown: ShutdownSignal) -> Result<PollStats, SyncError> {
    let service = Arc::new(build_service(config, store)?);
    let poller = Poller::new(service, config.poll_interval());
    Ok(poller.run(shutdown).await)
}
