//! # Depot Tag Sync
//!
//! Polls the charging information API for depot telemetry
//! (depots → charging stations → charging points), flattens it into a
//! hierarchical tag namespace and writes it into a tag database.
//!
//! ## Architecture
//!
//! - **domain**: depot document, typed tag values and paths, store/source ports
//! - **application**: flattening, batch writing, status bookkeeping, polling
//! - **infrastructure**: HTTP client, in-memory and SQLite tag stores
//! - **runtime**: wiring from [`AppConfig`]

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod shared;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{default_config_path, AppConfig};

// Re-export the pipeline entry points
pub use application::{Poller, SyncService, SyncSettings, WriteReport};
pub use domain::{DepotSource, TagStore};
pub use shared::ShutdownSignal;
