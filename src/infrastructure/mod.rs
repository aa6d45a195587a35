//! Infrastructure layer - external concerns

pub mod database;
pub mod http;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SqliteTagStore};
pub use http::HttpDepotSource;
pub use storage::InMemoryTagStore;
