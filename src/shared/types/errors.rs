use thiserror::Error;

/// Failure to obtain the depot document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed with status code: {0}")]
    Status(u16),

    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid tag path: {0}")]
    InvalidPath(String),

    #[error("Corrupt tag record: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Only {good}/{attempted} tags written ({percent:.1}%)")]
    BelowThreshold {
        good: usize,
        attempted: usize,
        percent: f64,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
