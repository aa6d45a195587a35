//! Tag domain - paths, typed values and write results

mod path;
mod value;

pub use path::{
    sanitize_tag_name, TagPath, TagWrite, DEFAULT_PROVIDER, EMPTY_NAME_PLACEHOLDER,
    MAX_SEGMENT_LEN,
};
pub use value::{TagDataType, TagValue};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-item outcome reported by the tag store for a write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Good,
    /// The tag does not exist yet
    BadNotFound,
    Bad(String),
}

impl Quality {
    pub fn is_good(&self) -> bool {
        matches!(self, Quality::Good)
    }
}

/// Definition of a memory tag to create under a parent folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub name: String,
    pub data_type: TagDataType,
}

/// Stored state of one tag, as returned by browsing the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRecord {
    pub path: TagPath,
    pub data_type: TagDataType,
    pub value: Option<TagValue>,
    pub updated_at: Option<DateTime<Utc>>,
}
