pub mod depot;
pub mod ports;
pub mod tag;

// Re-export commonly used types
pub use depot::{Availability, ChargingPointInfo, ChargingStationInfo, DepotDocument, DepotInfo};
pub use ports::{DepotSource, TagStore};
pub use tag::{
    sanitize_tag_name, Quality, TagDataType, TagDefinition, TagPath, TagRecord, TagValue, TagWrite,
};
