//! Tag namespace layout
//!
//! ```text
//! <base>/Status/{LastUpdated, LastUpdateSuccess, LastError, LastErrorTime, TotalDepots}
//! <base>/Depots/<depot>/{DepotId, DepotName, Summary/...}
//! <base>/Depots/<depot>/Stations/<station>/{StationId, Status, Summary/...}
//! <base>/Depots/<depot>/Stations/<station>/Points/<point>/{PointId, Status, ...}
//! ```

use crate::domain::{sanitize_tag_name, TagPath};

pub const LAST_UPDATED: &str = "LastUpdated";
pub const LAST_UPDATE_SUCCESS: &str = "LastUpdateSuccess";
pub const LAST_ERROR: &str = "LastError";
pub const LAST_ERROR_TIME: &str = "LastErrorTime";
pub const TOTAL_DEPOTS: &str = "TotalDepots";

#[derive(Debug, Clone)]
pub struct TagLayout {
    base: TagPath,
}

impl TagLayout {
    pub fn new(base: TagPath) -> Self {
        Self { base }
    }

    pub fn status(&self, name: &str) -> TagPath {
        self.base.child("Status").child(name)
    }

    pub fn depot(&self, depot_name: &str) -> TagPath {
        self.base.child("Depots").child(&sanitize_tag_name(depot_name))
    }

    pub fn station(depot: &TagPath, station_id: &str) -> TagPath {
        depot.child("Stations").child(&sanitize_tag_name(station_id))
    }

    pub fn point(station: &TagPath, point_id: &str) -> TagPath {
        station.child("Points").child(&sanitize_tag_name(point_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_sanitized_per_segment() {
        let layout = TagLayout::new(TagPath::new("[default]ChargePilot"));
        let depot = layout.depot("North Yard");
        let station = TagLayout::station(&depot, "CS-01");
        let point = TagLayout::point(&station, "CP.1");

        assert_eq!(depot.as_str(), "[default]ChargePilot/Depots/North_Yard");
        assert_eq!(
            point.child("PointId").as_str(),
            "[default]ChargePilot/Depots/North_Yard/Stations/CS_01/Points/CP_1/PointId"
        );
        assert_eq!(
            layout.status(LAST_ERROR).as_str(),
            "[default]ChargePilot/Status/LastError"
        );
    }
}
