//! Flattener - turns the nested depot document into an ordered list of tag
//! writes, computing station and depot summaries along the way.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::layout::{self, TagLayout};
use super::summary::{DepotSummary, StationSummary};
use crate::domain::{ChargingPointInfo, ChargingStationInfo, DepotDocument, DepotInfo, TagPath, TagWrite};

/// Number of tags emitted per charging point
pub const POINT_TAG_COUNT: usize = 8;
/// Identity + summary tags per station
pub const STATION_TAG_COUNT: usize = 2 + 5;
/// Identity + summary tags per depot
pub const DEPOT_TAG_COUNT: usize = 2 + 9;
pub const STATUS_TAG_COUNT: usize = 5;

pub struct Flattener {
    layout: TagLayout,
}

impl Flattener {
    pub fn new(layout: TagLayout) -> Self {
        Self { layout }
    }

    /// Flatten a whole document. The status block comes first, then each
    /// depot in source order.
    pub fn flatten(&self, document: &DepotDocument, now: DateTime<Utc>) -> Vec<TagWrite> {
        let depots = &document.depot_info_list;
        let mut writes = Vec::with_capacity(STATUS_TAG_COUNT + estimate_tags(depots));

        self.push_status(&mut writes, depots.len(), now);

        for (index, depot) in depots.iter().enumerate() {
            info!(
                "Processing depot {} of {}: {} ({})",
                index + 1,
                depots.len(),
                depot.name(),
                depot.id()
            );
            let summary = self.push_depot(&mut writes, depot);
            info!(
                "Depot summary: {} stations ({} available), {} points ({} available)",
                summary.total_stations,
                summary.available_stations,
                summary.total_points,
                summary.available_points
            );
        }

        writes
    }

    fn push_status(&self, writes: &mut Vec<TagWrite>, depot_count: usize, now: DateTime<Utc>) {
        let status = |name: &str| self.layout.status(name);
        writes.extend([
            TagWrite::new(status(layout::LAST_UPDATED), now),
            TagWrite::new(status(layout::LAST_UPDATE_SUCCESS), true),
            TagWrite::new(status(layout::LAST_ERROR), ""),
            TagWrite::new(status(layout::LAST_ERROR_TIME), now),
            TagWrite::new(status(layout::TOTAL_DEPOTS), depot_count as i64),
        ]);
    }

    fn push_depot(&self, writes: &mut Vec<TagWrite>, depot: &DepotInfo) -> DepotSummary {
        let depot_path = self.layout.depot(depot.name());
        let mut summary = DepotSummary::default();

        for station in &depot.charging_station_info_list {
            let station_summary = push_station(writes, &depot_path, station);
            summary.add_station(station.status(), &station_summary);
        }

        writes.extend([
            TagWrite::new(depot_path.child("DepotId"), depot.id()),
            TagWrite::new(depot_path.child("DepotName"), depot.name()),
        ]);

        let s = depot_path.child("Summary");
        writes.extend([
            TagWrite::new(s.child("TotalStations"), summary.total_stations),
            TagWrite::new(s.child("AvailableStations"), summary.available_stations),
            TagWrite::new(s.child("UnavailableStations"), summary.unavailable_stations),
            TagWrite::new(s.child("TotalPoints"), summary.total_points),
            TagWrite::new(s.child("AvailablePoints"), summary.available_points),
            TagWrite::new(s.child("UnavailablePoints"), summary.unavailable_points),
            TagWrite::new(s.child("TotalEnergyReading_Wh"), summary.total_energy_wh),
            TagWrite::new(
                s.child("StationAvailabilityPercent"),
                summary.station_availability_percent(),
            ),
            TagWrite::new(
                s.child("PointAvailabilityPercent"),
                summary.point_availability_percent(),
            ),
        ]);

        summary
    }
}

fn push_station(
    writes: &mut Vec<TagWrite>,
    depot_path: &TagPath,
    station: &ChargingStationInfo,
) -> StationSummary {
    let station_path = TagLayout::station(depot_path, station.id());
    debug!("Station tag path: {}", station_path);

    writes.extend([
        TagWrite::new(station_path.child("StationId"), station.id()),
        TagWrite::new(station_path.child("Status"), station.status()),
    ]);

    let mut summary = StationSummary::default();
    for point in &station.charging_point_info_list {
        push_point(writes, &station_path, point);
        summary.add_point(point);
    }

    let s = station_path.child("Summary");
    writes.extend([
        TagWrite::new(s.child("TotalPoints"), summary.total_points),
        TagWrite::new(s.child("AvailablePoints"), summary.available_points),
        TagWrite::new(s.child("UnavailablePoints"), summary.unavailable_points),
        TagWrite::new(s.child("TotalEnergyReading_Wh"), summary.total_energy_wh),
        TagWrite::new(s.child("AvailabilityPercent"), summary.availability_percent()),
    ]);

    summary
}

fn push_point(writes: &mut Vec<TagWrite>, station_path: &TagPath, point: &ChargingPointInfo) {
    let p = TagLayout::point(station_path, point.id());
    writes.extend([
        TagWrite::new(p.child("PointId"), point.id()),
        TagWrite::new(p.child("Status"), point.status()),
        TagWrite::new(
            p.child("EnergyMeterReading_Wh"),
            point.energy_meter_reading.unwrap_or(0.0),
        ),
        TagWrite::new(p.child("PresentPower_kW"), point.present_power.unwrap_or(0.0)),
        TagWrite::new(p.child("HasVehicle"), point.has_vehicle()),
        TagWrite::new(p.child("HasFault"), point.has_fault()),
        TagWrite::new(p.child("IsCharging"), point.is_charging()),
        TagWrite::new(p.child("HasScheduledCharging"), point.has_scheduled_charging()),
    ]);
}

fn estimate_tags(depots: &[DepotInfo]) -> usize {
    depots
        .iter()
        .map(|d| {
            DEPOT_TAG_COUNT
                + d.charging_station_info_list
                    .iter()
                    .map(|s| STATION_TAG_COUNT + POINT_TAG_COUNT * s.charging_point_info_list.len())
                    .sum::<usize>()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TagDataType, TagValue};

    const BASE: &str = "[default]ChargePilot";

    fn flattener() -> Flattener {
        Flattener::new(TagLayout::new(TagPath::new(BASE)))
    }

    fn value_of<'a>(writes: &'a [TagWrite], path: &str) -> &'a TagValue {
        &writes
            .iter()
            .find(|w| w.path.as_str() == path)
            .unwrap_or_else(|| panic!("missing tag {}", path))
            .value
    }

    fn sample() -> DepotDocument {
        serde_json::from_str(
            r#"{"depotInfoList": [{
                "depotId": "D1",
                "name": "North Yard",
                "chargingStationInfoList": [
                    {
                        "chargingStationId": "CS-1",
                        "chargingStationStatus": "Available",
                        "chargingPointInfoList": [
                            {"chargingPointId": "CP-1", "chargingPointStatus": "Available",
                             "energyMeterReading": 1000.0, "presentPower": 22.0,
                             "vehicleInfo": {}, "chargingProcessInfo": {}},
                            {"chargingPointId": "CP-2", "chargingPointStatus": "Unavailable",
                             "energyMeterReading": null, "chargingPointFaultInfo": {"code": 3}}
                        ]
                    },
                    {
                        "chargingStationId": "CS-2",
                        "chargingStationStatus": "Faulted",
                        "chargingPointInfoList": []
                    }
                ]
            }]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_document_yields_status_block_only() {
        let now = Utc::now();
        let writes = flattener().flatten(&DepotDocument::default(), now);

        assert_eq!(writes.len(), STATUS_TAG_COUNT);
        let paths: Vec<_> = writes.iter().map(|w| w.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "[default]ChargePilot/Status/LastUpdated",
                "[default]ChargePilot/Status/LastUpdateSuccess",
                "[default]ChargePilot/Status/LastError",
                "[default]ChargePilot/Status/LastErrorTime",
                "[default]ChargePilot/Status/TotalDepots",
            ]
        );
        assert_eq!(writes[0].value, TagValue::DateTime(now));
        assert_eq!(writes[1].value, TagValue::Boolean(true));
        assert_eq!(writes[2].value, TagValue::String(String::new()));
        assert_eq!(writes[4].value, TagValue::Integer(0));
    }

    #[test]
    fn test_tag_counts_per_level() {
        let writes = flattener().flatten(&sample(), Utc::now());
        // status + depot + 2 stations + 2 points
        assert_eq!(
            writes.len(),
            STATUS_TAG_COUNT + DEPOT_TAG_COUNT + 2 * STATION_TAG_COUNT + 2 * POINT_TAG_COUNT
        );
    }

    #[test]
    fn test_point_tags() {
        let writes = flattener().flatten(&sample(), Utc::now());
        let cp1 = format!("{}/Depots/North_Yard/Stations/CS_1/Points/CP_1", BASE);
        let cp2 = format!("{}/Depots/North_Yard/Stations/CS_1/Points/CP_2", BASE);

        assert_eq!(value_of(&writes, &format!("{}/PointId", cp1)), &TagValue::from("CP-1"));
        assert_eq!(value_of(&writes, &format!("{}/PresentPower_kW", cp1)), &TagValue::Float(22.0));
        assert_eq!(value_of(&writes, &format!("{}/HasVehicle", cp1)), &TagValue::Boolean(true));
        assert_eq!(value_of(&writes, &format!("{}/IsCharging", cp1)), &TagValue::Boolean(true));
        assert_eq!(value_of(&writes, &format!("{}/HasFault", cp1)), &TagValue::Boolean(false));

        // null energy is written as 0.0 and power defaults to 0.0
        assert_eq!(
            value_of(&writes, &format!("{}/EnergyMeterReading_Wh", cp2)),
            &TagValue::Float(0.0)
        );
        assert_eq!(value_of(&writes, &format!("{}/PresentPower_kW", cp2)), &TagValue::Float(0.0));
        assert_eq!(value_of(&writes, &format!("{}/HasFault", cp2)), &TagValue::Boolean(true));
        assert_eq!(
            value_of(&writes, &format!("{}/HasScheduledCharging", cp2)),
            &TagValue::Boolean(false)
        );
    }

    #[test]
    fn test_station_summaries() {
        let writes = flattener().flatten(&sample(), Utc::now());
        let cs1 = format!("{}/Depots/North_Yard/Stations/CS_1/Summary", BASE);
        let cs2 = format!("{}/Depots/North_Yard/Stations/CS_2/Summary", BASE);

        assert_eq!(value_of(&writes, &format!("{}/TotalPoints", cs1)), &TagValue::Integer(2));
        assert_eq!(value_of(&writes, &format!("{}/AvailablePoints", cs1)), &TagValue::Integer(1));
        assert_eq!(value_of(&writes, &format!("{}/UnavailablePoints", cs1)), &TagValue::Integer(1));
        assert_eq!(
            value_of(&writes, &format!("{}/TotalEnergyReading_Wh", cs1)),
            &TagValue::Float(1000.0)
        );
        assert_eq!(
            value_of(&writes, &format!("{}/AvailabilityPercent", cs1)),
            &TagValue::Float(50.0)
        );

        // station without points
        assert_eq!(value_of(&writes, &format!("{}/TotalPoints", cs2)), &TagValue::Integer(0));
        assert_eq!(
            value_of(&writes, &format!("{}/AvailabilityPercent", cs2)),
            &TagValue::Float(0.0)
        );
    }

    #[test]
    fn test_depot_summary() {
        let writes = flattener().flatten(&sample(), Utc::now());
        let depot = format!("{}/Depots/North_Yard", BASE);
        let s = format!("{}/Summary", depot);

        assert_eq!(value_of(&writes, &format!("{}/DepotId", depot)), &TagValue::from("D1"));
        assert_eq!(value_of(&writes, &format!("{}/DepotName", depot)), &TagValue::from("North Yard"));
        assert_eq!(value_of(&writes, &format!("{}/TotalStations", s)), &TagValue::Integer(2));
        assert_eq!(value_of(&writes, &format!("{}/AvailableStations", s)), &TagValue::Integer(1));
        assert_eq!(value_of(&writes, &format!("{}/UnavailableStations", s)), &TagValue::Integer(0));
        assert_eq!(value_of(&writes, &format!("{}/TotalPoints", s)), &TagValue::Integer(2));
        assert_eq!(
            value_of(&writes, &format!("{}/TotalEnergyReading_Wh", s)),
            &TagValue::Float(1000.0)
        );
        assert_eq!(
            value_of(&writes, &format!("{}/StationAvailabilityPercent", s)),
            &TagValue::Float(50.0)
        );
        assert_eq!(
            value_of(&writes, &format!("{}/PointAvailabilityPercent", s)),
            &TagValue::Float(50.0)
        );
        assert_eq!(
            value_of(&writes, &format!("{}/TotalDepots", format!("{}/Status", BASE))),
            &TagValue::Integer(1)
        );
    }

    #[test]
    fn test_values_declare_their_data_types() {
        let writes = flattener().flatten(&sample(), Utc::now());
        let summary = format!("{}/Depots/North_Yard/Summary", BASE);
        let total = writes
            .iter()
            .find(|w| w.path.as_str() == format!("{}/TotalPoints", summary))
            .unwrap();
        assert_eq!(total.value.data_type(), TagDataType::Int8);
        assert_eq!(writes[0].value.data_type(), TagDataType::DateTime);
    }
}
