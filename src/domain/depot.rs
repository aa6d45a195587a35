//! Depot telemetry document
//!
//! Mirrors the JSON returned by the charging information endpoint:
//! depots → charging stations → charging points. Everything is optional on
//! the wire; accessors apply the defaults used when writing tags.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const UNKNOWN_ID: &str = "unknown";
pub const UNKNOWN_DEPOT_NAME: &str = "Unknown_Depot";
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Top-level response body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepotDocument {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub depot_info_list: Vec<DepotInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepotInfo {
    #[serde(default, deserialize_with = "lossy_string")]
    pub depot_id: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub charging_station_info_list: Vec<ChargingStationInfo>,
}

impl DepotInfo {
    pub fn id(&self) -> &str {
        self.depot_id.as_deref().unwrap_or(UNKNOWN_ID)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_DEPOT_NAME)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStationInfo {
    #[serde(default, deserialize_with = "lossy_string")]
    pub charging_station_id: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    pub charging_station_status: Option<String>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub charging_point_info_list: Vec<ChargingPointInfo>,
}

impl ChargingStationInfo {
    pub fn id(&self) -> &str {
        self.charging_station_id.as_deref().unwrap_or(UNKNOWN_ID)
    }

    pub fn status(&self) -> &str {
        self.charging_station_status.as_deref().unwrap_or(UNKNOWN_STATUS)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingPointInfo {
    #[serde(default, deserialize_with = "lossy_string")]
    pub charging_point_id: Option<String>,
    #[serde(default, deserialize_with = "lossy_string")]
    pub charging_point_status: Option<String>,
    /// Energy meter reading in Wh
    #[serde(default)]
    pub energy_meter_reading: Option<f64>,
    /// Present power in kW
    #[serde(default)]
    pub present_power: Option<f64>,
    #[serde(default)]
    pub vehicle_info: Option<Value>,
    #[serde(default)]
    pub charging_point_fault_info: Option<Value>,
    #[serde(default)]
    pub charging_process_info: Option<Value>,
    #[serde(default)]
    pub scheduled_charging_process_list: Option<Value>,
}

impl ChargingPointInfo {
    pub fn id(&self) -> &str {
        self.charging_point_id.as_deref().unwrap_or(UNKNOWN_ID)
    }

    pub fn status(&self) -> &str {
        self.charging_point_status.as_deref().unwrap_or(UNKNOWN_STATUS)
    }

    // Presence flags look only at whether the sub-object exists.

    pub fn has_vehicle(&self) -> bool {
        self.vehicle_info.is_some()
    }

    pub fn has_fault(&self) -> bool {
        self.charging_point_fault_info.is_some()
    }

    pub fn is_charging(&self) -> bool {
        self.charging_process_info.is_some()
    }

    pub fn has_scheduled_charging(&self) -> bool {
        self.scheduled_charging_process_list.is_some()
    }
}

/// Availability bucket of a station or point status.
///
/// Only the literal strings `Available` and `Unavailable` are classified;
/// everything else still counts toward totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
    Other,
}

impl Availability {
    pub fn classify(status: &str) -> Self {
        match status {
            "Available" => Self::Available,
            "Unavailable" => Self::Unavailable,
            _ => Self::Other,
        }
    }
}

fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept strings, numbers or booleans for identifier-like fields
fn lossy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
