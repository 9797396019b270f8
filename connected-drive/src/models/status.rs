//! Vehicle status snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::models::enums::{ChargingStatus, ConnectionStatus, DoorStatus, LightStatus};

/// Vehicle position as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub heading: f64,
}

/// Detailed vehicle status.
///
/// Immutable snapshot; a newly fetched status supersedes the old one. Callers
/// interested in change notifications diff `update_reason` across snapshots.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatus {
    /// Time this snapshot was fetched (client clock, not a wire field).
    #[serde(skip, default = "Utc::now")]
    pub fetch_time: DateTime<Utc>,

    /// Time of the last update reason, not the time of the fetch.
    #[serde(deserialize_with = "deserialize_wire_date")]
    pub update_time: DateTime<Utc>,

    pub charging_level_hv: i32,

    #[serde(default)]
    pub charging_status: ChargingStatus,

    #[serde(default)]
    pub connection_status: ConnectionStatus,

    #[serde(default)]
    pub update_reason: ConnectionStatus,

    /// Minutes of charging remaining, when charging.
    #[serde(default)]
    pub charging_time_remaining: Option<i32>,

    // Always "UNKNOWN" in practice
    pub last_charging_end_reason: String,
    pub last_charging_end_result: String,

    #[serde(rename = "maxRangeElectric")]
    pub max_range_km: i32,
    #[serde(rename = "maxRangeElectricMls")]
    pub max_range_mi: i32,
    #[serde(rename = "remainingRangeElectric")]
    pub remaining_range_km: i32,
    #[serde(rename = "remainingRangeElectricMls")]
    pub remaining_range_mi: i32,

    pub remaining_fuel: i32,
    pub mileage: i32,

    #[serde(default)]
    pub position: Option<Location>,

    // Doors and windows
    #[serde(default)]
    pub door_lock_state: DoorStatus,
    #[serde(rename = "convertibleRoofState", default)]
    pub convertible_roof: DoorStatus,
    #[serde(default)]
    pub door_driver_front: DoorStatus,
    #[serde(default)]
    pub door_driver_rear: DoorStatus,
    #[serde(default)]
    pub door_passenger_front: DoorStatus,
    #[serde(default)]
    pub door_passenger_rear: DoorStatus,
    #[serde(default)]
    pub hood: DoorStatus,
    #[serde(default)]
    pub parking_light: LightStatus,
    #[serde(default)]
    pub position_light: LightStatus,
    #[serde(default)]
    pub window_driver_front: DoorStatus,
    #[serde(default)]
    pub window_driver_rear: DoorStatus,
    #[serde(default)]
    pub window_passenger_front: DoorStatus,
    #[serde(default)]
    pub window_passenger_rear: DoorStatus,
}

impl VehicleStatus {
    /// Open if any window is open, closed otherwise.
    pub fn window_state(&self) -> DoorStatus {
        let windows = [
            self.window_driver_front,
            self.window_driver_rear,
            self.window_passenger_front,
            self.window_passenger_rear,
        ];
        if windows.contains(&DoorStatus::Open) {
            DoorStatus::Open
        } else {
            DoorStatus::Closed
        }
    }

    /// True when the car is locked and all doors and windows are closed.
    pub fn is_secured(&self) -> bool {
        self.door_lock_state == DoorStatus::Secured
            && self.window_driver_front == DoorStatus::Closed
            && self.window_driver_rear == DoorStatus::Closed
            && self.window_passenger_front == DoorStatus::Closed
            && self.window_passenger_rear == DoorStatus::Closed
            && self.door_driver_front == DoorStatus::Closed
            && self.door_driver_rear == DoorStatus::Closed
            && self.door_passenger_front == DoorStatus::Closed
            && self.door_passenger_rear == DoorStatus::Closed
            && (self.convertible_roof == DoorStatus::Invalid
                || self.convertible_roof == DoorStatus::Closed)
    }

    /// Remaining charging time as "H:MM", empty when not charging.
    pub fn charging_time_remaining_string(&self) -> String {
        match self.charging_time_remaining {
            Some(minutes) => format!("{}:{:02}", minutes / 60, minutes % 60),
            None => String::new(),
        }
    }
}

/// Wire date format, e.g. "2015-12-10T22:48:49-0500".
const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Parse a wire date string. A non-conforming string is a decode failure,
/// never silently defaulted.
pub fn parse_wire_date(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(s, WIRE_DATE_FORMAT).map(|dt| dt.with_timezone(&Utc))
}

fn deserialize_wire_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_wire_date(&s).map_err(serde::de::Error::custom)
}
