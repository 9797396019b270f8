//! Wire status enums
//!
//! The API is known to introduce undocumented values over time, so every
//! status enum decodes unrecognized wire strings to an `UnknownKey` variant
//! instead of failing the whole payload.

use serde::{Deserialize, Serialize};

/// High-voltage battery charging status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingStatus {
    #[serde(rename = "INVALID")]
    NotConnected,
    #[serde(rename = "CHARGING")]
    Charging,
    #[serde(rename = "FINISHED_FULLY_CHARGED")]
    FinishedFullyCharged,
    #[serde(rename = "FINISHED_NOT_FULL")]
    FinishedNotFull,
    #[serde(rename = "WAITING_FOR_CHARGING")]
    WaitingForCharging,
    #[serde(rename = "NOT_CHARGING")]
    NotCharging,
    #[serde(rename = "ERROR")]
    Error,
    #[default]
    #[serde(rename = "UNKNOWNKEY", other)]
    UnknownKey,
}

/// Connection status and update reasons reported by the vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    #[serde(rename = "CONNECTED")]
    Connected,
    #[serde(rename = "CHARGING_DONE")]
    ChargingDone,
    #[serde(rename = "CHARGING_INTERRUPED")]
    ChargingInterrupted,
    #[serde(rename = "CHARGING_PAUSED")]
    ChargingPaused,
    #[serde(rename = "CHARGING_STARTED")]
    ChargingStarted,
    // The server misspells this update reason
    #[serde(rename = "CHARGIN_STARTED")]
    ChargingStarted2,
    #[serde(rename = "CYCLIC_RECHARGING")]
    CyclicRecharging,
    #[serde(rename = "DOOR_STATE_CHANGED")]
    DoorStateChanged,
    #[serde(rename = "NO_CYCLIC_RECHARGING")]
    NoCyclicRecharging,
    #[serde(rename = "NO_LSC_TRIGGER")]
    NoLscTrigger,
    #[serde(rename = "ON_DEMAND")]
    OnDemand,
    #[serde(rename = "PREDICTION_UPDATE")]
    PredictionUpdate,
    #[serde(rename = "TEMPORARY_POWER_SUPPLY_FAILURE")]
    TempPowerSupplyFailure,
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[serde(rename = "VEHICLE_MOVING")]
    VehicleMoving,
    #[serde(rename = "VEHICLE_SECURED")]
    VehicleSecured,
    #[serde(rename = "VEHICLE_SHUTDOWN")]
    VehicleShutdown,
    #[serde(rename = "VEHICLE_SHUTDOWN_SECURED")]
    VehicleShutdownSecured,
    #[serde(rename = "VEHICLE_UNSECURED")]
    VehicleUnsecured,
    #[serde(rename = "DISCONNECTED")]
    Disconnected,
    #[default]
    #[serde(rename = "UNKNOWNKEY", other)]
    UnknownKey,
}

/// State of a door, window, hood or convertible roof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorStatus {
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "SECURED")]
    Secured,
    #[serde(rename = "INVALID")]
    Invalid,
    #[default]
    #[serde(rename = "UNKNOWNKEY", other)]
    UnknownKey,
}

/// State of the parking or position lights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
    #[serde(rename = "Invalid")]
    Invalid,
    #[default]
    #[serde(rename = "UNKNOWNKEY", other)]
    UnknownKey,
}

/// Remote services that can be executed or queried on a vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleService {
    #[serde(rename = "CHARGE_NOW")]
    ChargeNow,
    #[serde(rename = "CHARGING_CONTROL")]
    ChargingControl,
    #[serde(rename = "CLIMATE_CONTROL")]
    ClimateControl,
    #[serde(rename = "CLIMATE_NOW")]
    ClimateControlStart,
    #[serde(rename = "DOOR_LOCK")]
    DoorLock,
    #[serde(rename = "DOOR_UNLOCK")]
    DoorUnlock,
    #[serde(rename = "GET_ALL_IMAGES")]
    AllImages,
    #[serde(rename = "GET_PASSWORD_RESET_INFO")]
    PasswordReset,
    #[serde(rename = "GET_VEHICLES")]
    Vehicles,
    #[serde(rename = "GET_VEHICLE_IMAGE")]
    VehicleImage,
    #[serde(rename = "GET_VEHICLE_STATUS")]
    VehicleStatus,
    #[serde(rename = "HORN_BLOW")]
    HornBlow,
    #[serde(rename = "LIGHT_FLASH")]
    LightFlash,
    #[serde(rename = "LOCAL_SEARCH")]
    LocalSearch,
    #[serde(rename = "LOCAL_SEARCH_SUGGESTIONS")]
    LocalSearchSuggestions,
    #[serde(rename = "LOGIN")]
    Login,
    #[serde(rename = "LOGOUT")]
    Logout,
    #[serde(rename = "SEND_POI_TO_CAR")]
    SendPoiToCar,
    #[serde(rename = "VEHICLE_FINDER")]
    VehicleFinder,
    #[default]
    #[serde(rename = "UNKNOWNKEY", other)]
    UnknownKey,
}

impl VehicleService {
    /// Wire code used in request paths and bodies.
    pub fn wire_code(&self) -> &'static str {
        match self {
            VehicleService::ChargeNow => "CHARGE_NOW",
            VehicleService::ChargingControl => "CHARGING_CONTROL",
            VehicleService::ClimateControl => "CLIMATE_CONTROL",
            VehicleService::ClimateControlStart => "CLIMATE_NOW",
            VehicleService::DoorLock => "DOOR_LOCK",
            VehicleService::DoorUnlock => "DOOR_UNLOCK",
            VehicleService::AllImages => "GET_ALL_IMAGES",
            VehicleService::PasswordReset => "GET_PASSWORD_RESET_INFO",
            VehicleService::Vehicles => "GET_VEHICLES",
            VehicleService::VehicleImage => "GET_VEHICLE_IMAGE",
            VehicleService::VehicleStatus => "GET_VEHICLE_STATUS",
            VehicleService::HornBlow => "HORN_BLOW",
            VehicleService::LightFlash => "LIGHT_FLASH",
            VehicleService::LocalSearch => "LOCAL_SEARCH",
            VehicleService::LocalSearchSuggestions => "LOCAL_SEARCH_SUGGESTIONS",
            VehicleService::Login => "LOGIN",
            VehicleService::Logout => "LOGOUT",
            VehicleService::SendPoiToCar => "SEND_POI_TO_CAR",
            VehicleService::VehicleFinder => "VEHICLE_FINDER",
            VehicleService::UnknownKey => "UNKNOWNKEY",
        }
    }
}
