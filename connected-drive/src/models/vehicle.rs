//! Vehicle metadata

use serde::{Deserialize, Serialize};

use crate::models::hub::Hub;
use crate::models::status::VehicleStatus;

/// Drive train variant.
///
/// - BEV: battery electric vehicle
/// - REX: range extender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveTrain {
    #[serde(rename = "BEV")]
    Bev,
    #[serde(rename = "REX")]
    Rex,
}

/// BMW i model line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    I3,
    I8,
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::I3 => f.write_str("i3"),
            Model::I8 => f.write_str("i8"),
        }
    }
}

/// BMW color codes. New codes appear with every model year, so unknown codes
/// fall back to `UnknownKey`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    // i3 2014 colors
    B72,
    B74,
    B78,
    B81,
    B85,
    // i3 2016 colors
    C2U,
    C2V,
    C2W,
    // i8 colors
    C01,
    #[default]
    #[serde(rename = "UNKNOWN", other)]
    UnknownKey,
}

impl Color {
    /// Human-readable color name.
    pub fn description(&self) -> &'static str {
        match self {
            Color::B72 => "Ionic Silver metallic",
            Color::B74 => "Arravani Grey",
            Color::B78 => "Solar Orange",
            Color::B81 => "Andesit Silver metallic",
            Color::B85 => "Capparis White",
            Color::C2U => "Platinum Silver",
            Color::C2V => "Mineral Grey",
            Color::C2W => "Fluid Black",
            Color::C01 => "Protonic Blue",
            Color::UnknownKey => "Unknown color",
        }
    }
}

/// Vehicle info from the vehicle list.
///
/// The VIN is the stable identity key. `hub` pins which regional server owns
/// this vehicle's status and command endpoints; the vehicle list itself is
/// hub-agnostic.
#[derive(Debug, Clone, Deserialize)]
pub struct Vehicle {
    pub model: Model,

    #[serde(rename = "bodytype")]
    pub body_type: String,

    #[serde(rename = "yearOfConstruction")]
    pub year: i32,

    pub vin: String,

    pub hub: Hub,

    #[serde(rename = "colorCode", default)]
    pub color: Color,

    #[serde(rename = "driveTrain")]
    pub drive_train: DriveTrain,

    #[serde(rename = "countryCode")]
    pub country_code: String,

    /// Last fetched status, if any. Not a wire field; updated by the caller.
    #[serde(skip)]
    pub last_status: Option<VehicleStatus>,
}
