//! Domain models and wire types

pub mod enums;
pub mod execution;
pub mod hub;
pub mod rangemap;
pub mod status;
pub mod vehicle;

pub use enums::{ChargingStatus, ConnectionStatus, DoorStatus, LightStatus, VehicleService};
pub use execution::{ExecutionStatus, RequestStatus};
pub use hub::Hub;
pub use rangemap::RangeMap;
pub use status::{Location, VehicleStatus};
pub use vehicle::{Color, DriveTrain, Model, Vehicle};
