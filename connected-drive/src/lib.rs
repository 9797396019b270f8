//! ConnectedDrive client library
//!
//! Client for the BMW ConnectedDrive API, which is split across three
//! independent regional servers ("hubs") that do not share session state.
//! The library maintains exactly one valid, hub-scoped session, transparently
//! re-establishes it on expiry and retries the one failed request, without
//! the caller having to know any of this.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use connected_drive::client::ConnectedDrive;
//! use connected_drive::config::ClientConfig;
//! use connected_drive::storage::{FilePreferenceStore, FileSecureStore};
//!
//! # async fn run() -> Result<(), connected_drive::errors::DriveError> {
//! let config = ClientConfig::new(ClientConfig::api_key_from_credentials("key", "secret"));
//! let drive = ConnectedDrive::new(
//!     config,
//!     Arc::new(FileSecureStore::new("/var/lib/drive/secure")),
//!     Arc::new(FilePreferenceStore::new("/var/lib/drive/prefs.json")),
//! )?;
//!
//! drive.login("driver@example.com", "password", None).await?;
//! for vehicle in drive.vehicles().await? {
//!     let status = drive.vehicle_status(&vehicle).await?;
//!     println!("{}: {} km left", vehicle.vin, status.remaining_range_km);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod storage;

pub use auth::{DriveEvent, Session, SessionManager, State, Tokens};
pub use client::ConnectedDrive;
pub use config::ClientConfig;
pub use errors::{DecodeFailure, DriveError};
