//! Error types for the ConnectedDrive client

use thiserror::Error;

/// Main error type for the ConnectedDrive client
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("server returned {status}: {body}")]
    ServerStatus { status: u16, body: String },

    #[error("access token rejected by server ({status})")]
    AuthRejected { status: u16, body: String },

    #[error("not logged in")]
    NotLoggedIn,

    #[error("no username and password stored")]
    NoCredentialsStored,

    #[error("no vehicles found")]
    VehicleNotFound,

    #[error(transparent)]
    DecodeFailure(#[from] DecodeFailure),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl DriveError {
    /// True for 401-class failures the retry orchestrator converts into a
    /// refresh-and-retry cycle.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, DriveError::AuthRejected { .. })
    }
}

/// A response body that did not match the expected shape.
///
/// Carries the offending payload for diagnostics; decoding never produces a
/// partial or default-filled object.
#[derive(Error, Debug)]
#[error("decode failed: {reason}")]
pub struct DecodeFailure {
    pub reason: String,
    pub payload: String,
}

impl DecodeFailure {
    pub fn new(reason: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            payload: payload.into(),
        }
    }
}
