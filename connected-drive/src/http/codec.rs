//! Response decoding
//!
//! Declarative mapping from response bodies to domain values. A shape
//! mismatch produces a `DecodeFailure` carrying the offending payload, never
//! a partial or default-filled object.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{DecodeFailure, DriveError};

/// Decode a top-level object.
pub fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, DriveError> {
    serde_json::from_str(body)
        .map_err(|err| DecodeFailure::new(err.to_string(), body).into())
}

/// Decode a single object nested under `key`, e.g. `"vehicleStatus"`.
pub fn decode_keyed<T: DeserializeOwned>(body: &str, key: &str) -> Result<T, DriveError> {
    let inner = extract_key(body, key)?;
    serde_json::from_value(inner)
        .map_err(|err| DecodeFailure::new(format!("{}: {}", key, err), body).into())
}

/// Decode an array nested under `key`, e.g. `"vehicles"`.
pub fn decode_collection<T: DeserializeOwned>(body: &str, key: &str) -> Result<Vec<T>, DriveError> {
    let inner = extract_key(body, key)?;
    if !inner.is_array() {
        return Err(DecodeFailure::new(format!("\"{}\" is not an array", key), body).into());
    }
    serde_json::from_value(inner)
        .map_err(|err| DecodeFailure::new(format!("{}: {}", key, err), body).into())
}

fn extract_key(body: &str, key: &str) -> Result<Value, DriveError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| DecodeFailure::new(err.to_string(), body))?;
    match value.get(key) {
        Some(inner) => Ok(inner.clone()),
        None => Err(DecodeFailure::new(format!("missing key \"{}\"", key), body).into()),
    }
}
