//! Client configuration

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::models::hub::Hub;

/// Configuration for a [`crate::client::ConnectedDrive`] instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base64-encoded API key for the Basic auth header on login and
    /// refresh requests (looks similar to `a2V5OnNlY3JldA==`).
    pub api_key: String,

    /// Hub used when neither the caller nor the preference store names one.
    #[serde(default = "default_hub")]
    pub default_hub: Hub,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay before an auth retry while a login is concurrently in
    /// progress, to avoid hammering a server mid-authentication.
    #[serde(default = "default_login_retry_delay_ms")]
    pub login_retry_delay_ms: u64,
}

fn default_hub() -> Hub {
    Hub::Europe
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_login_retry_delay_ms() -> u64 {
    500
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            default_hub: default_hub(),
            request_timeout_secs: default_timeout_secs(),
            login_retry_delay_ms: default_login_retry_delay_ms(),
        }
    }

    /// Build the Basic auth API key from a key/secret pair.
    pub fn api_key_from_credentials(key: &str, secret: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", key, secret))
    }
}
