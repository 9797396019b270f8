//! Store traits injected into the session manager
//!
//! The session manager treats credential persistence as a capability, not
//! something it implements. Platform integrations (Keychain, credential
//! vaults) implement these traits outside the library; file-backed
//! implementations live in `file_store`.

use async_trait::async_trait;

use crate::errors::DriveError;

/// Secure store key for the account username.
pub const KEY_USERNAME: &str = "username";

/// Secure store key for the account password.
pub const KEY_PASSWORD: &str = "password";

/// Preference store key for the last hub a login succeeded against.
pub const KEY_LAST_USED_HUB: &str = "last_used_hub";

/// Durable secure key-value store for credentials.
///
/// Values must survive process restarts and must never be written to logs.
#[async_trait]
pub trait SecureStore: Send + Sync {
    async fn save(&self, key: &str, value: &[u8]) -> Result<(), DriveError>;

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, DriveError>;

    async fn delete(&self, key: &str) -> Result<(), DriveError>;
}

/// Durable preference store for non-secret settings.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DriveError>;

    async fn set(&self, key: &str, value: Option<&str>) -> Result<(), DriveError>;
}
