//! Credential and preference storage

pub mod file_store;
pub mod store;

pub use file_store::{FilePreferenceStore, FileSecureStore};
pub use store::{PreferenceStore, SecureStore, KEY_LAST_USED_HUB, KEY_PASSWORD, KEY_USERNAME};
