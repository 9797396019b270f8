//! File-backed store implementations
//!
//! Reference implementations of the store traits: one file per secure key
//! with owner-only permissions, and a single JSON map for preferences.
//! Writes go through a temp file and rename so a crash mid-write cannot
//! corrupt an existing value.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::DriveError;
use crate::storage::store::{PreferenceStore, SecureStore};

/// Secure store keeping each key in its own file under a directory.
pub struct FileSecureStore {
    dir: PathBuf,
}

impl FileSecureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[async_trait]
impl SecureStore for FileSecureStore {
    async fn save(&self, key: &str, value: &[u8]) -> Result<(), DriveError> {
        fs::create_dir_all(&self.dir).await?;
        write_atomic(&self.key_path(key), value).await
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, DriveError> {
        match fs::read(self.key_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), DriveError> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Preference store keeping all keys in one JSON file.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, DriveError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| DriveError::StorageError(format!("corrupt preferences: {}", err))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), DriveError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(map)
            .map_err(|err| DriveError::StorageError(err.to_string()))?;
        write_atomic(&self.path, contents.as_bytes()).await
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DriveError> {
        Ok(self.read_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Option<&str>) -> Result<(), DriveError> {
        let mut map = self.read_map().await?;
        match value {
            Some(value) => map.insert(key.to_string(), value.to_string()),
            None => map.remove(key),
        };
        self.write_map(&map).await
    }
}

/// Write contents to a temp file, restrict permissions, then rename over the
/// destination.
async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), DriveError> {
    let temp_path = path.with_extension("tmp");

    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    set_permissions_600(&temp_path).await?;
    fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Owner-read/write only on Unix; a no-op elsewhere.
async fn set_permissions_600(path: &Path) -> Result<(), DriveError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let meta = fs::metadata(path).await?;
        let mut perms = meta.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).await?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
