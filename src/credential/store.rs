//! [`CredentialStore`] implementations.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{is_usable, CredentialError, CredentialStore, API_KEY_ENV_VAR};
use crate::config::AppPaths;

// ---------------------------------------------------------------------------
// FileCredentialStore
// ---------------------------------------------------------------------------

/// Keeps the API key in a single plain-text file in the config directory.
///
/// The file is re-read on every [`get`](CredentialStore::get) so a key set
/// from another process is picked up by the next correction.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store backed by the platform default key file.
    pub fn new() -> Self {
        Self::at(AppPaths::new().credential_file)
    }

    /// Store backed by an explicit path (useful for tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `key` (trimmed), creating parent directories as needed.
    ///
    /// On Unix the file is restricted to the owner (`0600`).
    pub fn save(&self, key: &str) -> Result<(), CredentialError> {
        if !is_usable(key) {
            return Err(CredentialError::Unusable);
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = open_owner_only(&self.path)?;
        file.write_all(key.trim().as_bytes())?;
        Ok(())
    }

    /// Remove the stored key.  Removing a key that was never saved is not an
    /// error.
    pub fn clear(&self) -> Result<(), CredentialError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("cannot read credential file {}: {e}", self.path.display());
                None
            }
        }
    }
}

/// Open `path` for writing, truncating it.  A new file is created `0600`
/// on Unix; an existing one is narrowed to `0600` before it is written.
#[cfg(unix)]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

// ---------------------------------------------------------------------------
// EnvCredentialStore
// ---------------------------------------------------------------------------

/// Reads the API key from an environment variable at call time.
#[derive(Debug, Clone)]
pub struct EnvCredentialStore {
    var: String,
}

impl EnvCredentialStore {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Store reading [`API_KEY_ENV_VAR`].
    pub fn from_default_var() -> Self {
        Self::new(API_KEY_ENV_VAR)
    }

    /// `true` when the variable is set to anything at all.
    pub fn is_set(&self) -> bool {
        std::env::var_os(&self.var).is_some()
    }
}

impl CredentialStore for EnvCredentialStore {
    fn get(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

// ---------------------------------------------------------------------------
// StaticCredentialStore
// ---------------------------------------------------------------------------

/// Fixed in-memory value.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    value: Option<String>,
}

impl StaticCredentialStore {
    pub fn new(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
        }
    }

    /// Store with no key configured.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl CredentialStore for StaticCredentialStore {
    fn get(&self) -> Option<String> {
        self.value.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
