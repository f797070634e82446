//! API credential handling.
//!
//! The orchestrator only ever *reads* a credential through the
//! [`CredentialStore`] capability; writing is left to the CLI `key`
//! subcommand via [`FileCredentialStore::save`].
//!
//! * [`Credential`]: validated bearer token whose `Debug`/`Display` output is
//!   redacted, so it cannot leak into logs.
//! * [`FileCredentialStore`]: reads the key file on every call.
//! * [`EnvCredentialStore`]: reads an environment variable.
//! * [`StaticCredentialStore`]: fixed value, for tests and embedding.

pub mod store;

pub use store::{EnvCredentialStore, FileCredentialStore, StaticCredentialStore};

use std::fmt;

use thiserror::Error;

/// Sentinel shipped in sample configuration; treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_OPENAI_API_KEY_HERE";

/// Environment variable consulted by [`EnvCredentialStore::from_default_var`].
pub const API_KEY_ENV_VAR: &str = "TEXT_POLISHER_API_KEY";

// ---------------------------------------------------------------------------
// CredentialError
// ---------------------------------------------------------------------------

/// Errors raised while persisting or removing a credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The key was blank or the placeholder sentinel.
    #[error("API key must not be empty or the placeholder value")]
    Unusable,

    /// The key file could not be read or written.
    #[error("credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// A usable API key.
///
/// Only constructible through [`Credential::from_raw`], which rejects blank
/// values and the placeholder sentinel.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validate a raw stored value.
    ///
    /// ```
    /// use text_polisher::credential::{Credential, PLACEHOLDER_API_KEY};
    ///
    /// assert!(Credential::from_raw(Some("sk-abc")).is_some());
    /// assert!(Credential::from_raw(Some("   ")).is_none());
    /// assert!(Credential::from_raw(Some(PLACEHOLDER_API_KEY)).is_none());
    /// assert!(Credential::from_raw(None).is_none());
    /// ```
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if is_usable(raw) {
            Some(Self(raw.trim().to_string()))
        } else {
            None
        }
    }

    /// The secret itself, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// `true` when `raw` is neither blank nor the placeholder sentinel.
pub fn is_usable(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed != PLACEHOLDER_API_KEY
}

// ---------------------------------------------------------------------------
// CredentialStore trait
// ---------------------------------------------------------------------------

/// Read-only access to the currently configured API key.
///
/// Implementations must be safe for concurrent reads.
pub trait CredentialStore: Send + Sync {
    /// The raw stored value, if any.  May be blank or the placeholder.
    fn get(&self) -> Option<String>;

    /// Whether [`get`](Self::get) currently yields a usable key.
    fn is_present(&self) -> bool {
        self.get().as_deref().is_some_and(is_usable)
    }

    /// The current value as a validated [`Credential`].
    fn credential(&self) -> Option<Credential> {
        Credential::from_raw(self.get().as_deref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
