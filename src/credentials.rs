//! API-key resolution and the persisted key store.
//!
//! The effective key comes from an explicit, ordered chain of providers:
//! a per-run override, the local key store, then a fixed list of environment
//! variable names. Blank values never win; a fully empty chain means the
//! pipeline is unconfigured and must not issue network calls.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Environment variables consulted for an API key, in precedence order.
pub const KEY_ENV_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// Where a resolved key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// The `--api-key` flag for this run.
    Override,
    /// The persisted key store.
    Store,
    /// The named environment variable.
    Env(&'static str),
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "command-line override"),
            Self::Store => write!(f, "local key store"),
            Self::Env(name) => write!(f, "environment variable {name}"),
        }
    }
}

/// On-disk shape of the stored credential.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    api_key: String,
    saved_at: DateTime<Utc>,
}

/// Persisted key store backed by a YAML file under the store root.
pub struct KeyStore {
    root: PathBuf,
}

impl KeyStore {
    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    /// Persists `key`, replacing any previously stored one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory or file cannot be written.
    pub fn save(&self, key: &str) -> Result<(), String> {
        let credential = StoredCredential { api_key: key.to_string(), saved_at: Utc::now() };
        let yaml = serde_yaml::to_string(&credential)
            .map_err(|e| format!("Failed to serialize credential: {e}"))?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| format!("Failed to create store directory: {e}"))?;
        std::fs::write(self.path(), yaml).map_err(|e| format!("Failed to write key store: {e}"))
    }

    /// Loads the stored key, if a non-blank one is present.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(self.path()).ok()?;
        let credential: StoredCredential = serde_yaml::from_str(&contents).ok()?;
        let key = credential.api_key;
        if key.trim().is_empty() {
            None
        } else {
            Some(key)
        }
    }

    fn path(&self) -> PathBuf {
        self.root.join("credentials.yaml")
    }
}

/// Store root, overridable via `COMMIT_SCOUT_STORE`.
#[must_use]
pub fn store_root() -> PathBuf {
    std::env::var("COMMIT_SCOUT_STORE").map_or_else(|_| PathBuf::from(".scout"), PathBuf::from)
}

/// Resolves the effective API key from the provider chain.
///
/// Returns `None` when no provider has a non-blank key; callers must treat
/// that as "unconfigured" and halt before any call that requires a key.
#[must_use]
pub fn resolve(override_key: Option<&str>, store: &KeyStore) -> Option<(String, KeySource)> {
    resolve_from(override_key, store.load(), |name| std::env::var(name).ok())
}

/// Pure resolution over the ordered chain: override > store > env list.
pub fn resolve_from(
    override_key: Option<&str>,
    stored: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<(String, KeySource)> {
    if let Some(key) = override_key {
        if !key.trim().is_empty() {
            return Some((key.to_string(), KeySource::Override));
        }
    }
    if let Some(key) = stored {
        if !key.trim().is_empty() {
            return Some((key, KeySource::Store));
        }
    }
    for name in KEY_ENV_VARS {
        if let Some(key) = env(name) {
            if !key.trim().is_empty() {
                return Some((key, KeySource::Env(name)));
            }
        }
    }
    None
}
