// SPDX-License-Identifier: MIT

//! On-disk credential store.
//!
//! Persists exactly one session credential as a JSON file so the session
//! survives a process restart. No network access. `load` never fails:
//! missing or corrupt data means "no session".

use crate::error::StoreError;
use crate::models::Credential;
use std::fs;
use std::path::PathBuf;

/// File-backed store for the single active session credential.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist the credential, replacing any previous one.
    pub fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the persisted credential, if any.
    ///
    /// Returns `None` when the file is absent or unreadable, or when its
    /// contents fail to parse. The caller treats all of these as "no
    /// session".
    pub fn load(&self) -> Option<Credential> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding corrupt session file");
                None
            }
        }
    }

    /// Remove the persisted credential. Removing an absent file is fine.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove session file");
            }
        }
    }
}
