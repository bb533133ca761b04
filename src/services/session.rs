// SPDX-License-Identifier: MIT

//! Session lifecycle management.
//!
//! Owns the credential and the current user identity. Handles:
//! - Rehydration from the token store at construction (no revalidation)
//! - Login / register / logout against the identity endpoints
//! - Central 401 handling (forced logout, readiness broadcast)
//! - The session epoch used to invalidate in-flight continuations
//!
//! Every authenticated call elsewhere captures an [`AuthSnapshot`] before
//! suspending and re-checks it with [`SessionManager::is_current`] at its
//! continuation. A logout (or a 401, or a fresh login) bumps the epoch, so
//! a late response issued under the old credential can never mutate state
//! that belongs to a newer session.

use crate::error::ApiError;
use crate::models::{Credential, User};
use crate::services::ApiClient;
use crate::store::TokenStore;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Session readiness as observed by the UI layer.
///
/// `Unknown` exists only between process start and rehydration; it is what
/// the access gate renders as "hold" so a stored session does not flash a
/// redirect while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// The credential an authenticated call was issued under, captured before
/// the call suspends.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub token: String,
    pub user: User,
    pub(crate) epoch: u64,
}

/// Registration profile for new accounts.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterProfile {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Owns authentication state; sole writer of the token store.
pub struct SessionManager {
    api: ApiClient,
    store: TokenStore,
    credential: RwLock<Option<Credential>>,
    /// Bumped on every credential change (login, logout, forced logout).
    epoch: AtomicU64,
    readiness_tx: watch::Sender<Readiness>,
}

impl SessionManager {
    /// Create the session manager and rehydrate from the token store.
    ///
    /// A stored credential is adopted optimistically without a server
    /// round-trip; if it has expired, the first authenticated call comes
    /// back 401 and forces the logout path.
    pub fn new(api: ApiClient, store: TokenStore) -> Self {
        let (readiness_tx, _) = watch::channel(Readiness::Unknown);

        let manager = Self {
            api,
            store,
            credential: RwLock::new(None),
            epoch: AtomicU64::new(0),
            readiness_tx,
        };

        match manager.store.load() {
            Some(credential) => {
                tracing::info!(user = %credential.user.email, "Session restored from disk");
                *manager.credential.write() = Some(credential);
                manager.epoch.fetch_add(1, Ordering::SeqCst);
                let _ = manager.readiness_tx.send_replace(Readiness::Authenticated);
            }
            None => {
                let _ = manager.readiness_tx.send_replace(Readiness::Unauthenticated);
            }
        }

        manager
    }

    /// Current readiness state.
    pub fn readiness(&self) -> Readiness {
        *self.readiness_tx.borrow()
    }

    /// Subscribe to readiness changes (drives the redirect on forced logout).
    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.readiness_tx.subscribe()
    }

    /// Identity of the authenticated user, if any.
    pub fn user(&self) -> Option<User> {
        self.credential.read().as_ref().map(|c| c.user.clone())
    }

    /// Capture the current credential for an authenticated call.
    ///
    /// Returns `Unauthorized` when no session is active.
    pub fn current_auth(&self) -> Result<AuthSnapshot, ApiError> {
        let guard = self.credential.read();
        let credential = guard.as_ref().ok_or(ApiError::Unauthorized)?;
        Ok(AuthSnapshot {
            token: credential.token.clone(),
            user: credential.user.clone(),
            epoch: self.epoch.load(Ordering::SeqCst),
        })
    }

    /// True if the snapshot still belongs to the active session.
    ///
    /// Continuations of authenticated calls must check this before applying
    /// their result.
    pub fn is_current(&self, auth: &AuthSnapshot) -> bool {
        auth.epoch == self.epoch.load(Ordering::SeqCst)
    }

    /// Exchange credentials for a session token.
    ///
    /// On `InvalidCredentials` or `ServiceUnavailable` the session state is
    /// unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let body = LoginRequest { email, password };
        let result: Result<Credential, ApiError> =
            self.api.post_json("/api/auth/login", &body, None).await;

        match result {
            Ok(credential) => {
                tracing::info!(user = %credential.user.email, "Login successful");
                self.adopt(credential.clone());
                Ok(credential)
            }
            // The identity endpoint answers 401 for a bad password; that is
            // not a session-token rejection.
            Err(ApiError::Unauthorized) => Err(ApiError::InvalidCredentials),
            Err(e) => Err(e),
        }
    }

    /// Create an account and start a session.
    ///
    /// Signals `Conflict` when the identity already exists.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<Credential, ApiError> {
        let result: Result<Credential, ApiError> =
            self.api.post_json("/api/auth/register", profile, None).await;

        match result {
            Ok(credential) => {
                tracing::info!(user = %credential.user.email, "Registration successful");
                self.adopt(credential.clone());
                Ok(credential)
            }
            Err(ApiError::Unauthorized) => Err(ApiError::InvalidCredentials),
            Err(e) => Err(e),
        }
    }

    /// End the session: clear the store, drop the credential, bump the
    /// epoch so outstanding continuations become no-ops.
    pub fn logout(&self) {
        self.store.clear();
        *self.credential.write() = None;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let _ = self.readiness_tx.send_replace(Readiness::Unauthenticated);
        tracing::info!("Logged out");
    }

    /// Forced logout after a 401 on any authenticated call.
    ///
    /// The readiness broadcast is what drives the UI redirect; the 401
    /// itself never surfaces as a per-call error.
    pub fn handle_unauthorized(&self) {
        if self.credential.read().is_none() {
            return; // already logged out (e.g. two racing 401s)
        }
        tracing::warn!("Session token rejected by the backend, forcing logout");
        self.logout();
    }

    /// Adopt a fresh credential (login or registration).
    fn adopt(&self, credential: Credential) {
        if let Err(e) = self.store.save(&credential) {
            // Session stays valid in memory; it just won't survive a restart.
            tracing::warn!(error = %e, "Failed to persist session, continuing anyway");
        }
        *self.credential.write() = Some(credential);
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let _ = self.readiness_tx.send_replace(Readiness::Authenticated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(dir: &tempfile::TempDir) -> SessionManager {
        let store = TokenStore::new(dir.path().join("session.json"));
        SessionManager::new(ApiClient::new("http://localhost:1"), store)
    }

    #[test]
    fn test_starts_unauthenticated_without_stored_credential() {
        let dir = tempfile::tempdir().expect("tempdir");
        let session = test_session(&dir);
        assert_eq!(session.readiness(), Readiness::Unauthenticated);
        assert!(session.current_auth().is_err());
    }

    #[test]
    fn test_rehydrates_stored_credential() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().join("session.json"));
        store
            .save(&Credential {
                token: "tok_stored".to_string(),
                user: User {
                    id: "u1".to_string(),
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                },
            })
            .expect("save");

        let session = SessionManager::new(ApiClient::new("http://localhost:1"), store);
        assert_eq!(session.readiness(), Readiness::Authenticated);
        let auth = session.current_auth().expect("auth");
        assert_eq!(auth.token, "tok_stored");
        assert_eq!(auth.user.name, "Ada");
    }

    #[test]
    fn test_logout_invalidates_snapshots() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().join("session.json"));
        store
            .save(&Credential {
                token: "tok".to_string(),
                user: User {
                    id: "u1".to_string(),
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                },
            })
            .expect("save");

        let session = SessionManager::new(ApiClient::new("http://localhost:1"), store);
        let auth = session.current_auth().expect("auth");
        assert!(session.is_current(&auth));

        session.logout();
        assert!(!session.is_current(&auth));
        assert_eq!(session.readiness(), Readiness::Unauthenticated);
        assert!(TokenStore::new(dir.path().join("session.json")).load().is_none());
    }
}
