// SPDX-License-Identifier: MIT

//! Client-side mirror of a remote record collection.
//!
//! One instance per category (meals, workouts), generic over [`Category`].
//! Mutations are confirmed-then-applied: local state changes only after the
//! backend acknowledges, so a failed call is a no-op on the local
//! collection. A reload that fails keeps the previous contents
//! (stale-but-available) and records the error instead.
//!
//! Cache contents are stamped with the session epoch they were loaded
//! under. A snapshot taken under a different epoch reads as empty, and a
//! continuation whose issuing epoch is no longer current discards its
//! result, so records can never leak across users or resurrect after
//! logout.

use crate::error::ApiError;
use crate::models::Category;
use crate::services::session::AuthSnapshot;
use crate::services::{ApiClient, SessionManager};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cache contents as rendered by the UI layer.
#[derive(Debug, Clone)]
pub struct CacheSnapshot<R> {
    /// Most-recent-first for local creations; server order after a reload.
    pub records: Vec<R>,
    /// True while a reload is in flight.
    pub loading: bool,
    /// Error from the most recent failed operation, if any.
    pub last_error: Option<ApiError>,
}

impl<R> CacheSnapshot<R> {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            last_error: None,
        }
    }
}

struct CacheState<R> {
    records: Vec<R>,
    loading: bool,
    last_error: Option<ApiError>,
    /// Session epoch the records belong to.
    epoch: u64,
}

impl<R> CacheState<R> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            loading: false,
            last_error: None,
            epoch: 0,
        }
    }

    /// Drop contents that belong to an older session before applying a
    /// result issued under `epoch`.
    fn align_epoch(&mut self, epoch: u64) {
        if self.epoch != epoch {
            self.records.clear();
            self.loading = false;
            self.last_error = None;
            self.epoch = epoch;
        }
    }
}

/// Typed in-memory mirror of one remote collection.
pub struct RecordCache<C: Category> {
    api: ApiClient,
    session: Arc<SessionManager>,
    state: RwLock<CacheState<C::Record>>,
}

impl<C: Category> RecordCache<C> {
    pub fn new(api: ApiClient, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            state: RwLock::new(CacheState::new()),
        }
    }

    /// Current contents, loading flag, and last error.
    ///
    /// Reads as empty when the contents belong to a previous session.
    pub fn snapshot(&self) -> CacheSnapshot<C::Record> {
        let auth = match self.session.current_auth() {
            Ok(auth) => auth,
            Err(_) => return CacheSnapshot::empty(),
        };

        let state = self.state.read();
        if state.epoch != auth.epoch {
            return CacheSnapshot::empty();
        }
        CacheSnapshot {
            records: state.records.clone(),
            loading: state.loading,
            last_error: state.last_error.clone(),
        }
    }

    /// Fetch the full collection, replacing local state wholesale.
    ///
    /// Server order is adopted verbatim. On failure the previous contents
    /// stay available and the error is recorded.
    pub async fn reload(&self) -> Result<(), ApiError> {
        let auth = self.session.current_auth()?;
        {
            let mut state = self.state.write();
            state.align_epoch(auth.epoch);
            state.loading = true;
        }

        let result: Result<Vec<C::Record>, ApiError> =
            self.api.get_json(C::BASE_PATH, &auth.token).await;

        if !self.session.is_current(&auth) {
            // Session changed while we were suspended; this result belongs
            // to a dead session.
            return Err(ApiError::Unauthorized);
        }

        let mut state = self.state.write();
        state.loading = false;
        match result {
            Ok(records) => {
                tracing::debug!(category = C::NAME, count = records.len(), "Collection reloaded");
                state.records = records;
                state.last_error = None;
                Ok(())
            }
            Err(ApiError::Unauthorized) => {
                drop(state);
                self.session.handle_unauthorized();
                Err(ApiError::Unauthorized)
            }
            Err(e) => {
                tracing::warn!(category = C::NAME, error = %e, "Reload failed, keeping stale contents");
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Create a record; prepended locally only after server confirmation.
    pub async fn create(&self, fields: C::Fields) -> Result<C::Record, ApiError> {
        let auth = self.session.current_auth()?;

        let result: Result<C::Record, ApiError> = self
            .api
            .post_json(C::BASE_PATH, &fields, Some(&auth.token))
            .await;

        if !self.session.is_current(&auth) {
            return Err(ApiError::Unauthorized);
        }

        match result {
            Ok(record) => {
                let mut state = self.state.write();
                state.align_epoch(auth.epoch);
                // The id set stays duplicate-free even if the server echoes
                // an id we already hold.
                state
                    .records
                    .retain(|r| C::record_id(r) != C::record_id(&record));
                state.records.insert(0, record.clone());
                state.last_error = None;
                Ok(record)
            }
            Err(e) => self.fail::<C::Record>(&auth, e),
        }
    }

    /// Send a full replacement for `id`; replaced in place locally on
    /// success, preserving its position.
    pub async fn update(&self, id: &str, fields: C::Fields) -> Result<C::Record, ApiError> {
        let auth = self.session.current_auth()?;
        if !self.contains(id, auth.epoch) {
            return self.fail::<C::Record>(&auth, ApiError::NotFound(id.to_string()));
        }

        let path = format!("{}/{}", C::BASE_PATH, id);
        let result: Result<C::Record, ApiError> =
            self.api.put_json(&path, &fields, &auth.token).await;

        if !self.session.is_current(&auth) {
            return Err(ApiError::Unauthorized);
        }

        match result {
            Ok(record) => {
                let mut state = self.state.write();
                state.align_epoch(auth.epoch);
                match state.records.iter().position(|r| C::record_id(r) == id) {
                    Some(i) => state.records[i] = record.clone(),
                    // A concurrent delete completed first; this update
                    // completed last, so its state wins.
                    None => state.records.insert(0, record.clone()),
                }
                state.last_error = None;
                Ok(record)
            }
            Err(e) => self.fail::<C::Record>(&auth, e),
        }
    }

    /// Delete `id`; removed locally only after server confirmation.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let auth = self.session.current_auth()?;
        if !self.contains(id, auth.epoch) {
            return self.fail::<()>(&auth, ApiError::NotFound(id.to_string()));
        }

        let path = format!("{}/{}", C::BASE_PATH, id);
        let result = self.api.delete(&path, &auth.token).await;

        if !self.session.is_current(&auth) {
            return Err(ApiError::Unauthorized);
        }

        match result {
            Ok(()) => {
                let mut state = self.state.write();
                state.align_epoch(auth.epoch);
                state.records.retain(|r| C::record_id(r) != id);
                state.last_error = None;
                Ok(())
            }
            Err(e) => self.fail::<()>(&auth, e),
        }
    }

    /// True if `id` is present in the contents of the given epoch.
    fn contains(&self, id: &str, epoch: u64) -> bool {
        let state = self.state.read();
        state.epoch == epoch && state.records.iter().any(|r| C::record_id(r) == id)
    }

    /// Record a failure: 401 goes through the central session path, every
    /// other error lands in `last_error` for the UI. Local records are
    /// untouched either way.
    fn fail<T>(&self, auth: &AuthSnapshot, e: ApiError) -> Result<T, ApiError> {
        if e.is_unauthorized() {
            self.session.handle_unauthorized();
            return Err(e);
        }
        let mut state = self.state.write();
        state.align_epoch(auth.epoch);
        state.last_error = Some(e.clone());
        Err(e)
    }
}
