// SPDX-License-Identifier: MIT

//! AI meal recommendation requests.
//!
//! One logical request at a time. A `request` issued while another is in
//! flight supersedes it: the sequence counter moves on and the earlier
//! call's continuation discards its response without touching state. There
//! is no automatic retry; a failure stands until the user re-requests.

use crate::error::ApiError;
use crate::services::{ApiClient, SessionManager};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Lifecycle of the current recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationState {
    Idle,
    Pending,
    Ready(String),
    Failed(String),
}

#[derive(Serialize)]
struct RecommendRequest {
    #[serde(rename = "currentCalories")]
    current_calories: u32,
}

#[derive(Deserialize)]
struct RecommendResponse {
    recommendation: String,
}

struct RequesterState {
    state: RecommendationState,
    /// Session epoch the state belongs to.
    epoch: u64,
}

/// Issues recommendation requests and exposes their state machine.
pub struct RecommendationRequester {
    api: ApiClient,
    session: Arc<SessionManager>,
    state: RwLock<RequesterState>,
    /// Bumped on every `request`; a continuation holding an older value
    /// has been superseded.
    seq: AtomicU64,
}

impl RecommendationRequester {
    pub fn new(api: ApiClient, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            state: RwLock::new(RequesterState {
                state: RecommendationState::Idle,
                epoch: 0,
            }),
            seq: AtomicU64::new(0),
        }
    }

    /// Current state; reads as `Idle` when it belongs to a previous
    /// session.
    pub fn snapshot(&self) -> RecommendationState {
        let auth = match self.session.current_auth() {
            Ok(auth) => auth,
            Err(_) => return RecommendationState::Idle,
        };
        let state = self.state.read();
        if state.epoch != auth.epoch {
            return RecommendationState::Idle;
        }
        state.state.clone()
    }

    /// Request a recommendation for the given calorie total.
    ///
    /// The total is computed by the caller from the meal cache at the
    /// moment of invocation; this is not a live subscription.
    pub async fn request(&self, total_calories: u32) -> Result<(), ApiError> {
        let auth = self.session.current_auth()?;
        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write();
            state.state = RecommendationState::Pending;
            state.epoch = auth.epoch;
        }
        tracing::debug!(total_calories, "Requesting meal recommendation");

        let body = RecommendRequest {
            current_calories: total_calories,
        };
        let result: Result<RecommendResponse, ApiError> = self
            .api
            .post_json("/api/ai/recommend-meal", &body, Some(&auth.token))
            .await;

        if self.seq.load(Ordering::SeqCst) != my_seq {
            // Superseded by a newer request; its continuation owns the
            // state now.
            return Ok(());
        }

        if !self.session.is_current(&auth) {
            let mut state = self.state.write();
            if state.epoch == auth.epoch {
                state.state = RecommendationState::Idle;
            }
            return Err(ApiError::Unauthorized);
        }

        match result {
            Ok(response) => {
                let mut state = self.state.write();
                state.state = RecommendationState::Ready(response.recommendation);
                state.epoch = auth.epoch;
                Ok(())
            }
            Err(ApiError::Unauthorized) => {
                {
                    let mut state = self.state.write();
                    state.state = RecommendationState::Idle;
                }
                self.session.handle_unauthorized();
                Err(ApiError::Unauthorized)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Recommendation request failed");
                let mut state = self.state.write();
                state.state = RecommendationState::Failed(e.to_string());
                state.epoch = auth.epoch;
                Err(e)
            }
        }
    }
}
