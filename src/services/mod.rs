// SPDX-License-Identifier: MIT

//! Services module - session, transport, and synchronization layer.

pub mod api;
pub mod cache;
pub mod recommend;
pub mod session;

pub use api::ApiClient;
pub use cache::{CacheSnapshot, RecordCache};
pub use recommend::{RecommendationRequester, RecommendationState};
pub use session::{AuthSnapshot, Readiness, RegisterProfile, SessionManager};
