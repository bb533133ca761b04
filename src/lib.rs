// SPDX-License-Identifier: MIT

//! FitLog client core: session and data synchronization for a personal
//! fitness-logging service.
//!
//! This crate owns the authentication-token lifecycle (persisted across
//! restarts), the per-category record caches kept consistent with the
//! remote store, and the recommendation request state machine. Rendering
//! and input widgets live above it and consume [`DashboardController`]'s
//! view-state.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod models;
pub mod services;
pub mod store;

pub use dashboard::{DashboardController, DashboardView, EditTarget};
pub use error::{ApiError, StoreError};
pub use gate::{decide, GateDecision};
pub use services::{Readiness, SessionManager};
