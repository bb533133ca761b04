// SPDX-License-Identifier: MIT

//! Screen-level state for the dashboard.
//!
//! Composes the two record caches and the recommendation requester into
//! one view-state object, and routes user actions to them. Performs no
//! remote calls of its own.

use crate::error::ApiError;
use crate::models::{Credential, Meal, MealFields, Meals, User, Workout, WorkoutFields, Workouts};
use crate::services::{
    ApiClient, CacheSnapshot, RecommendationRequester, RecommendationState, RecordCache,
    RegisterProfile, SessionManager,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// The record currently under edit, if any.
///
/// The variant is the category discriminant: saving dispatches on it, not
/// on which fields the record happens to carry.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    Meal(Meal),
    Workout(Workout),
}

impl EditTarget {
    /// ID of the record under edit.
    pub fn id(&self) -> &str {
        match self {
            EditTarget::Meal(meal) => &meal.id,
            EditTarget::Workout(workout) => &workout.id,
        }
    }
}

/// Everything the dashboard renders from.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub user: Option<User>,
    pub meals: CacheSnapshot<Meal>,
    pub workouts: CacheSnapshot<Workout>,
    pub recommendation: RecommendationState,
    pub edit_target: Option<EditTarget>,
}

/// Mediates all dashboard user actions into cache/requester calls.
pub struct DashboardController {
    session: Arc<SessionManager>,
    meals: RecordCache<Meals>,
    workouts: RecordCache<Workouts>,
    recommender: RecommendationRequester,
    edit_target: RwLock<Option<EditTarget>>,
}

impl DashboardController {
    pub fn new(api: ApiClient, session: Arc<SessionManager>) -> Self {
        Self {
            meals: RecordCache::new(api.clone(), session.clone()),
            workouts: RecordCache::new(api.clone(), session.clone()),
            recommender: RecommendationRequester::new(api, session.clone()),
            session,
            edit_target: RwLock::new(None),
        }
    }

    /// The session manager backing this dashboard.
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Consolidated state for rendering.
    pub fn view_state(&self) -> DashboardView {
        DashboardView {
            user: self.session.user(),
            meals: self.meals.snapshot(),
            workouts: self.workouts.snapshot(),
            recommendation: self.recommender.snapshot(),
            edit_target: self.edit_target.read().clone(),
        }
    }

    // ─── Session actions ─────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        self.session.login(email, password).await
    }

    pub async fn register(&self, profile: &RegisterProfile) -> Result<Credential, ApiError> {
        self.session.register(profile).await
    }

    pub fn logout(&self) {
        *self.edit_target.write() = None;
        self.session.logout();
    }

    // ─── Record actions ──────────────────────────────────────────────────

    /// Load both collections (initial mount and explicit refresh).
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let (meals, workouts) = tokio::join!(self.meals.reload(), self.workouts.reload());
        meals.and(workouts)
    }

    pub async fn create_meal(&self, fields: MealFields) -> Result<Meal, ApiError> {
        self.meals.create(fields).await
    }

    pub async fn create_workout(&self, fields: WorkoutFields) -> Result<Workout, ApiError> {
        self.workouts.create(fields).await
    }

    pub async fn delete_meal(&self, id: &str) -> Result<(), ApiError> {
        self.meals.delete(id).await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<(), ApiError> {
        self.workouts.delete(id).await
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Select a record for editing; replaces any previous selection.
    pub fn begin_edit(&self, target: EditTarget) {
        *self.edit_target.write() = Some(target);
    }

    pub fn cancel_edit(&self) {
        *self.edit_target.write() = None;
    }

    /// Save the edited record, dispatching on its category discriminant.
    ///
    /// The selection is cleared on success and kept on failure so the user
    /// can correct and retry.
    pub async fn save_edit(&self, edited: EditTarget) -> Result<(), ApiError> {
        let result = match &edited {
            EditTarget::Meal(meal) => self
                .meals
                .update(&meal.id, meal.fields())
                .await
                .map(|_| ()),
            EditTarget::Workout(workout) => self
                .workouts
                .update(&workout.id, workout.fields())
                .await
                .map(|_| ()),
        };

        if result.is_ok() {
            *self.edit_target.write() = None;
        }
        result
    }

    // ─── Recommendation ──────────────────────────────────────────────────

    /// Request an AI meal suggestion for the calories logged so far.
    ///
    /// The aggregate is computed from the meal cache at this moment, not
    /// tracked live.
    pub async fn request_recommendation(&self) -> Result<(), ApiError> {
        let total_calories: u32 = self
            .meals
            .snapshot()
            .records
            .iter()
            .map(|meal| meal.calories)
            .sum();
        self.recommender.request(total_calories).await
    }
}
