// SPDX-License-Identifier: MIT

//! Logged record models (meals and workouts) and the category trait that
//! lets one cache implementation serve both collections.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record category: the collection path plus the per-category field shape.
///
/// Implemented by the two marker types [`Meals`] and [`Workouts`]. The cache
/// is generic over this trait so create/update/delete/reload are written
/// once.
pub trait Category: Send + Sync + 'static {
    /// Collection path on the backend, e.g. `/api/meals`.
    const BASE_PATH: &'static str;
    /// Human-readable name for log messages.
    const NAME: &'static str;

    /// User-editable fields sent on create and update.
    type Fields: Serialize + Clone + Send + Sync + 'static;
    /// Full record as returned by the server.
    type Record: Clone + DeserializeOwned + Send + Sync + 'static;

    /// Server-assigned ID of a record.
    fn record_id(record: &Self::Record) -> &str;
}

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Server-assigned ID (Mongo-style `_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
    /// Meal name
    pub name: String,
    /// Calorie count
    pub calories: u32,
    /// When the record was created, server-assigned
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Editable meal fields for create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealFields {
    pub name: String,
    pub calories: u32,
}

impl Meal {
    /// Extract the editable fields (used when saving an edit).
    pub fn fields(&self) -> MealFields {
        MealFields {
            name: self.name.clone(),
            calories: self.calories,
        }
    }
}

/// A logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Server-assigned ID (Mongo-style `_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
    /// Workout name
    pub name: String,
    /// Duration in minutes
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    /// When the record was created, server-assigned
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Editable workout fields for create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutFields {
    pub name: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
}

impl Workout {
    /// Extract the editable fields (used when saving an edit).
    pub fn fields(&self) -> WorkoutFields {
        WorkoutFields {
            name: self.name.clone(),
            duration_minutes: self.duration_minutes,
        }
    }
}

/// Category marker for the meal collection.
pub enum Meals {}

impl Category for Meals {
    const BASE_PATH: &'static str = "/api/meals";
    const NAME: &'static str = "meal";

    type Fields = MealFields;
    type Record = Meal;

    fn record_id(record: &Meal) -> &str {
        &record.id
    }
}

/// Category marker for the workout collection.
pub enum Workouts {}

impl Category for Workouts {
    const BASE_PATH: &'static str = "/api/workouts";
    const NAME: &'static str = "workout";

    type Fields = WorkoutFields;
    type Record = Workout;

    fn record_id(record: &Workout) -> &str {
        &record.id
    }
}
