// SPDX-License-Identifier: MIT

//! Data models for the client.

pub mod record;
pub mod user;

pub use record::{Category, Meal, MealFields, Meals, Workout, WorkoutFields, Workouts};
pub use user::{Credential, User};
