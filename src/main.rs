// SPDX-License-Identifier: MIT

//! FitLog terminal front-end.
//!
//! Thin command-line surface over the client core; it only calls the
//! public operation set the dashboard controller exposes.

use anyhow::{bail, Context};
use fitlog_client::config::Config;
use fitlog_client::gate::{self, GateDecision};
use fitlog_client::models::{MealFields, WorkoutFields};
use fitlog_client::services::{ApiClient, RecommendationState, RegisterProfile, SessionManager};
use fitlog_client::store::TokenStore;
use fitlog_client::DashboardController;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env();
    let api = ApiClient::new(&config.api_base_url);
    let store = TokenStore::new(&config.session_file);
    let session = Arc::new(SessionManager::new(api.clone(), store));
    let dashboard = DashboardController::new(api, session);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("dashboard");

    match command {
        "login" => {
            let email = args.get(1).context("usage: fitlog login <email> <password>")?;
            let password = args.get(2).context("usage: fitlog login <email> <password>")?;
            let credential = dashboard.login(email, password).await?;
            println!("Logged in as {}", credential.user.name);
        }
        "register" => {
            let name = args
                .get(1)
                .context("usage: fitlog register <name> <email> <password>")?;
            let email = args
                .get(2)
                .context("usage: fitlog register <name> <email> <password>")?;
            let password = args
                .get(3)
                .context("usage: fitlog register <name> <email> <password>")?;
            let credential = dashboard
                .register(&RegisterProfile {
                    name: name.clone(),
                    email: email.clone(),
                    password: password.clone(),
                })
                .await?;
            println!("Welcome, {}!", credential.user.name);
        }
        "logout" => {
            dashboard.logout();
            println!("Logged out");
        }
        "dashboard" => {
            require_session(&dashboard)?;
            dashboard.refresh().await?;
            render(&dashboard);
        }
        "add-meal" => {
            require_session(&dashboard)?;
            let name = args.get(1).context("usage: fitlog add-meal <name> <calories>")?;
            let calories = args
                .get(2)
                .context("usage: fitlog add-meal <name> <calories>")?
                .parse()
                .context("calories must be a number")?;
            let meal = dashboard
                .create_meal(MealFields {
                    name: name.clone(),
                    calories,
                })
                .await?;
            println!("Logged meal {} ({} calories)", meal.name, meal.calories);
        }
        "add-workout" => {
            require_session(&dashboard)?;
            let name = args
                .get(1)
                .context("usage: fitlog add-workout <name> <minutes>")?;
            let minutes = args
                .get(2)
                .context("usage: fitlog add-workout <name> <minutes>")?
                .parse()
                .context("minutes must be a number")?;
            let workout = dashboard
                .create_workout(WorkoutFields {
                    name: name.clone(),
                    duration_minutes: minutes,
                })
                .await?;
            println!(
                "Logged workout {} ({} min)",
                workout.name, workout.duration_minutes
            );
        }
        "delete-meal" => {
            require_session(&dashboard)?;
            let id = args.get(1).context("usage: fitlog delete-meal <id>")?;
            dashboard.refresh().await?;
            dashboard.delete_meal(id).await?;
            println!("Deleted meal {}", id);
        }
        "delete-workout" => {
            require_session(&dashboard)?;
            let id = args.get(1).context("usage: fitlog delete-workout <id>")?;
            dashboard.refresh().await?;
            dashboard.delete_workout(id).await?;
            println!("Deleted workout {}", id);
        }
        "recommend" => {
            require_session(&dashboard)?;
            dashboard.refresh().await?;
            dashboard.request_recommendation().await?;
            match dashboard.view_state().recommendation {
                RecommendationState::Ready(text) => println!("AI Coach: {}", text),
                RecommendationState::Failed(reason) => {
                    println!("Sorry, no recommendation right now ({})", reason)
                }
                _ => {}
            }
        }
        other => bail!(
            "unknown command '{}'\ncommands: login register logout dashboard add-meal add-workout delete-meal delete-workout recommend",
            other
        ),
    }

    Ok(())
}

/// Gate protected commands on session readiness.
fn require_session(dashboard: &DashboardController) -> anyhow::Result<()> {
    match gate::decide(dashboard.session().readiness()) {
        GateDecision::Render => Ok(()),
        GateDecision::Hold => bail!("session state not resolved yet, try again"),
        GateDecision::Redirect(entry) => bail!("not logged in — go to {}", entry),
    }
}

/// Print the consolidated dashboard view.
fn render(dashboard: &DashboardController) {
    let view = dashboard.view_state();

    if let Some(user) = &view.user {
        println!("Welcome, {}!\n", user.name);
    }

    println!("Today's meals:");
    for meal in &view.meals.records {
        println!("  [{}] {} — {} calories", meal.id, meal.name, meal.calories);
    }
    if let Some(e) = &view.meals.last_error {
        println!("  (meals may be stale: {})", e);
    }

    println!("\nToday's workouts:");
    for workout in &view.workouts.records {
        println!(
            "  [{}] {} — {} min",
            workout.id, workout.name, workout.duration_minutes
        );
    }
    if let Some(e) = &view.workouts.last_error {
        println!("  (workouts may be stale: {})", e);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fitlog_client=info")),
        )
        .init();
}
