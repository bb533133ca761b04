// SPDX-License-Identifier: MIT

//! Race-safety tests: late responses after logout, 401 mid-session, and
//! cross-user cache isolation.

use fitlog_client::gate::{self, GateDecision};
use fitlog_client::services::{ApiClient, Readiness, RecommendationRequester, RecommendationState};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::{meal_json, mount_collection, mount_login, spawn_logged_in};

#[tokio::test]
async fn test_reload_response_after_logout_is_discarded() {
    let app = spawn_logged_in().await;

    Mock::given(method("GET"))
        .and(path("/api/meals"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([meal_json("m1", "Oatmeal", 300)]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;
    mount_collection(&app.server, "/api/workouts", json!([])).await;

    let refresh = {
        let dashboard = app.dashboard.clone();
        tokio::spawn(async move { dashboard.refresh().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Logout while the meals response is still in flight
    app.dashboard.logout();
    assert_eq!(app.session.readiness(), Readiness::Unauthenticated);
    assert!(app.store.load().is_none());

    // The late response must not resurrect the cleared state
    let _ = refresh.await.expect("join");
    let view = app.dashboard.view_state();
    assert!(view.meals.records.is_empty());
    assert!(view.workouts.records.is_empty());
    assert_eq!(app.session.readiness(), Readiness::Unauthenticated);
}

#[tokio::test]
async fn test_recommendation_after_logout_never_surfaces() {
    let app = spawn_logged_in().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/recommend-meal"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "recommendation": "too late" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;

    let requester = Arc::new(RecommendationRequester::new(
        ApiClient::new(app.server.uri()),
        app.session.clone(),
    ));
    let pending = {
        let requester = requester.clone();
        tokio::spawn(async move { requester.request(800).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    app.dashboard.logout();

    let _ = pending.await.expect("join");
    assert_eq!(requester.snapshot(), RecommendationState::Idle);
}

#[tokio::test]
async fn test_401_forces_logout_and_clears_everything() {
    let app = spawn_logged_in().await;
    mount_collection(&app.server, "/api/meals", json!([meal_json("m1", "Oatmeal", 300)])).await;
    mount_collection(&app.server, "/api/workouts", json!([])).await;
    app.dashboard.refresh().await.expect("refresh");
    assert_eq!(app.dashboard.view_state().meals.records.len(), 1);

    let mut readiness = app.session.subscribe();

    // Token expires server-side; the next reload comes back 401
    app.server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/meals"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/workouts"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;

    let _ = app.dashboard.refresh().await;

    assert_eq!(app.session.readiness(), Readiness::Unauthenticated);
    assert!(app.store.load().is_none());

    // Caches are cleared, the watch fired, and the gate now redirects
    let view = app.dashboard.view_state();
    assert!(view.meals.records.is_empty());
    assert!(view.user.is_none());

    readiness.changed().await.expect("watch should signal");
    assert_eq!(*readiness.borrow(), Readiness::Unauthenticated);
    assert_eq!(
        gate::decide(app.session.readiness()),
        GateDecision::Redirect(gate::ENTRY_POINT)
    );
}

#[tokio::test]
async fn test_no_cross_user_leakage_after_relogin() {
    let app = spawn_logged_in().await;
    mount_collection(&app.server, "/api/meals", json!([meal_json("m1", "Ada's oatmeal", 300)])).await;
    mount_collection(&app.server, "/api/workouts", json!([])).await;
    app.dashboard.refresh().await.expect("refresh");
    assert_eq!(app.dashboard.view_state().meals.records.len(), 1);

    app.dashboard.logout();
    mount_login(&app.server, "tok_bob", "Bob", "bob@example.com").await;
    app.dashboard
        .login("bob@example.com", "pw")
        .await
        .expect("login");

    // Bob is authenticated but has not reloaded; Ada's records must not
    // show through
    let view = app.dashboard.view_state();
    assert_eq!(view.user.expect("user").name, "Bob");
    assert!(view.meals.records.is_empty());
}

#[tokio::test]
async fn test_mutation_issued_before_logout_cannot_apply_after() {
    let app = spawn_logged_in().await;
    mount_collection(&app.server, "/api/meals", json!([])).await;
    mount_collection(&app.server, "/api/workouts", json!([])).await;
    app.dashboard.refresh().await.expect("refresh");

    Mock::given(method("POST"))
        .and(path("/api/meals"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(meal_json("m-late", "Late snack", 200))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;

    let create = {
        let dashboard = app.dashboard.clone();
        tokio::spawn(async move {
            dashboard
                .create_meal(fitlog_client::models::MealFields {
                    name: "Late snack".to_string(),
                    calories: 200,
                })
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    app.dashboard.logout();

    let result = create.await.expect("join");
    assert!(result.is_err());
    assert!(app.dashboard.view_state().meals.records.is_empty());
}
