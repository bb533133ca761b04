// SPDX-License-Identifier: MIT

//! Shared test harness: a mock backend plus a fully wired client.

use fitlog_client::models::{Credential, User};
use fitlog_client::services::{ApiClient, SessionManager};
use fitlog_client::store::TokenStore;
use fitlog_client::DashboardController;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A client wired against a wiremock backend, with its session file in a
/// temp dir.
pub struct TestApp {
    pub server: MockServer,
    pub dashboard: Arc<DashboardController>,
    pub session: Arc<SessionManager>,
    pub store: TokenStore,
    _dir: tempfile::TempDir,
}

/// Build a client with no stored session.
#[allow(dead_code)]
pub async fn spawn_app() -> TestApp {
    spawn_with_store(|_| {}).await
}

/// Build a client whose token store already holds a credential, so the
/// session rehydrates at construction without any network traffic.
#[allow(dead_code)]
pub async fn spawn_logged_in() -> TestApp {
    spawn_with_store(|store| {
        store
            .save(&test_credential("tok_live", "Ada", "ada@example.com"))
            .expect("seed credential");
    })
    .await
}

async fn spawn_with_store(seed: impl FnOnce(&TokenStore)) -> TestApp {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path().join("session.json"));
    seed(&store);

    let api = ApiClient::new(server.uri());
    let session = Arc::new(SessionManager::new(api.clone(), store.clone()));
    let dashboard = Arc::new(DashboardController::new(api, session.clone()));

    TestApp {
        server,
        dashboard,
        session,
        store,
        _dir: dir,
    }
}

#[allow(dead_code)]
pub fn test_credential(token: &str, name: &str, email: &str) -> Credential {
    Credential {
        token: token.to_string(),
        user: User {
            id: format!("user-{}", name.to_lowercase()),
            name: name.to_string(),
            email: email.to_string(),
        },
    }
}

#[allow(dead_code)]
pub fn credential_json(token: &str, name: &str, email: &str) -> serde_json::Value {
    json!({
        "token": token,
        "user": { "_id": format!("user-{}", name.to_lowercase()), "name": name, "email": email }
    })
}

#[allow(dead_code)]
pub fn meal_json(id: &str, name: &str, calories: u32) -> serde_json::Value {
    json!({ "_id": id, "name": name, "calories": calories, "createdAt": "2026-08-30T08:00:00Z" })
}

#[allow(dead_code)]
pub fn workout_json(id: &str, name: &str, minutes: u32) -> serde_json::Value {
    json!({ "_id": id, "name": name, "duration": minutes, "createdAt": "2026-08-30T08:00:00Z" })
}

/// Mount a successful login response.
#[allow(dead_code)]
pub async fn mount_login(server: &MockServer, token: &str, name: &str, email: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(credential_json(token, name, email)))
        .mount(server)
        .await;
}

/// Mount a GET collection response.
#[allow(dead_code)]
pub async fn mount_collection(server: &MockServer, collection_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(collection_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
