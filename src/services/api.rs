// SPDX-License-Identifier: MIT

//! Low-level backend API client.
//!
//! Thin reqwest wrapper shared by the session, cache, and recommendation
//! layers. Handles:
//! - Bearer-token attachment on authenticated calls
//! - Status-code to error-taxonomy mapping (401, 404, 409, 4xx, 5xx)
//! - JSON body decoding

use crate::error::ApiError;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// Backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("fitlog-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// GET a JSON collection or document.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;

        Self::check_response_json(response).await
    }

    /// POST a JSON body; `token` is `None` only for the identity endpoints.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        Self::check_response_json(response).await
    }

    /// PUT a full JSON replacement.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        Self::check_response_json(response).await
    }

    /// DELETE a document; the confirmation body is discarded.
    pub async fn delete(&self, path: &str, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;

        Self::check_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success status to the error taxonomy.
    async fn error_for(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(body),
            409 => ApiError::Conflict,
            400 | 422 => ApiError::ValidationFailed(body),
            _ => ApiError::ServiceUnavailable(format!("HTTP {}: {}", status, body)),
        }
    }

    /// Check response status, discarding the body on success.
    async fn check_response(response: reqwest::Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::error_for(response).await)
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::ServiceUnavailable(format!("JSON parse error: {}", e)))
    }
}

/// Network-level failures (refused connection, timeout) map to
/// `ServiceUnavailable`.
fn transport_error(e: reqwest::Error) -> ApiError {
    ApiError::ServiceUnavailable(e.to_string())
}
