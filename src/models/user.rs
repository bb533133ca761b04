//! User identity and session credential models.

use serde::{Deserialize, Serialize};

/// User profile as returned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user ID (Mongo-style `_id` on the wire)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (login identifier)
    pub email: String,
}

/// Bearer token plus the identity it authorizes.
///
/// Created on successful login or registration, persisted to the token
/// store immediately, destroyed on logout or on any 401 mid-session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub user: User,
}
