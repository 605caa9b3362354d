//! Payloads returned by the local mock API.
//!
//! All endpoints return canned data; nothing here authenticates anyone.

use serde::{Deserialize, Serialize};

/// `GET /api/token` response: an id/key pair the front end would use to
/// encrypt request bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub id: String,
    pub token: String,
}

/// Error body returned by the mock API (`{"error": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// `GET /api/me` response for an anonymous session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl SessionInfo {
    pub fn anonymous() -> Self {
        Self {
            logged_in: false,
            username: None,
        }
    }
}
