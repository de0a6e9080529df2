//! Session resolution for inbound requests.
//!
//! The gate only ever reads a [`Session`]. Cookies are issued by the login
//! service (or `weam session mint`) and expired by the logout endpoint.

use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

pub mod cookies;
pub mod jwt;

pub use cookies::{logout_cookie, session_cookie, session_token_from_headers};
pub use jwt::{JwtSessionStore, SessionClaims};

/// User attributes carried by the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_code: Option<String>,
}

impl SessionUser {
    /// The user identifier, treating an empty string as absent.
    pub fn user_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn has_role(&self, role_code: &str) -> bool {
        self.role_code.as_deref() == Some(role_code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<SessionUser>,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session secret not configured")]
    MissingSecret,
    #[error("failed to sign session: {0}")]
    Encode(String),
    #[error("invalid session token: {0}")]
    Decode(String),
}

/// Read-only source of the session attached to a request.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` when the request carries no usable session.
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session>;
}
