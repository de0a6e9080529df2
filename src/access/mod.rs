//! Access decisions for constrained sessions.
//!
//! Two hops are involved: the page gate asks the internal check-access route
//! ([`ProxyAccessChecker`]), and that route asks the external authorization
//! service with service credentials attached ([`AuthorizationClient`]).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

pub mod origin;
pub mod proxy;
pub mod upstream;

pub use origin::{endpoint_url, internal_origin, request_origin};
pub use proxy::ProxyAccessChecker;
pub use upstream::AuthorizationClient;

/// Body of a check-access call, on both hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCheckRequest {
    pub user_id: String,
    pub url_path: String,
}

/// Decision payload returned by the authorization service.
///
/// Only `data.hasAccess` is read. A body without it decodes fine and denies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessCheckResponse {
    #[serde(default)]
    pub data: Option<AccessGrant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    #[serde(default)]
    pub has_access: Option<bool>,
}

impl AccessCheckResponse {
    pub fn has_access(&self) -> bool {
        self.data
            .as_ref()
            .and_then(|grant| grant.has_access)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccessCheckError {
    #[error("cannot determine request host")]
    MissingHost,
    #[error("invalid access check url: {0}")]
    InvalidUrl(String),
    #[error("access check request failed: {0}")]
    Transport(String),
    #[error("access check returned status {status}")]
    Status { status: u16, body: String },
    #[error("malformed access check response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for AccessCheckError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AccessCheckError::Decode(err.to_string())
        } else {
            AccessCheckError::Transport(err.to_string())
        }
    }
}

/// Decides whether a user may view a page path.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// `origin` is the scheme and host serving the check-access route.
    async fn check_access(&self, origin: &Url, user_id: &str, url_path: &str) -> Result<bool, AccessCheckError>;
}
