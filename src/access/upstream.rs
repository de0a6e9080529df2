use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::{endpoint_url, AccessCheckError, AccessCheckRequest};
use crate::config::{GateConfig, UpstreamConfig};

/// Client for the external authorization service.
///
/// Every call is a single attempt with Basic auth built from the service
/// credentials.
#[derive(Debug, Clone)]
pub struct AuthorizationClient {
    client: reqwest::Client,
    username: String,
    password: String,
    check_access_path: String,
}

impl AuthorizationClient {
    pub fn new(upstream: &UpstreamConfig, gate: &GateConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = gate.check_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            username: upstream.basic_auth_username.clone(),
            password: upstream.basic_auth_password.clone(),
            check_access_path: upstream.check_access_path.clone(),
        })
    }

    /// Forward a check-access request to the service at `base`.
    ///
    /// Returns the decoded JSON body on success. A non-success answer comes
    /// back as [`AccessCheckError::Status`] with the raw body.
    pub async fn check_access(&self, base: &Url, request: &AccessCheckRequest) -> Result<Value, AccessCheckError> {
        let url = endpoint_url(base, &self.check_access_path)?;
        tracing::debug!("Forwarding access check for user {} on '{}' to {}", request.user_id, request.url_path, url);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Authorization service answered {} for user {}", status, request.user_id);
            return Err(AccessCheckError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
