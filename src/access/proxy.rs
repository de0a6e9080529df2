use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use super::{endpoint_url, AccessCheckError, AccessCheckRequest, AccessCheckResponse, AccessChecker};
use crate::config::GateConfig;

/// Asks the service's own check-access route on the configured internal origin.
#[derive(Debug, Clone)]
pub struct ProxyAccessChecker {
    client: reqwest::Client,
    check_access_path: String,
}

impl ProxyAccessChecker {
    pub fn new(config: &GateConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.check_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            check_access_path: config.check_access_path(),
        })
    }
}

#[async_trait]
impl AccessChecker for ProxyAccessChecker {
    async fn check_access(&self, origin: &Url, user_id: &str, url_path: &str) -> Result<bool, AccessCheckError> {
        let url = endpoint_url(origin, &self.check_access_path)?;
        let body = AccessCheckRequest {
            user_id: user_id.to_string(),
            url_path: url_path.to_string(),
        };

        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AccessCheckError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let decision: AccessCheckResponse = response.json().await?;
        Ok(decision.has_access())
    }
}
