use async_trait::async_trait;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{session_token_from_headers, Session, SessionError, SessionStore, SessionUser};
use crate::config::SessionConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user: SessionUser,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    pub fn new(user: SessionUser, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            user,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Session store backed by an HS256-signed JWT in the session cookie.
#[derive(Debug, Clone)]
pub struct JwtSessionStore {
    config: SessionConfig,
}

impl JwtSessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Sign a session token for `user`.
    pub fn issue(&self, user: SessionUser) -> Result<String, SessionError> {
        self.sign(&SessionClaims::new(user, self.config.expiry_hours))
    }

    pub fn sign(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        let secret = self.secret()?;
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());

        encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
            .map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Verify a session token and return the session it carries.
    pub fn decode(&self, token: &str) -> Result<Session, SessionError> {
        let secret = self.secret()?;
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<SessionClaims>(token, &decoding_key, &validation)
            .map_err(|e| SessionError::Decode(e.to_string()))?;

        Ok(Session {
            user: Some(token_data.claims.user),
        })
    }

    fn secret(&self) -> Result<&str, SessionError> {
        if self.config.secret.is_empty() {
            return Err(SessionError::MissingSecret);
        }
        Ok(&self.config.secret)
    }
}

#[async_trait]
impl SessionStore for JwtSessionStore {
    async fn resolve(&self, headers: &HeaderMap) -> Option<Session> {
        let token = session_token_from_headers(headers, &self.config.cookie_name)?;

        match self.decode(&token) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::debug!("Ignoring session cookie '{}': {}", self.config.cookie_name, e);
                None
            }
        }
    }
}
