// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // Non-success answer from the external authorization service, passed through
    Upstream {
        status: u16,
        message: String,
        details: Value,
    },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Upstream { status, .. } => *status,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::BadRequest(msg) => json!({ "error": msg }),
            ApiError::Upstream { status, message, details } => {
                json!({
                    "error": "External API error",
                    "status": status,
                    "message": message,
                    "details": details
                })
            }
            ApiError::InternalServerError(details) => {
                json!({
                    "error": "Internal server error",
                    "details": details
                })
            }
            _ => {
                json!({
                    "error": true,
                    "message": self.message(),
                    "code": self.error_code()
                })
            }
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// Wrap an external error response. The message is taken from the body's
    /// `message` field when it has one, otherwise from the raw text.
    pub fn upstream(status: u16, raw_body: &str) -> Self {
        let details = serde_json::from_str::<Value>(raw_body)
            .unwrap_or_else(|_| Value::String(raw_body.to_string()));
        let message = details
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| raw_body.to_string());

        ApiError::Upstream { status, message, details }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<crate::access::AccessCheckError> for ApiError {
    fn from(err: crate::access::AccessCheckError) -> Self {
        match err {
            crate::access::AccessCheckError::Status { status, body } => ApiError::upstream(status, &body),
            other => {
                tracing::error!("Access check failed: {}", other);
                ApiError::internal_server_error(other.to_string())
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
