// handlers/auth/check_access.rs - POST /api/auth/check-access

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::access::{request_origin, AccessCheckRequest};
use crate::app::AppState;
use crate::error::ApiError;

/// Fields are loosely typed so that a non-string value reads as missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAccessBody {
    pub user_id: Option<Value>,
    pub url_path: Option<Value>,
}

/// POST /api/auth/check-access - Ask the authorization service whether a user may open a page
///
/// Expected Input:
/// ```json
/// { "userId": "64f0...", "urlPath": "/chat/123" }
/// ```
///
/// The external service lives on the same host the request came in on
/// (`x-forwarded-host` / `x-forwarded-proto` first). Its JSON answer is passed
/// through unchanged; a non-success answer keeps its status code.
pub async fn check_access(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload: CheckAccessBody = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Invalid check-access body: {}", e);
        ApiError::internal_server_error(e.to_string())
    })?;

    let (Some(user_id), Some(url_path)) = (non_empty(payload.user_id), non_empty(payload.url_path)) else {
        return Err(ApiError::bad_request("Missing required fields: userId and urlPath"));
    };

    let base = request_origin(&headers, "http")?;
    let request = AccessCheckRequest { user_id, url_path };
    let decision = state.upstream.check_access(&base, &request).await?;

    Ok(Json(decision))
}

fn non_empty(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
