use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::session::logout_cookie;

/// GET /api/auth/session - Current session user
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": {
///     "user": { "_id": "64f0...", "email": "a@b.co", "companyId": "c-1", "roleCode": "USER" }
///   }
/// }
/// ```
pub async fn session_get(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Value> {
    let user = state
        .sessions
        .resolve(&headers)
        .await
        .and_then(|session| session.user)
        .ok_or_else(|| ApiError::unauthorized("No active session"))?;

    Ok(ApiResponse::success(json!({ "user": user })))
}

/// POST /api/auth/logout - Expire the session cookie
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = logout_cookie(&state.config.session, state.config.security.require_https);
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie.to_string())])
}
