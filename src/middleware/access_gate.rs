use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::route_matcher;
use crate::access::internal_origin;
use crate::app::AppState;

/// Page access gate.
///
/// Sessions with the constrained role have every page view checked against
/// the authorization service; everything else passes. Any failure while
/// checking sends the user to the login page.
pub async fn access_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if !route_matcher::matches(&path) || route_matcher::is_exempt(&path) {
        return next.run(request).await;
    }

    let gate = &state.config.gate;
    let session = state.sessions.resolve(request.headers()).await;

    let Some(user) = session.and_then(|s| s.user) else {
        return next.run(request).await;
    };

    if !user.has_role(&gate.constrained_role) {
        return next.run(request).await;
    }

    let Some(user_id) = user.user_id() else {
        tracing::warn!("Session with role {} has no user id, redirecting {} to login", gate.constrained_role, path);
        return login_redirect(&gate.login_path);
    };

    let origin = match internal_origin(&state.config.server, gate) {
        Ok(origin) => origin,
        Err(e) => {
            tracing::warn!("Access check for user {} on {} not attempted: {}", user_id, path, e);
            return login_redirect(&gate.login_path);
        }
    };

    match state.checker.check_access(&origin, user_id, &path).await {
        Ok(true) => {
            tracing::debug!("Access granted for user {} on {}", user_id, path);
            next.run(request).await
        }
        Ok(false) => {
            tracing::info!("Access denied for user {} on {}", user_id, path);
            login_redirect(&gate.login_path)
        }
        Err(e) => {
            tracing::warn!("Access check failed for user {} on {}: {}", user_id, path, e);
            login_redirect(&gate.login_path)
        }
    }
}

fn login_redirect(login_path: &str) -> Response {
    Redirect::temporary(login_path).into_response()
}
