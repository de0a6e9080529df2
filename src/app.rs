use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::access::{AccessChecker, AuthorizationClient, ProxyAccessChecker};
use crate::config::{AppConfig, SecurityConfig, CHECK_ACCESS_ROUTE};
use crate::handlers::{auth, health, pages};
use crate::middleware::access_gate;
use crate::session::{JwtSessionStore, SessionStore};

/// Everything a request needs, built once at startup and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<dyn SessionStore>,
    pub checker: Arc<dyn AccessChecker>,
    pub upstream: Arc<AuthorizationClient>,
}

impl AppState {
    /// Wire the production collaborators: cookie JWT sessions and the HTTP
    /// access checker pointed at this service's own check-access route.
    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let sessions = JwtSessionStore::new(config.session.clone());
        let checker = ProxyAccessChecker::new(&config.gate)?;
        let upstream = AuthorizationClient::new(&config.upstream, &config.gate)?;

        Ok(Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            checker: Arc::new(checker),
            upstream: Arc::new(upstream),
        })
    }
}

pub fn router(state: AppState) -> Router {
    let base_path = state.config.gate.base_path.clone();
    let security = state.config.security.clone();
    let request_logging = state.config.server.enable_request_logging;

    let app = Router::new()
        .route("/login", get(pages::login_page))
        .route("/api/health", get(health::health))
        .route(CHECK_ACCESS_ROUTE, post(auth::check_access))
        .route("/api/auth/session", get(auth::session_get))
        .route("/api/auth/logout", post(auth::logout))
        .fallback(pages::page_shell)
        .layer(from_fn_with_state(state.clone(), access_gate))
        .with_state(state);

    let app = if base_path.is_empty() {
        app
    } else {
        Router::new().nest(&base_path, app)
    };

    let app = if request_logging {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    };

    if security.enable_cors {
        app.layer(cors_layer(&security))
    } else {
        app
    }
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    // A wildcard origin cannot be combined with credentials.
    if security.cors_origins.iter().any(|origin| origin == "*") {
        tracing::warn!("CORS allows any origin; credentialed cross-origin requests are disabled");
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(origins).allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn preflight() -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/health")
            .header(header::ORIGIN, "https://anywhere.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    }

    fn cors_state(origins: &[&str]) -> AppState {
        let mut config = AppConfig::development();
        config.security.enable_cors = true;
        config.security.cors_origins = origins.iter().map(|o| o.to_string()).collect();
        AppState::from_config(config).unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_cors_origin_allows_any_origin() {
        let response = router(cors_state(&["*"])).oneshot(preflight()).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[tokio::test]
    async fn test_listed_cors_origins_allow_credentials() {
        let response = router(cors_state(&["https://anywhere.example", "https://other.example"]))
            .oneshot(preflight())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "https://anywhere.example");
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
    }
}
