#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use url::Url;

use weam_editor::access::{AccessCheckError, AccessChecker, AuthorizationClient};
use weam_editor::config::AppConfig;
use weam_editor::session::{JwtSessionStore, SessionUser};
use weam_editor::AppState;

pub const SERVICE_USER: &str = "svc-user";
pub const SERVICE_PASS: &str = "svc-pass";
// base64("svc-user:svc-pass")
pub const EXPECTED_BASIC_AUTH: &str = "Basic c3ZjLXVzZXI6c3ZjLXBhc3M=";
pub const UPSTREAM_PATH: &str = "/napi/v1/common/check-access-solution";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.upstream.basic_auth_username = SERVICE_USER.to_string();
    config.upstream.basic_auth_password = SERVICE_PASS.to_string();
    config.gate.check_timeout_secs = Some(5);
    config.security.enable_cors = false;
    config
}

pub fn user(id: Option<&str>, role: Option<&str>) -> SessionUser {
    SessionUser {
        id: id.map(str::to_string),
        email: Some("writer@example.com".to_string()),
        company_id: Some("company-1".to_string()),
        role_code: role.map(str::to_string),
    }
}

/// `Cookie` header value carrying a session for `user`.
pub fn session_cookie_header(config: &AppConfig, user: SessionUser) -> String {
    let token = JwtSessionStore::new(config.session.clone())
        .issue(user)
        .expect("sign session");
    format!("{}={}", config.session.cookie_name, token)
}

/// Scripted access checker that records every call.
pub struct StubChecker {
    outcome: Result<bool, AccessCheckError>,
    calls: AtomicUsize,
    last_call: Mutex<Option<(String, String, String)>>,
}

impl StubChecker {
    pub fn allowing(allowed: bool) -> Arc<Self> {
        Self::with_outcome(Ok(allowed))
    }

    pub fn failing(err: AccessCheckError) -> Arc<Self> {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<bool, AccessCheckError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (origin, user id, url path) of the most recent call.
    pub fn last_call(&self) -> Option<(String, String, String)> {
        self.last_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessChecker for StubChecker {
    async fn check_access(&self, origin: &Url, user_id: &str, url_path: &str) -> Result<bool, AccessCheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some((origin.to_string(), user_id.to_string(), url_path.to_string()));
        self.outcome.clone()
    }
}

/// App state with the real session store and a stub checker.
pub fn state_with_checker(config: AppConfig, checker: Arc<StubChecker>) -> AppState {
    AppState {
        sessions: Arc::new(JwtSessionStore::new(config.session.clone())),
        upstream: Arc::new(AuthorizationClient::new(&config.upstream, &config.gate).expect("client")),
        checker,
        config: Arc::new(config),
    }
}

/// App state wired exactly as in production.
pub fn production_state(config: AppConfig) -> AppState {
    AppState::from_config(config).expect("state")
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub authorization: Option<String>,
    pub body: Value,
}

type Responder = Arc<dyn Fn(&Value) -> (StatusCode, String) + Send + Sync>;

/// Stand-in for the external authorization service.
#[derive(Clone)]
pub struct MockUpstream {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    responder: Responder,
}

impl MockUpstream {
    pub fn new(responder: impl Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    /// Always answer with `status` and `body`.
    pub fn fixed(status: StatusCode, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| (status, body.clone()))
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn router(&self) -> Router {
        Router::new().route(UPSTREAM_PATH, post(mock_check_access)).with_state(self.clone())
    }
}

async fn mock_check_access(State(mock): State<MockUpstream>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let (status, text) = (mock.responder)(&body);
    mock.calls.lock().unwrap().push(RecordedCall { authorization, body });

    (status, [("content-type", "application/json")], text)
}

/// Serve `app` on a free local port and return its base URL.
pub async fn serve(app: Router) -> Result<String> {
    serve_on(free_port()?, app).await
}

pub fn free_port() -> Result<u16> {
    portpicker::pick_unused_port().context("failed to pick free port")
}

/// Serve `app` on `port` and return its base URL.
pub async fn serve_on(port: u16, app: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let base_url = format!("http://127.0.0.1:{}", port);
    wait_ready(&base_url).await?;
    Ok(base_url)
}

async fn wait_ready(base_url: &str) -> Result<()> {
    let client = reqwest::Client::new();
    for _ in 0..50 {
        if client.get(base_url).send().await.is_ok() {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    anyhow::bail!("server at {} did not become ready", base_url)
}

/// HTTP client that reports redirects instead of following them.
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}
