use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub gate: GateConfig,
    pub upstream: UpstreamConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

/// Settings the page access gate reads on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Prefix for the router and for the internal check-access URL (`NEXT_PUBLIC_API_BASE_PATH`).
    pub base_path: String,
    /// Role code whose page views are delegated to the authorization service.
    pub constrained_role: String,
    pub login_path: String,
    /// Bound on each outbound access-check hop. `None` leaves the transport default.
    pub check_timeout_secs: Option<u64>,
    /// Origin the gate sends its check-access calls to (`GATE_INTERNAL_ORIGIN`).
    /// `None` means this server's own bind address.
    pub internal_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub basic_auth_username: String,
    #[serde(skip_serializing)]
    pub basic_auth_password: String,
    pub check_access_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    #[serde(skip_serializing)]
    pub secret: String,
    pub expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub require_https: bool,
}

pub const CHECK_ACCESS_ROUTE: &str = "/api/auth/check-access";

impl GateConfig {
    /// Path of the internal proxy route, including the base path.
    pub fn check_access_path(&self) -> String {
        format!("{}{}", self.base_path, CHECK_ACCESS_ROUTE)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("WEAM_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("WEAM_BIND_HOST") {
            self.server.bind_host = v;
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Gate overrides
        if let Ok(v) = env::var("NEXT_PUBLIC_API_BASE_PATH") {
            self.gate.base_path = normalize_base_path(&v);
        }
        if let Ok(v) = env::var("GATE_CONSTRAINED_ROLE") {
            self.gate.constrained_role = v;
        }
        if let Ok(v) = env::var("GATE_LOGIN_PATH") {
            self.gate.login_path = v;
        }
        if let Ok(v) = env::var("ACCESS_CHECK_TIMEOUT_SECS") {
            self.gate.check_timeout_secs = v.parse().ok();
        }
        if let Ok(v) = env::var("GATE_INTERNAL_ORIGIN") {
            let v = v.trim().trim_end_matches('/');
            self.gate.internal_origin = (!v.is_empty()).then(|| v.to_string());
        }

        // Upstream overrides
        if let Ok(v) = env::var("API_BASIC_AUTH_USERNAME") {
            self.upstream.basic_auth_username = v;
        }
        if let Ok(v) = env::var("API_BASIC_AUTH_PASSWORD") {
            self.upstream.basic_auth_password = v;
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            self.session.cookie_name = v;
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            self.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.session.expiry_hours = v.parse().unwrap_or(self.session.expiry_hours);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SECURITY_REQUIRE_HTTPS") {
            self.security.require_https = v.parse().unwrap_or(self.security.require_https);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_host: "0.0.0.0".to_string(),
                port: 3000,
                enable_request_logging: true,
            },
            gate: GateConfig::default(),
            upstream: UpstreamConfig::default(),
            session: SessionConfig {
                cookie_name: "weam".to_string(),
                secret: "development-session-secret".to_string(),
                expiry_hours: 24 * 7, // 1 week
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string()],
                require_https: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                bind_host: "0.0.0.0".to_string(),
                port: 3000,
                enable_request_logging: true,
            },
            gate: GateConfig::default(),
            upstream: UpstreamConfig::default(),
            session: SessionConfig {
                cookie_name: "weam".to_string(),
                secret: String::new(),
                expiry_hours: 24,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                require_https: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind_host: "0.0.0.0".to_string(),
                port: 3000,
                enable_request_logging: false,
            },
            gate: GateConfig::default(),
            upstream: UpstreamConfig::default(),
            session: SessionConfig {
                cookie_name: "weam".to_string(),
                secret: String::new(),
                expiry_hours: 24,
            },
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: vec!["https://app.example.com".to_string()],
                require_https: true,
            },
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            constrained_role: "USER".to_string(),
            login_path: "/login".to_string(),
            check_timeout_secs: None,
            internal_origin: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            basic_auth_username: String::new(),
            basic_auth_password: String::new(),
            check_access_path: "/napi/v1/common/check-access-solution".to_string(),
        }
    }
}

/// Base paths are stored with a leading slash and no trailing slash; `/` means none.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
