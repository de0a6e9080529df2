use axum::http::{header, HeaderMap};
use url::Url;

use super::AccessCheckError;
use crate::config::{GateConfig, ServerConfig};

const X_FORWARDED_HOST: &str = "x-forwarded-host";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme and host of the inbound request.
///
/// Prefers `x-forwarded-host` / `x-forwarded-proto` (first value of a
/// comma-separated list), falling back to `Host` and `default_scheme`.
pub fn request_origin(headers: &HeaderMap, default_scheme: &str) -> Result<Url, AccessCheckError> {
    let host = first_value(headers, X_FORWARDED_HOST)
        .or_else(|| first_value(headers, header::HOST.as_str()))
        .ok_or(AccessCheckError::MissingHost)?;
    let scheme = first_value(headers, X_FORWARDED_PROTO).unwrap_or(default_scheme);

    Url::parse(&format!("{}://{}", scheme, host)).map_err(|e| AccessCheckError::InvalidUrl(e.to_string()))
}

/// Origin the gate calls for its own access checks.
///
/// Taken from configuration only, never from request headers: the client
/// controls those. Without `internal_origin` this is the server's bind
/// address, with wildcard binds mapped to loopback.
pub fn internal_origin(server: &ServerConfig, gate: &GateConfig) -> Result<Url, AccessCheckError> {
    let raw = match &gate.internal_origin {
        Some(origin) => origin.clone(),
        None => {
            let host = match server.bind_host.as_str() {
                "" | "0.0.0.0" => "127.0.0.1",
                "::" | "[::]" => "[::1]",
                other => other,
            };
            format!("http://{}:{}", host, server.port)
        }
    };

    Url::parse(&raw).map_err(|e| AccessCheckError::InvalidUrl(e.to_string()))
}

/// `origin` with its path replaced by `path`.
pub fn endpoint_url(origin: &Url, path: &str) -> Result<Url, AccessCheckError> {
    origin.join(path).map_err(|e| AccessCheckError::InvalidUrl(e.to_string()))
}

fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
