// Cookie handling for the session cookie

use axum::http::{header, HeaderMap};
use cookie::{time::Duration, time::OffsetDateTime, Cookie, SameSite};

use crate::config::SessionConfig;

/// Extract the session token from the request's `Cookie` headers.
pub fn session_token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == cookie_name)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Build the `Set-Cookie` value carrying a freshly issued session token.
pub fn session_cookie(token: &str, config: &SessionConfig, secure: bool) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(config.expiry_hours as i64))
        .build()
}

/// An expired cookie that clears the session cookie.
pub fn logout_cookie(config: &SessionConfig, secure: bool) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; weam=abc.def.ghi; lang=en"));

        assert_eq!(session_token_from_headers(&headers, "weam").as_deref(), Some("abc.def.ghi"));
        assert_eq!(session_token_from_headers(&headers, "other"), None);
    }

    #[test]
    fn test_token_found_in_second_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("weam=tok"));

        assert_eq!(session_token_from_headers(&headers, "weam").as_deref(), Some("tok"));
    }

    #[test]
    fn test_empty_cookie_value_is_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("weam="));
        assert_eq!(session_token_from_headers(&headers, "weam"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = AppConfig::development().session;
        let cookie = session_cookie("token", &config, true);

        assert_eq!(cookie.name(), "weam");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_logout_cookie_expires_session() {
        let config = AppConfig::development().session;
        let cookie = logout_cookie(&config, false);

        assert_eq!(cookie.name(), "weam");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert!(cookie.to_string().contains("Max-Age=0"));
    }
}
