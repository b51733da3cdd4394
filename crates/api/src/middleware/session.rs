//! Session token transport: `Authorization: Bearer` or the session cookie.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};

/// Name of the cookie carrying the access token.
pub const SESSION_COOKIE: &str = "internhub_session";

/// The access token of the request, if one was presented.
///
/// A bearer header wins over the cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value storing the access token for the browser session.
pub fn session_cookie(access_token: &str, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE}={access_token}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

/// `Set-Cookie` value expiring the session cookie.
pub fn cleared_session_cookie() -> HeaderValue {
    HeaderValue::from_static("internhub_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// The raw access token, without resolving it. Used where a missing or
/// stale session is not an error (sign-out).
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(session_token(&parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let map = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "internhub_session=from-cookie"),
        ]);
        assert_eq!(session_token(&map).as_deref(), Some("from-header"));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let map = headers(&[("cookie", "theme=dark; internhub_session=abc123; lang=en")]);
        assert_eq!(session_token(&map).as_deref(), Some("abc123"));
    }

    #[test]
    fn empty_values_mean_no_session() {
        let map = headers(&[("authorization", "Bearer "), ("cookie", "internhub_session=")]);
        assert_eq!(session_token(&map), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn cookie_flags() {
        let value = session_cookie("tok", true).unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("internhub_session=tok;"));
        assert!(text.contains("HttpOnly"));
        assert!(text.ends_with("Secure"));
    }
}
