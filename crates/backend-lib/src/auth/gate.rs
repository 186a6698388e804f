//! Request gate: locate the session proof on a request and validate it.
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::CookieJar;

use super::{AuthService, Denied, SessionProof};

/// Find the session token on a request.
///
/// `Authorization: Bearer <token>` wins over the session cookie. A malformed
/// authorization header is ignored rather than treated as a token.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Authorize a request from its headers
pub fn authorize(
    auth: &dyn AuthService,
    headers: &HeaderMap,
    cookie_name: &str,
) -> Result<SessionProof, Denied> {
    let token = extract_token(headers, cookie_name).ok_or(Denied::NoToken)?;
    auth.authenticate(&token)
}
