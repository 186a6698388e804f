//! Route protection for everything under `/admin` and `/api/admin`.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::ACCEPT, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use metrics::counter;

use crate::auth::authorize;
use crate::error::AppError;
use crate::metrics::GATE_DENIED;
use crate::router::{LOGIN_PATH, LOGOUT_PATH, VERIFY_PATH};
use crate::AppState;

const PROTECTED_PREFIXES: [&str; 2] = ["/admin", "/api/admin"];

/// Endpoints that make up the login surface; they handle a missing session themselves
const PUBLIC_PATHS: [&str; 3] = [LOGIN_PATH, LOGOUT_PATH, VERIFY_PATH];

/// Whether `path` sits behind the admin gate
pub fn is_protected(path: &str) -> bool {
    let trimmed = path.trim_end_matches('/');
    let under_admin = PROTECTED_PREFIXES.iter().any(|prefix| {
        trimmed == *prefix
            || trimmed
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    });
    under_admin && !PUBLIC_PATHS.contains(&trimmed)
}

/// Page navigations get redirected to the login page; everything else gets a 401
fn is_page_request(request: &Request) -> bool {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return false;
    }
    if request.uri().path().starts_with("/api/") {
        return false;
    }
    let accept = request
        .headers()
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    !(accept.contains("application/json") && !accept.contains("text/html"))
}

/// Gate middleware.
///
/// On success the session proof and its identity are stored in the request
/// extensions for handlers to read.
pub async fn admin_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    match authorize(state.auth.as_ref(), request.headers(), &state.settings.cookie_name) {
        Ok(proof) => {
            tracing::trace!(sid = %proof.claims.sid, path = %request.uri().path(), "Admin gate passed");
            request.extensions_mut().insert(proof.identity());
            request.extensions_mut().insert(proof);
            next.run(request).await
        },
        Err(denied) => {
            counter!(GATE_DENIED).increment(1);
            tracing::debug!(path = %request.uri().path(), reason = %denied, "Admin gate denied request");
            if is_page_request(&request) {
                Redirect::temporary(LOGIN_PATH).into_response()
            } else {
                AppError::Unauthorized(denied).into_response()
            }
        },
    }
}
