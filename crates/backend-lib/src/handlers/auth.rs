// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Login, logout and session verification endpoints.
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use careerflow_common::{LoginRequest, LoginResponse, LogoutResponse, UserInfo, VerifyResponse};
use metrics::counter;

use crate::auth::{authorize, cookie, AuthError};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILURE, LOGIN_SUCCESS, LOGOUT};
use crate::AppState;

/// `POST /admin/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected login body");
        AppError::InvalidInput("Invalid request body".to_string())
    })?;
    request
        .validate()
        .map_err(|msg| AppError::InvalidInput(msg.to_string()))?;

    // scrypt is deliberately slow; keep it off the async workers.
    let auth = state.auth.clone();
    let username = request.username.clone();
    let verified = tokio::task::spawn_blocking(move || {
        auth.verify_credentials(&request.username, &request.password)
    })
    .await
    .map_err(|e| AppError::Internal(format!("credential check failed to run: {e}")))?;

    let identity = match verified {
        Ok(identity) => identity,
        Err(err) => {
            counter!(LOGIN_FAILURE).increment(1);
            if err == AuthError::InvalidCredentials {
                tracing::warn!(username = %username, "Admin login failed");
            }
            return Err(err.into());
        },
    };

    let proof = state.auth.issue(&identity)?;
    counter!(LOGIN_SUCCESS).increment(1);
    tracing::info!(
        username = %identity.username,
        sid = %proof.claims.sid,
        expires_at = %proof.expires_at(),
        "Admin logged in"
    );

    let jar = cookie::attach(jar, &proof, &state.settings);
    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            user: UserInfo::from(&identity),
        }),
    ))
}

/// `POST /admin/logout`
///
/// Always succeeds and always clears the cookie.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    match authorize(state.auth.as_ref(), &headers, &state.settings.cookie_name) {
        Ok(proof) => {
            tracing::info!(username = %proof.claims.sub, sid = %proof.claims.sid, "Admin logged out");
        },
        Err(_) => tracing::debug!("Logout without an active session"),
    }
    counter!(LOGOUT).increment(1);

    (
        cookie::destroy(jar, &state.settings),
        Json(LogoutResponse { success: true }),
    )
}

/// `GET /admin/verify`
pub async fn verify(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match authorize(state.auth.as_ref(), &headers, &state.settings.cookie_name) {
        Ok(proof) => {
            let user = UserInfo::from(&proof.identity());
            (StatusCode::OK, Json(VerifyResponse::authenticated(user))).into_response()
        },
        Err(_) => (StatusCode::UNAUTHORIZED, Json(VerifyResponse::anonymous())).into_response(),
    }
}
