// ============================
// careerflow-backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{admin, auth};
use crate::middleware::admin_gate;
use crate::AppState;

pub const LOGIN_PATH: &str = "/admin/login";
pub const LOGOUT_PATH: &str = "/admin/logout";
pub const VERIFY_PATH: &str = "/admin/verify";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(admin::health))
        .route(LOGIN_PATH, get(admin::login_page).post(auth::login))
        .route(LOGOUT_PATH, post(auth::logout))
        .route(VERIFY_PATH, get(auth::verify))
        .route("/admin", get(admin::index))
        .route(DASHBOARD_PATH, get(admin::dashboard))
        .route("/api/admin/session", get(admin::session_info))
        .layer(from_fn_with_state(state.clone(), admin_gate))
        .layer(TraceLayer::new_for_http())
        // Same-origin admin panel: no cross-origin access.
        .layer(CorsLayer::new())
        .with_state(state)
}
