// ==============================
// tests/unit/middleware_tests.rs
// ==============================
//! Admin gate behaviour on a router of its own
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    middleware,
    routing::get,
    Extension, Router,
};
use backend_lib::{auth::Identity, middleware::admin_gate, AppState};

use crate::test_utils::{body_text, send, test_settings};

async fn whoami(Extension(identity): Extension<Identity>) -> String {
    identity.username
}

async fn public() -> &'static str {
    "Hello, World!"
}

fn gated_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(test_settings()).expect("Failed to create AppState for test"));
    let app = Router::new()
        .route("/admin/reports", get(whoami).post(whoami))
        .route("/api/admin/reports", get(whoami))
        .route("/careers", get(public))
        .layer(middleware::from_fn_with_state(state.clone(), admin_gate))
        .with_state(state.clone());
    (app, state)
}

fn request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

#[tokio::test]
async fn test_public_routes_pass_through() {
    let (app, _) = gated_app();
    let response = send(&app, request(Method::GET, "/careers").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello, World!");
}

#[tokio::test]
async fn test_page_navigation_is_redirected_to_login() {
    let (app, _) = gated_app();
    let response = send(
        &app,
        request(Method::GET, "/admin/reports")
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/admin/login");
}

#[tokio::test]
async fn test_non_page_requests_get_401() {
    let (app, _) = gated_app();

    let post = send(&app, request(Method::POST, "/admin/reports").body(Body::empty()).unwrap()).await;
    assert_eq!(post.status(), StatusCode::UNAUTHORIZED);

    let api = send(&app, request(Method::GET, "/api/admin/reports").body(Body::empty()).unwrap()).await;
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);

    let json_only = send(
        &app,
        request(Method::GET, "/admin/reports")
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(json_only.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_proof_reaches_handler_with_identity() {
    let (app, state) = gated_app();
    let proof = state.auth.issue(&Identity::admin("admin")).unwrap();

    let via_bearer = send(
        &app,
        request(Method::GET, "/api/admin/reports")
            .header(header::AUTHORIZATION, format!("Bearer {}", proof.token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(via_bearer.status(), StatusCode::OK);
    assert_eq!(body_text(via_bearer).await, "admin");

    let via_cookie = send(
        &app,
        request(Method::POST, "/admin/reports")
            .header(header::COOKIE, format!("careerflow_admin={}", proof.token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(via_cookie.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_proof_is_denied() {
    let (app, _) = gated_app();
    let response = send(
        &app,
        request(Method::GET, "/api/admin/reports")
            .header(header::AUTHORIZATION, "Bearer not-a-token")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
