// ==================================
// tests/integration/auth_flow_tests.rs
// ==================================
//! End-to-end admin authentication flows through the full router
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use backend_lib::auth::{Identity, TokenIssuer, SESSION_TTL};
use chrono::{Duration, Utc};

use crate::test_utils::{
    body_json, body_text, json_post, login_request, send, set_cookies, setup_test_app,
    setup_unconfigured_app, ClientCookies, ADMIN_PASSWORD, ADMIN_USERNAME, COOKIE_NAME, SESSION_SECRET,
};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup_test_app();
    let response = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_login_verify_logout_flow() {
    let (app, _) = setup_test_app();
    let mut cookies = ClientCookies::default();

    // Login
    let response = send(&app, login_request(ADMIN_USERNAME, ADMIN_PASSWORD)).await;
    assert_eq!(response.status(), StatusCode::OK);
    cookies.store(&response);
    assert!(cookies.get(COOKIE_NAME).is_some());

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);
    assert_eq!(body["user"]["role"], "admin");

    // Verify with the cookie
    let response = send(&app, cookies.get_request("/admin/verify")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);

    // Dashboard is reachable
    let response = send(&app, cookies.get_request("/admin/dashboard")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(ADMIN_USERNAME));

    // Logout clears the cookie
    let response = send(&app, cookies.post_request("/admin/logout")).await;
    assert_eq!(response.status(), StatusCode::OK);
    cookies.store(&response);
    assert!(cookies.get(COOKIE_NAME).is_none());
    assert_eq!(body_json(response).await["success"], true);

    // Verify now reports no session
    let response = send(&app, cookies.get_request("/admin/verify")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["authenticated"], false);
    assert!(body["user"].is_null());

    // And the gate sends page navigations back to the login page
    let response = send(&app, cookies.get_request("/admin/dashboard")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/admin/login");
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let (app, _) = setup_test_app();
    let response = send(&app, login_request(ADMIN_USERNAME, ADMIN_PASSWORD)).await;
    let headers = set_cookies(&response);

    assert_eq!(headers.len(), 1);
    let cookie = &headers[0];
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}=")));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains(&format!("Max-Age={}", SESSION_TTL.as_secs())));
}

#[tokio::test]
async fn test_wrong_credentials_are_indistinguishable() {
    let (app, _) = setup_test_app();

    let wrong_password = send(&app, login_request(ADMIN_USERNAME, "not-the-password")).await;
    let wrong_username = send(&app, login_request("root", ADMIN_PASSWORD)).await;

    for response in [&wrong_password, &wrong_username] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(response).is_empty());
    }

    let a = body_json(wrong_password).await;
    let b = body_json(wrong_username).await;
    assert_eq!(a, b);
    assert_eq!(a["success"], false);
    assert_eq!(a["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_unconfigured_admin_looks_like_bad_credentials() {
    let (app, _) = setup_test_app();
    let unconfigured = setup_unconfigured_app();

    let wrong_password = send(&app, login_request(ADMIN_USERNAME, "not-the-password")).await;
    let no_password = send(&unconfigured, login_request(ADMIN_USERNAME, ADMIN_PASSWORD)).await;

    assert_eq!(no_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(no_password.status(), wrong_password.status());
    assert!(set_cookies(&no_password).is_empty());
    assert_eq!(body_json(no_password).await, body_json(wrong_password).await);
}

#[tokio::test]
async fn test_login_rejects_incomplete_bodies() {
    let (app, _) = setup_test_app();

    for body in [
        r#"{"username":"admin"}"#,
        r#"{"password":"x"}"#,
        r#"{"username":"","password":""}"#,
        r#"{}"#,
        "not json",
    ] {
        let response = send(&app, json_post("/admin/login", body.to_string())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");
        assert!(set_cookies(&response).is_empty());
        assert_eq!(body_json(response).await["success"], false);
    }
}

#[tokio::test]
async fn test_unauthenticated_access() {
    let (app, _) = setup_test_app();

    let dashboard = send(&app, Request::get("/admin/dashboard").body(Body::empty()).unwrap()).await;
    assert_eq!(dashboard.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(dashboard.headers()[header::LOCATION], "/admin/login");

    let index = send(&app, Request::get("/admin").body(Body::empty()).unwrap()).await;
    assert_eq!(index.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(index.headers()[header::LOCATION], "/admin/login");

    let api = send(&app, Request::get("/api/admin/session").body(Body::empty()).unwrap()).await;
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(api).await;
    assert_eq!(body["message"], "Unauthorized");

    // The login page itself stays reachable
    let login_page = send(&app, Request::get("/admin/login").body(Body::empty()).unwrap()).await;
    assert_eq!(login_page.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_page_redirects_when_signed_in() {
    let (app, _) = setup_test_app();
    let mut cookies = ClientCookies::default();
    cookies.store(&send(&app, login_request(ADMIN_USERNAME, ADMIN_PASSWORD)).await);

    let response = send(&app, cookies.get_request("/admin/login")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/admin/dashboard");
}

#[tokio::test]
async fn test_bearer_token_session_info() {
    let (app, state) = setup_test_app();
    let proof = state.auth.issue(&Identity::admin(ADMIN_USERNAME)).unwrap();

    let response = send(
        &app,
        Request::get("/api/admin/session")
            .header(header::AUTHORIZATION, format!("Bearer {}", proof.token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);
    assert_eq!(body["user"]["role"], "admin");
    let lifetime = body["expires_at"].as_i64().unwrap() - body["issued_at"].as_i64().unwrap();
    assert_eq!(lifetime, SESSION_TTL.as_secs() as i64);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let (app, _) = setup_test_app();
    let issuer = TokenIssuer::new(SESSION_SECRET, SESSION_TTL).unwrap();
    let stale = issuer
        .issue_at(&Identity::admin(ADMIN_USERNAME), Utc::now() - Duration::hours(25))
        .unwrap();

    let cookie = format!("{COOKIE_NAME}={}", stale.token);

    let verify = send(
        &app,
        Request::get("/admin/verify")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(verify.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(verify).await["authenticated"], false);

    let dashboard = send(
        &app,
        Request::get("/admin/dashboard")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(dashboard.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_forged_session_is_rejected() {
    let (app, _) = setup_test_app();
    let forger = TokenIssuer::new("a-different-secret-of-sufficient-length", SESSION_TTL).unwrap();
    let forged = forger.issue(&Identity::admin(ADMIN_USERNAME)).unwrap();

    let response = send(
        &app,
        Request::get("/api/admin/session")
            .header(header::COOKIE, format!("{COOKIE_NAME}={}", forged.token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_still_clears_cookie() {
    let (app, _) = setup_test_app();
    let response = send(&app, ClientCookies::default().post_request("/admin/logout")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = set_cookies(&response);
    assert_eq!(headers.len(), 1);
    assert!(headers[0].starts_with(&format!("{COOKIE_NAME}=;")));
    assert!(headers[0].contains("Max-Age=0"));
}

#[tokio::test]
async fn test_copied_token_outlives_logout() {
    // Sessions are stateless: logout clears the client's cookie but cannot
    // revoke a token that was copied elsewhere before it expires.
    let (app, _) = setup_test_app();
    let mut cookies = ClientCookies::default();
    cookies.store(&send(&app, login_request(ADMIN_USERNAME, ADMIN_PASSWORD)).await);
    let token = cookies.get(COOKIE_NAME).unwrap().to_string();

    let logout = send(&app, cookies.post_request("/admin/logout")).await;
    cookies.store(&logout);
    assert!(cookies.get(COOKIE_NAME).is_none());

    let response = send(
        &app,
        Request::get("/admin/verify")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
