//! Admin pages and admin API behind the gate.
//!
//! Pages are plain HTML shells; the dashboard UI itself is rendered elsewhere.
use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Json,
};
use careerflow_common::{SessionInfo, UserInfo};

use crate::auth::{authorize, Identity, SessionProof};
use crate::router::{DASHBOARD_PATH, LOGOUT_PATH};
use crate::AppState;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>CareerFlow Admin - Sign in</title></head>
<body>
<main>
<h1>CareerFlow Admin</h1>
<form id="login">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Sign in</button>
<p id="error" role="alert" hidden></p>
</form>
</main>
<script>
document.getElementById("login").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const response = await fetch("/admin/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ username: form.get("username"), password: form.get("password") }),
  });
  if (response.ok) {
    window.location.assign("/admin/dashboard");
    return;
  }
  const body = await response.json().catch(() => ({}));
  const error = document.getElementById("error");
  error.textContent = body.message || "Sign in failed";
  error.hidden = false;
});
</script>
</body>
</html>
"#;

/// `GET /admin/login`. An already authenticated admin goes straight to the dashboard.
pub async fn login_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if authorize(state.auth.as_ref(), &headers, &state.settings.cookie_name).is_ok() {
        return Redirect::temporary(DASHBOARD_PATH).into_response();
    }
    Html(LOGIN_PAGE).into_response()
}

/// `GET /admin`
pub async fn index() -> Redirect {
    Redirect::temporary(DASHBOARD_PATH)
}

/// `GET /admin/dashboard`
pub async fn dashboard(Extension(identity): Extension<Identity>) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>CareerFlow Admin - Dashboard</title></head>
<body>
<header>Signed in as <strong>{username}</strong>
<button type="button" onclick="fetch('{logout}', {{ method: 'POST' }}).then(() => window.location.assign('/admin/login'))">Sign out</button>
</header>
<main id="dashboard"></main>
</body>
</html>
"#,
        username = escape_html(&identity.username),
        logout = LOGOUT_PATH,
    ))
}

/// `GET /api/admin/session`
pub async fn session_info(Extension(proof): Extension<SessionProof>) -> Json<SessionInfo> {
    Json(SessionInfo {
        user: UserInfo::from(&proof.identity()),
        issued_at: proof.claims.iat,
        expires_at: proof.claims.exp,
    })
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
