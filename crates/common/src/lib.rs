// ================
// common/src/lib.rs
// ================
//! Wire types shared between the `CareerFlow` admin API and its clients.
//! Every request and response body of the admin authentication endpoints is
//! defined here so that handlers and tests agree on the JSON shape.

use serde::{Deserialize, Serialize};

/// Role carried by an authenticated principal.
///
/// There is a single admin identity, so `Admin` is the only role a valid
/// session can hold.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public view of an authenticated user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
}

/// Body of `POST /admin/login`
///
/// Missing fields deserialize as empty strings so that `validate` can report
/// them with the same message as blank ones.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Message returned when a field is missing or blank
    pub const MISSING_FIELDS: &'static str = "Username and password are required";

    /// Check the request shape before it reaches the credential verifier
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(Self::MISSING_FIELDS);
        }
        Ok(())
    }
}

// Manual impl so passwords never end up in logs.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
}

/// Logout response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Response of `GET /admin/verify`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerifyResponse {
    pub success: bool,
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

impl VerifyResponse {
    pub fn authenticated(user: UserInfo) -> Self {
        Self {
            success: true,
            authenticated: true,
            user: Some(user),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            success: false,
            authenticated: false,
            user: None,
        }
    }
}

/// Response of `GET /api/admin/session`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionInfo {
    pub user: UserInfo,
    /// Unix timestamp (seconds) when the session was issued
    pub issued_at: i64,
    /// Unix timestamp (seconds) after which the session is rejected
    pub expires_at: i64,
}

/// Uniform error body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
