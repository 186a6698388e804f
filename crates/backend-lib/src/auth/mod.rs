// ============================
// careerflow-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod cookie;
pub mod credentials;
pub mod gate;
pub mod password;
pub mod session;
pub mod token_generator;
mod service;
mod service_impl;

use thiserror::Error;

pub use credentials::{AdminIdentity, CredentialVerifier, Identity};
pub use gate::{authorize, extract_token};
pub use password::{hash_password, verify_password, validate_password_strength, PasswordRequirements, MIN_PASSWORD_LENGTH};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use session::{SessionClaims, SessionProof, TokenIssuer, SESSION_TTL};

/// Credential check failures
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no admin password is configured")]
    MisconfiguredServer,
}

/// Request gate denial. Callers must not tell the two apart in responses.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    #[error("no session token")]
    NoToken,

    #[error("invalid or expired session token")]
    InvalidOrExpired,
}
