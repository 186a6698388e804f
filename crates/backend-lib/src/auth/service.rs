use super::{AuthError, Denied, Identity, SessionProof};
use crate::error::AppError;

/// Authentication operations the HTTP layer depends on
pub trait AuthService: Send + Sync {
    /// Check a username/password pair against the admin identity
    fn verify_credentials(&self, username: &str, password: &str) -> Result<Identity, AuthError>;
    /// Issue a signed session proof for an authenticated identity
    fn issue(&self, identity: &Identity) -> Result<SessionProof, AppError>;
    /// Validate a presented session token
    fn authenticate(&self, token: &str) -> Result<SessionProof, Denied>;
}
