use crate::auth::{AuthError, AuthService, CredentialVerifier, Denied, Identity, SessionProof, TokenIssuer};
use crate::error::AppError;

pub struct DefaultAuth {
    verifier: CredentialVerifier,
    issuer: TokenIssuer,
}

impl DefaultAuth {
    pub fn new(verifier: CredentialVerifier, issuer: TokenIssuer) -> Self {
        Self { verifier, issuer }
    }
}

impl AuthService for DefaultAuth {
    fn verify_credentials(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        self.verifier.verify(username, password)
    }

    fn issue(&self, identity: &Identity) -> Result<SessionProof, AppError> {
        self.issuer.issue(identity)
    }

    fn authenticate(&self, token: &str) -> Result<SessionProof, Denied> {
        self.issuer.verify(token)
    }
}
