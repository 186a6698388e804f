//! Admin identity and credential verification.
use careerflow_common::{Role, UserInfo};
use subtle::ConstantTimeEq;

use super::password::{
    hash_password, is_valid_hash, validate_password_strength, verify_password,
    PasswordRequirements,
};
use super::AuthError;
use crate::config::{ConfigError, Settings};

/// Authenticated principal handed to downstream handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Admin,
        }
    }
}

impl From<&Identity> for UserInfo {
    fn from(identity: &Identity) -> Self {
        UserInfo {
            username: identity.username.clone(),
            role: identity.role,
        }
    }
}

/// The single configured admin principal.
///
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AdminIdentity {
    username: String,
    password_hash: Option<String>,
}

impl std::fmt::Debug for AdminIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminIdentity")
            .field("username", &self.username)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl AdminIdentity {
    /// Identity with an already computed scrypt hash
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: Some(password_hash.into()),
        }
    }

    /// Identity without a password; every login attempt fails as misconfigured
    pub fn unconfigured(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: None,
        }
    }

    /// Build the identity from settings, hashing the plaintext password if no
    /// pre-computed hash is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        if let Some(hash) = settings.admin_password_hash.as_deref().filter(|h| !h.is_empty()) {
            if !is_valid_hash(hash) {
                return Err(ConfigError::InvalidValue(
                    "admin_password_hash",
                    "not a valid scrypt PHC string".to_string(),
                ));
            }
            return Ok(Self::new(settings.admin_username.clone(), hash));
        }

        if settings.admin_password.is_empty() {
            tracing::error!("No admin password configured; admin login is disabled");
            return Ok(Self::unconfigured(settings.admin_username.clone()));
        }

        if !validate_password_strength(&settings.admin_password, &PasswordRequirements::default()) {
            tracing::warn!("Configured admin password does not meet the strength policy");
        }

        let hash = hash_password(&settings.admin_password, settings.hash_cost)
            .map_err(|e| ConfigError::Hash(e.to_string()))?;
        Ok(Self::new(settings.admin_username.clone(), hash))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Checks submitted credentials against the admin identity
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    admin: AdminIdentity,
}

impl CredentialVerifier {
    pub fn new(admin: AdminIdentity) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &AdminIdentity {
        &self.admin
    }

    /// Verify a username/password pair.
    ///
    /// Wrong username and wrong password produce the same error. Both checks
    /// always run so the response time does not reveal which one failed.
    pub fn verify(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let Some(hash) = self.admin.password_hash.as_deref() else {
            tracing::error!(
                username = %username,
                "Admin login attempted but no admin password is configured"
            );
            return Err(AuthError::MisconfiguredServer);
        };

        let username_ok: bool = username
            .as_bytes()
            .ct_eq(self.admin.username.as_bytes())
            .into();
        let password_ok = verify_password(hash, password);

        if username_ok && password_ok {
            Ok(Identity::admin(self.admin.username.clone()))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}
