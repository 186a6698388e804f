// ============================
// careerflow-backend-lib/src/lib.rs
// ============================
//! Core functionality for the `CareerFlow` admin authentication server.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;

use std::sync::Arc;

use crate::auth::{AdminIdentity, AuthService, CredentialVerifier, DefaultAuth, TokenIssuer};
use crate::config::{ConfigError, Settings};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Validated settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Build the state from settings.
    ///
    /// Validates the settings, hashes the admin password once and prepares the
    /// token issuer. Any error here must stop the process.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let admin = AdminIdentity::from_settings(&settings)?;
        let issuer = TokenIssuer::from_settings(&settings)?;
        let auth = Arc::new(DefaultAuth::new(CredentialVerifier::new(admin), issuer));

        Ok(Self::with_auth(settings, auth))
    }

    /// Build the state around an existing auth service
    pub fn with_auth(settings: Settings, auth: Arc<dyn AuthService>) -> Self {
        Self {
            auth,
            settings: Arc::new(settings),
        }
    }
}
