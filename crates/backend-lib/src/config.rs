// ============================
// careerflow-backend-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Settings are layered with figment: built-in defaults, then an optional
//! TOML file, then `CAREERFLOW_`-prefixed environment variables. The result is
//! validated once at startup; an invalid configuration never reaches the
//! request path.
use std::net::SocketAddr;
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for environment overrides, e.g. `CAREERFLOW_SESSION_SECRET`
pub const ENV_PREFIX: &str = "CAREERFLOW_";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Minimum length of the signing secret
pub const MIN_SECRET_LENGTH: usize = 32;

/// Allowed range for the scrypt cost factor (`log_n`)
pub const HASH_COST_RANGE: std::ops::RangeInclusive<u8> = 1..=20;

/// String settings taken from the environment as-is. `Env` parses values, so
/// `0123456789` or `true` would otherwise arrive as a number or a bool.
const VERBATIM_ENV_KEYS: [&str; 6] = [
    "log_level",
    "admin_username",
    "admin_password",
    "admin_password_hash",
    "session_secret",
    "cookie_name",
];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Failed to hash admin password: {0}")]
    Hash(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application settings
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Username of the single admin identity
    pub admin_username: String,
    /// Plaintext admin password, hashed once at startup
    pub admin_password: String,
    /// Pre-computed scrypt hash; takes precedence over `admin_password`
    pub admin_password_hash: Option<String>,
    /// scrypt cost factor (`log_n`)
    pub hash_cost: u8,
    /// Secret used to sign session tokens
    pub session_secret: String,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,
    /// Name of the session cookie
    pub cookie_name: String,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            admin_username: "admin".to_string(),
            admin_password: String::new(),
            admin_password_hash: None,
            hash_cost: 15,
            session_secret: String::new(),
            session_ttl_secs: 60 * 60 * 24, // 24 hours
            cookie_name: "careerflow_admin".to_string(),
            cookie_secure: false,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"[REDACTED]")
            .field(
                "admin_password_hash",
                &self.admin_password_hash.as_ref().map(|_| "[REDACTED]"),
            )
            .field("hash_cost", &self.hash_cost)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("cookie_name", &self.cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Settings {
    /// Load settings from `config.toml` and the environment, then validate
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from the given TOML file and the environment, then validate.
    /// A missing file is not an error; the defaults and environment still apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Settings = Self::figment(path.as_ref()).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&VERBATIM_ENV_KEYS));

        for key in VERBATIM_ENV_KEYS {
            if let Ok(value) = std::env::var(format!("{ENV_PREFIX}{}", key.to_uppercase())) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    /// Reject configurations the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue(
                "log_level",
                format!("expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }

        if self.admin_username.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "admin_username",
                "cannot be empty".to_string(),
            ));
        }

        let has_hash = self
            .admin_password_hash
            .as_deref()
            .is_some_and(|h| !h.is_empty());
        if !has_hash && self.admin_password.is_empty() {
            return Err(ConfigError::InvalidValue(
                "admin_password",
                "an admin password or password hash must be configured".to_string(),
            ));
        }

        if !HASH_COST_RANGE.contains(&self.hash_cost) {
            return Err(ConfigError::InvalidValue(
                "hash_cost",
                format!(
                    "must be between {} and {}",
                    HASH_COST_RANGE.start(),
                    HASH_COST_RANGE.end()
                ),
            ));
        }

        if self.session_secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(ConfigError::InvalidValue(
                "session_secret",
                format!("must be at least {MIN_SECRET_LENGTH} characters"),
            ));
        }

        if self.session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "session_ttl_secs",
                "must be greater than zero".to_string(),
            ));
        }

        if self.cookie_name.is_empty()
            || !self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidValue(
                "cookie_name",
                "may only contain ASCII letters, digits, hyphens and underscores".to_string(),
            ));
        }

        Ok(())
    }
}
