// ============================
// careerflow-backend-lib/src/auth/session.rs
// ============================
//! Session proof issuance and validation.
//!
//! A session proof is an HS256 JWT carrying the admin username, role, issue
//! time, expiry and a random session id. Nothing is stored server side:
//! validity is decided entirely from the signature and the embedded times.
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use careerflow_common::Role;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use metrics::counter;
use serde::{Deserialize, Serialize};

use super::credentials::Identity;
use super::token_generator::generate_session_id;
use super::Denied;
use crate::config::{ConfigError, Settings, MIN_SECRET_LENGTH};
use crate::error::AppError;
use crate::metrics::SESSION_ISSUED;

/// Session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24); // 24 hours

/// Claims embedded in every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Admin username
    pub sub: String,
    /// Role string; anything other than `"admin"` is rejected
    pub role: String,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
    /// Random session id for log correlation
    pub sid: String,
}

/// A signed, time-limited proof of authentication
#[derive(Debug, Clone)]
pub struct SessionProof {
    pub token: String,
    pub claims: SessionClaims,
}

impl SessionProof {
    pub fn identity(&self) -> Identity {
        Identity::admin(self.claims.sub.clone())
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp(self.claims.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp(self.claims.exp)
    }
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Issues and validates session proofs
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish()
    }
}

impl TokenIssuer {
    /// Create an issuer. Secrets shorter than 32 characters are refused.
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, ConfigError> {
        if secret.chars().count() < MIN_SECRET_LENGTH {
            return Err(ConfigError::InvalidValue(
                "session_secret",
                format!("must be at least {MIN_SECRET_LENGTH} characters"),
            ));
        }
        if ttl.is_zero() {
            return Err(ConfigError::InvalidValue(
                "session_ttl_secs",
                "must be greater than zero".to_string(),
            ));
        }

        // Expiry is checked against an explicit clock in `verify_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(
            &settings.session_secret,
            Duration::from_secs(settings.session_ttl_secs),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a proof for `identity`, valid from now for the configured TTL
    pub fn issue(&self, identity: &Identity) -> Result<SessionProof, AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a proof as if the current time were `now`
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<SessionProof, AppError> {
        let iat = now.timestamp();
        let ttl_secs = i64::try_from(self.ttl.as_secs())
            .map_err(|_| AppError::Internal("session ttl out of range".to_string()))?;
        let claims = SessionClaims {
            sub: identity.username.clone(),
            role: identity.role.as_str().to_string(),
            iat,
            exp: iat.saturating_add(ttl_secs),
            sid: generate_session_id(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        counter!(SESSION_ISSUED).increment(1);

        Ok(SessionProof { token, claims })
    }

    /// Validate a token against the current time
    pub fn verify(&self, token: &str) -> Result<SessionProof, Denied> {
        self.verify_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// Valid iff the signature verifies, `iat <= now < exp` and the role is admin.
    /// Every failure is reported as the same denial.
    ///
    /// Claims carry whole seconds: the issue time and `now` are both truncated
    /// to the second, so a proof issued at T is valid over
    /// `[floor(T), floor(T) + ttl)` and may expire up to one second before
    /// `T + ttl`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionProof, Denied> {
        let claims = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                Denied::InvalidOrExpired
            })?
            .claims;

        let now = now.timestamp();
        if now < claims.iat || now >= claims.exp {
            tracing::debug!(sid = %claims.sid, "Session token outside its validity window");
            return Err(Denied::InvalidOrExpired);
        }

        if claims.role != Role::Admin.as_str() {
            tracing::debug!(sid = %claims.sid, role = %claims.role, "Session token carries a non-admin role");
            return Err(Denied::InvalidOrExpired);
        }

        Ok(SessionProof {
            token: token.to_string(),
            claims,
        })
    }
}
