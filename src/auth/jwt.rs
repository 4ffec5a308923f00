//! Token issuance and verification
//!
//! Tokens are stateless: validity is computable from the token content, the
//! signing secret and the current time alone, so verification needs no
//! database lookup and no shared mutable state. There is no revocation;
//! rotating the signing secret invalidates every outstanding token.

use crate::{config::AppConfig, error::AppError, models::user::Role};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Time source for expiry checks. Injectable so tests can advance time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// What a token is good for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// Issued at login, presented on protected routes
    Access,
    /// Issued by forgot-password, consumed by reset-password
    Reset,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role claim
    pub role: Role,

    /// Token purpose
    pub purpose: TokenPurpose,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Subject parsed back to a user id
    pub fn subject_id(&self) -> Result<i32, TokenRejection> {
        self.sub.parse().map_err(|_| TokenRejection::Malformed)
    }
}

/// Why a token was rejected. The distinction is logged server-side but
/// collapsed to a single 403 at the gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("token expired")]
    Expired,

    #[error("signature mismatch")]
    Signature,

    #[error("token not decodable")]
    Malformed,

    #[error("token purpose mismatch")]
    WrongPurpose,
}

/// Issues and verifies signed bearer tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Create the service from configuration, using the system clock
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(config.security.jwt_secret.expose_secret(), Arc::new(SystemClock))
    }

    /// Create the service with an explicit clock
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        // HS256 needs a secret of at least 32 bytes
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            clock,
        })
    }

    /// Issue a signed token for `subject_id` with the given role, purpose
    /// and time-to-live
    pub fn issue(
        &self,
        subject_id: i32,
        role: Role,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = self.clock.now();
        let expiration = now + ttl;

        let claims = Claims {
            sub: subject_id.to_string(),
            role,
            purpose,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// Expiry is checked against the injected clock rather than by the JWT
    /// library, so `now >= exp` rejects exactly.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenRejection::Signature,
                _ => TokenRejection::Malformed,
            })?
            .claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }

    /// Verify an access token specifically
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenRejection> {
        let claims = self.verify(token)?;

        if claims.purpose != TokenPurpose::Access {
            tracing::debug!("Token purpose mismatch: expected 'access'");
            return Err(TokenRejection::WrongPurpose);
        }

        Ok(claims)
    }

    /// Verify a password-reset token specifically
    pub fn verify_reset(&self, token: &str) -> Result<Claims, TokenRejection> {
        let claims = self.verify(token)?;

        if claims.purpose != TokenPurpose::Reset {
            tracing::debug!("Token purpose mismatch: expected 'reset'");
            return Err(TokenRejection::WrongPurpose);
        }

        Ok(claims)
    }
}
