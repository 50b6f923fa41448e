// ABOUTME: Session token service issuing and verifying signed JWTs bound to a user email
// ABOUTME: HS256 signing with a secret injected at startup, detailed validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Tokens
//!
//! [`AuthManager`] is the only producer of bearer tokens. A token binds a
//! user's email and an expiry instant, signed with the process-wide secret
//! handed over once at startup. Verification is a pure computation: no
//! token state is stored anywhere.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use nutrition_core::constants::auth::TOKEN_AUDIENCE;
use nutrition_core::errors::{AppError, AppResult};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => write!(
                f,
                "JWT token expired {} ago at {}",
                humanize_duration(current_time.signed_duration_since(*expired_at)),
                expired_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match &error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { .. } => Self::auth_invalid(error.to_string()),
            JwtValidationError::TokenMalformed { .. } => Self::auth_malformed(error.to_string()),
        }
    }
}

/// `JWT` claims for a user session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User email, the bound identity
    pub sub: String,
    /// Issued at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// A freshly issued token with its expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Encoded bearer token
    pub token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Token service for issuing and verifying session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_lifetime: Duration,
}

impl AuthManager {
    /// Create a token service with a lifetime in hours
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self::with_lifetime(secret, Duration::hours(token_expiry_hours))
    }

    /// Create a token service with an explicit lifetime
    #[must_use]
    pub fn with_lifetime(secret: &[u8], token_lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_lifetime,
        }
    }

    /// Configured token lifetime
    #[must_use]
    pub const fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Issue a token bound to `identity`
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn issue(&self, identity: &str) -> AppResult<String> {
        self.issue_token(identity).map(|issued| issued.token)
    }

    /// Issue a token bound to `identity` and report its expiry
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn issue_token(&self, identity: &str) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.token_lifetime;

        let claims = Claims {
            sub: identity.to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: TOKEN_AUDIENCE.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token and return the identity it is bound to
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the signature does not match, the
    /// token is malformed, or the expiry is in the past
    pub fn verify(&self, token: &str) -> AppResult<String> {
        self.verify_detailed(token)
            .map(|claims| claims.sub)
            .map_err(AppError::from)
    }

    /// Verify a token with detailed error information
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] describing why the token was rejected
    pub fn verify_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;
        Self::validate_claims_expiry(&claims, Utc::now())?;

        tracing::debug!(user.email = %claims.sub, "Token verified");
        Ok(claims)
    }

    /// Decode claims checking signature and audience but not expiry
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_audience(&[TOKEN_AUDIENCE]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Reject claims whose expiry lies before `current_time`
    fn validate_claims_expiry(
        claims: &Claims,
        current_time: DateTime<Utc>,
    ) -> Result<(), JwtValidationError> {
        if current_time.timestamp() <= claims.exp {
            return Ok(());
        }

        let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
        tracing::warn!(
            user.email = %claims.sub,
            "Token expired {} ago at {}",
            humanize_duration(current_time.signed_duration_since(expired_at)),
            expired_at.to_rfc3339()
        );
        Err(JwtValidationError::TokenExpired {
            expired_at,
            current_time,
        })
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &JwtError) -> JwtValidationError {
        tracing::warn!("Token validation failed: {e}");

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Generate a random `JWT` secret
///
/// # Errors
///
/// Returns an error if the system RNG fails
pub fn generate_jwt_secret() -> AppResult<[u8; 64]> {
    let rng = SystemRandom::new();
    let mut secret = [0u8; 64];

    rng.fill(&mut secret).map_err(|e| {
        tracing::error!("Failed to generate signing secret: {e}");
        AppError::internal("System RNG failure - cannot generate signing secret")
    })?;

    Ok(secret)
}
