//! JWT Token Handler
//! Mission: Issue and verify signed bearer tokens

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;

/// Why a token failed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Not a parseable JWT (bad segments, bad base64, bad JSON).
    Malformed,
    /// Signature or algorithm does not match the configured secret.
    InvalidSignature,
    /// `exp` is in the past. Only possible when a TTL is configured.
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "Malformed token"),
            TokenError::InvalidSignature => write!(f, "Invalid token signature"),
            TokenError::Expired => write!(f, "Token expired"),
        }
    }
}

impl std::error::Error for TokenError {}

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    expiration_hours: Option<i64>,
}

impl JwtHandler {
    /// Create a handler whose tokens never expire
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: None,
        }
    }

    /// Stamp an `exp` claim `hours` after issue and enforce it on verify
    pub fn with_expiration_hours(mut self, hours: i64) -> Self {
        self.expiration_hours = Some(hours);
        self
    }

    /// Issue a token with the username as subject
    pub fn issue(&self, username: &str) -> Result<String> {
        let exp = match self.expiration_hours {
            Some(hours) => {
                let ttl = chrono::Duration::try_hours(hours).context("Token TTL out of range")?;
                Some(
                    Utc::now()
                        .checked_add_signed(ttl)
                        .context("Invalid timestamp")?
                        .timestamp() as usize,
                )
            }
            None => None,
        };

        let claims = Claims {
            sub: username.to_string(),
            exp,
        };

        debug!(
            "Generating JWT for {}, expiry: {:?}h",
            username, self.expiration_hours
        );

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Verify signature (and expiry, when configured) and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &self.validation(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

        debug!("Validated JWT for {}", decoded.claims.sub);

        Ok(decoded.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        if self.expiration_hours.is_none() {
            validation.required_spec_claims.clear();
            validation.validate_exp = false;
        }
        validation
    }
}
