//! JWT Token Service
//!
//! Issues and validates the bearer credential. The payload is the user id plus
//! the standard `iat`/`exp` pair; nothing is stored server-side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::UserId;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id the token was issued to
    pub id: UserId,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),
}

/// JWT Service for token operations
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with the provided secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // HS256, exp required and checked without grace period
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            ttl,
        }
    }

    /// Generate a token for a user, valid for the configured lifetime
    pub fn create_token(&self, user_id: UserId) -> Result<String, TokenError> {
        self.create_token_at(user_id, Utc::now())
    }

    /// Same as [`JwtService::create_token`] with an explicit issue time
    pub fn create_token_at(&self, user_id: UserId, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            id: user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Sign)
    }

    /// Verify signature and expiry, returning the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Rejected)
    }
}
