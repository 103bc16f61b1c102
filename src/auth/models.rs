//! Authentication Models
//!
//! Data structures for authentication requests, responses, and the identity
//! bound to each request.

use serde::{Deserialize, Serialize};

use crate::database::models::UserId;

/// Authenticated user, inserted into request extensions by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
}

/// Signup request payload
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response after successful signup or login
#[derive(Debug, Serialize)]
pub struct TokenResponse<U> {
    pub token: String,
    pub user: U,
}

/// Canonical form used for both storing and looking up emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
