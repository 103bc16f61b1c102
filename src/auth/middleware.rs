//! Authentication Middleware
//!
//! Axum middleware that turns the `Authorization: Bearer <token>` header into
//! an [`AuthUser`] request extension, or rejects the request with 401.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{jwt::JwtService, models::AuthUser};
use crate::error::ApiError;

/// No credential was presented.
pub const MISSING_TOKEN: &str = "Acceso no autorizado";
/// A credential was presented but failed verification.
pub const INVALID_TOKEN: &str = "Token inválido o expirado";

/// Authentication middleware that validates JWT tokens and injects user info
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Middleware function for validating JWT tokens
    pub async fn validate_token(
        State(jwt_service): State<Arc<JwtService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, ApiError> {
        let auth_user = Self::authorize(&jwt_service, req.headers())?;
        tracing::debug!("[AuthMiddleware] {} {} as user {}", req.method(), req.uri(), auth_user.id);

        // Insert the user into request extensions for downstream handlers
        req.extensions_mut().insert(auth_user);

        Ok(next.run(req).await)
    }

    /// Resolve the request headers to the authenticated user
    pub fn authorize(jwt_service: &JwtService, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
        let token = bearer_token(headers).ok_or_else(|| {
            tracing::warn!("[AuthMiddleware] Missing Authorization header");
            ApiError::Unauthorized(MISSING_TOKEN)
        })?;

        let claims = jwt_service.validate_token(token).map_err(|e| {
            tracing::warn!("[AuthMiddleware] JWT validation failed: {}", e);
            ApiError::Unauthorized(INVALID_TOKEN)
        })?;

        Ok(AuthUser { id: claims.id })
    }
}

/// Token from the Authorization header. A value without the `Bearer ` scheme
/// is taken as the raw token; an empty value counts as absent.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}
