// HTTP API Error Types
//
// Every failure leaves the server as `{ "error": "<message>" }`.
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;

/// Generic body for anything that went wrong on our side.
pub const SERVER_ERROR: &str = "Error del servidor";

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400: malformed body or path, or a constraint the input violates.
    #[error("{0}")]
    BadRequest(String),

    /// 401: missing, invalid or expired credential, or wrong password.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// 404: the row does not exist or the caller may not see it. The two
    /// cases are deliberately indistinguishable.
    #[error("{0}")]
    NotFound(&'static str),

    /// Storage failure. Constraint violations become 400, everything else 500.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 500 raised outside storage (hashing, signing).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: &'static str) -> Self {
        ApiError::NotFound(message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Constraint(_)) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message. Internal details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Unauthorized(msg) | ApiError::NotFound(msg) => (*msg).to_string(),
            ApiError::Store(StoreError::Constraint(_)) => "Datos inválidos o duplicados".to_string(),
            ApiError::Store(_) | ApiError::Internal(_) => SERVER_ERROR.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else if let ApiError::Store(err) = &self {
            tracing::warn!("Rejected write: {}", err);
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Solicitud inválida: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Path rejected: {}", rejection.body_text());
        ApiError::bad_request("Identificador inválido")
    }
}

/// `axum::Json` whose rejection uses the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` whose rejection uses the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
