//! Auth routes for registration and login

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::models::{normalize_email, LoginRequest, SignupRequest, TokenResponse};
use crate::auth::password::{hash_password, verify_password};
use crate::database::models::{Profile, Resource, User};
use crate::database::repository::{self, to_document};
use crate::error::{ApiError, ApiJson};
use crate::server::AppState;

/// Body of the 401 for a known email with the wrong password.
pub const WRONG_PASSWORD: &str = "Contraseña incorrecta";

#[derive(Serialize)]
struct NewUser<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    created_at: DateTime<Utc>,
}

/// Create an account and sign the new user in. The returned user carries the
/// stored password hash, never the plaintext.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<Json<TokenResponse<User>>, ApiError> {
    let email = normalize_email(&payload.email);
    if payload.name.trim().is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Nombre, email y contraseña son obligatorios"));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal(e.to_string())
    })?;

    let row = to_document(&NewUser {
        name: payload.name.trim(),
        email: &email,
        password: &password_hash,
        created_at: Utc::now(),
    })?;
    let user = repository::insert::<User>(state.store.as_ref(), row).await?;

    let token = state
        .jwt_service
        .create_token(user.user_id)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::info!("Registered user {}", user.user_id);
    Ok(Json(TokenResponse { token, user }))
}

/// Exchange email and password for a fresh token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse<Profile>>, ApiError> {
    let email = normalize_email(&payload.email);

    let user = repository::find_by::<User>(state.store.as_ref(), "email", &email)
        .await?
        .ok_or(ApiError::not_found(User::NOT_FOUND))?;

    let valid = verify_password(&payload.password, &user.password).map_err(|e| {
        tracing::error!("Stored hash for user {} is unreadable: {}", user.user_id, e);
        ApiError::internal(e.to_string())
    })?;
    if !valid {
        tracing::warn!("Wrong password for user {}", user.user_id);
        return Err(ApiError::Unauthorized(WRONG_PASSWORD));
    }

    let token = state
        .jwt_service
        .create_token(user.user_id)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(TokenResponse {
        token,
        user: user.into(),
    }))
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{send, TestApp};

    #[tokio::test]
    async fn signup_returns_token_and_hashed_user() {
        let app = TestApp::new();

        let (status, body) = send(&app, "POST", "/signup", None, Some(json!({
            "name": "A",
            "email": "a@x.com",
            "password": "p",
        })))
        .await;
        assert_eq!(status, StatusCode::OK);

        let user_id = body["user"]["user_id"].as_i64().unwrap() as i32;
        let claims = app.jwt_service.validate_token(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.id, user_id);

        let stored = body["user"]["password"].as_str().unwrap();
        assert_ne!(stored, "p");
        assert!(verify_password("p", stored).unwrap());
        assert_eq!(body["user"]["email"], json!("a@x.com"));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_bad_request() {
        let app = TestApp::new();
        let signup = json!({ "name": "A", "email": "a@x.com", "password": "p" });

        let (status, _) = send(&app, "POST", "/signup", None, Some(signup)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "POST", "/signup", None, Some(json!({
            "name": "B",
            "email": " A@X.com ",
            "password": "q",
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn login_outcomes() {
        let app = TestApp::new();
        send(&app, "POST", "/signup", None, Some(json!({ "name": "A", "email": "a@x.com", "password": "p" }))).await;

        let (status, body) = send(&app, "POST", "/login", None, Some(json!({ "email": "a@x.com", "password": "p" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());
        assert_eq!(body["user"]["email"], json!("a@x.com"));
        assert!(body["user"].get("password").is_none());

        let (status, body) = send(&app, "POST", "/login", None, Some(json!({ "email": "a@x.com", "password": "nope" }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": WRONG_PASSWORD }));

        let (status, body) = send(&app, "POST", "/login", None, Some(json!({ "email": "z@x.com", "password": "p" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Usuario no encontrado" }));
    }

    #[tokio::test]
    async fn login_token_opens_protected_routes() {
        let app = TestApp::new();
        send(&app, "POST", "/signup", None, Some(json!({ "name": "A", "email": "a@x.com", "password": "p" }))).await;
        let (_, body) = send(&app, "POST", "/login", None, Some(json!({ "email": "a@x.com", "password": "p" }))).await;
        let token = body["token"].as_str().unwrap();

        let (status, profile) = send(&app, "GET", "/users", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(profile["name"], json!("A"));
    }
}
