//! The caller's own account: `/users`

use axum::{
    extract::{Extension, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::models::{normalize_email, AuthUser};
use crate::auth::ownership::load_owned;
use crate::database::models::{Profile, Resource, User};
use crate::database::repository::{self, to_document};
use crate::error::{ApiError, ApiJson};
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub age: Option<Option<i32>>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Profile>, ApiError> {
    let account = load_owned::<User>(state.store.as_ref(), user.id, user.id).await?;
    Ok(Json(account.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(mut changes): ApiJson<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let store = state.store.as_ref();
    load_owned::<User>(store, user.id, user.id).await?;

    changes.email = changes.email.as_deref().map(normalize_email);
    let blank = |field: &Option<String>| field.as_deref().is_some_and(|v| v.trim().is_empty());
    if blank(&changes.name) || blank(&changes.email) {
        return Err(ApiError::bad_request("Nombre y email no pueden estar vacíos"));
    }

    let account = repository::update::<User>(store, user.id, to_document(&changes)?)
        .await?
        .ok_or(ApiError::not_found(User::NOT_FOUND))?;
    Ok(Json(account.into()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    if !repository::delete::<User>(state.store.as_ref(), user.id).await? {
        return Err(ApiError::not_found(User::NOT_FOUND));
    }
    tracing::info!("User {} deleted their account", user.id);
    Ok(Json(json!({ "message": User::DELETED })))
}

pub fn create_user_routes() -> Router<AppState> {
    Router::new().route("/users", get(me).put(update_me).delete(delete_me))
}
