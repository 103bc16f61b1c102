//! Per-user preferences: `/user-settings`
//!
//! Each user has at most one settings row, addressed without an id.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::models::AuthUser;
use crate::database::models::{Resource, UserId, UserSettings};
use crate::database::repository::{self, to_document};
use crate::database::Store;
use crate::error::{ApiError, ApiJson};
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSettingsRequest {
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    pub notification_preferences: Option<Value>,
    pub privacy_settings: Option<Value>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub notification_preferences: Option<Option<Value>>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub privacy_settings: Option<Option<Value>>,
}

async fn own_settings(store: &dyn Store, subject: UserId) -> Result<UserSettings, ApiError> {
    repository::list::<UserSettings>(store, Some(subject))
        .await?
        .into_iter()
        .next()
        .ok_or(ApiError::not_found(UserSettings::NOT_FOUND))
}

pub async fn create_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(mut input): ApiJson<CreateSettingsRequest>,
) -> Result<(StatusCode, Json<UserSettings>), ApiError> {
    input.user_id = user.id;
    let settings = repository::insert::<UserSettings>(state.store.as_ref(), to_document(&input)?).await?;
    Ok((StatusCode::CREATED, Json(settings)))
}

pub async fn get_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserSettings>, ApiError> {
    Ok(Json(own_settings(state.store.as_ref(), user.id).await?))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(changes): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<UserSettings>, ApiError> {
    let store = state.store.as_ref();
    let current = own_settings(store, user.id).await?;

    let settings = repository::update::<UserSettings>(store, current.settings_id, to_document(&changes)?)
        .await?
        .ok_or(ApiError::not_found(UserSettings::NOT_FOUND))?;
    Ok(Json(settings))
}

pub async fn delete_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.as_ref();
    let current = own_settings(store, user.id).await?;

    if !repository::delete::<UserSettings>(store, current.settings_id).await? {
        return Err(ApiError::not_found(UserSettings::NOT_FOUND));
    }
    Ok(Json(json!({ "message": UserSettings::DELETED })))
}

pub fn create_settings_routes() -> Router<AppState> {
    Router::new().route(
        "/user-settings",
        get(get_settings)
            .post(create_settings)
            .put(update_settings)
            .delete(delete_settings),
    )
}
