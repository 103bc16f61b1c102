//! Generic handlers shared by every owned resource.
//!
//! A resource plugs in by implementing [`Writable`]; [`routes`] then mounts
//! list/create on its base path and show/update/delete on `<base>/{id}`.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::auth::models::AuthUser;
use crate::auth::ownership::{list_visible, load_owned, load_visible};
use crate::database::models::{Resource, UserId};
use crate::database::repository::{self, to_document};
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::server::AppState;

/// A resource clients may create and edit.
pub trait Writable: Resource {
    /// Create body. Owner and server-side timestamps are not deserialized.
    type Create: DeserializeOwned + Serialize + Send + 'static;

    /// Update body. Fields left out serialize to nothing and keep their value.
    type Update: DeserializeOwned + Serialize + Send + 'static;

    /// Status of a successful create.
    const CREATED: StatusCode = StatusCode::CREATED;

    /// Bind the new row to the authenticated subject.
    fn assign_owner(input: &mut Self::Create, subject: UserId);
}

/// Three-state update field for nullable columns: absent keeps the value,
/// `null` clears it. Pair with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub async fn list<R: Writable>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<R>>, ApiError> {
    let rows = list_visible::<R>(state.store.as_ref(), user.id).await?;
    Ok(Json(rows))
}

pub async fn show<R: Writable>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<R>, ApiError> {
    let row = load_visible::<R>(state.store.as_ref(), user.id, id).await?;
    Ok(Json(row))
}

pub async fn create<R: Writable>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(mut input): ApiJson<R::Create>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    R::assign_owner(&mut input, user.id);
    let row = repository::insert::<R>(state.store.as_ref(), to_document(&input)?).await?;

    tracing::info!("User {} created a row in {}", user.id, R::TABLE.name);
    Ok((R::CREATED, Json(row)))
}

pub async fn update<R: Writable>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<R::Update>,
) -> Result<Json<R>, ApiError> {
    let store = state.store.as_ref();
    load_owned::<R>(store, user.id, id).await?;

    let updated = repository::update::<R>(store, id, to_document(&changes)?)
        .await?
        .ok_or(ApiError::not_found(R::NOT_FOUND))?;
    Ok(Json(updated))
}

pub async fn destroy<R: Writable>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.as_ref();
    load_owned::<R>(store, user.id, id).await?;

    if !repository::delete::<R>(store, id).await? {
        return Err(ApiError::not_found(R::NOT_FOUND));
    }
    tracing::info!("User {} deleted {} {}", user.id, R::TABLE.name, id);
    Ok(Json(json!({ "message": R::DELETED })))
}

/// Standard collection routes for `R` mounted at `base`.
pub fn routes<R: Writable>(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(list::<R>).post(create::<R>))
        .route(&format!("{base}/{{id}}"), get(show::<R>).put(update::<R>).delete(destroy::<R>))
}
