//! Community forum: `/forum/index`, `/forum/entries`, `/forum/comments`,
//! `/forum/tags`
//!
//! Everything here is readable by any authenticated user. Entries and
//! comments can only be changed by their author, tags only by the author of
//! the tagged entry.

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
use crate::auth::ownership::{list_visible, load_owned, load_visible};
use crate::database::models::{ForumComment, ForumEntry, ForumIndex, ForumTag, Resource, UserId};
use crate::database::repository::{self, to_document};
use crate::database::Store;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::routes::crud::{self, Writable};
use crate::server::AppState;

// ============================================================================
// SECTIONS
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ForumIndexRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateForumIndexRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl Writable for ForumIndex {
    type Create = ForumIndexRequest;
    type Update = UpdateForumIndexRequest;

    fn assign_owner(_input: &mut Self::Create, _subject: UserId) {}
}

/// Sections have no owner, so one may only be removed once it holds no entries.
pub async fn delete_section(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.as_ref();
    load_owned::<ForumIndex>(store, user.id, id).await?;

    let entries = repository::list::<ForumEntry>(store, None).await?;
    if entries.iter().any(|entry| entry.index_id == id) {
        return Err(ApiError::bad_request("El índice de foro todavía tiene entradas"));
    }

    if !repository::delete::<ForumIndex>(store, id).await? {
        return Err(ApiError::not_found(ForumIndex::NOT_FOUND));
    }
    tracing::info!("User {} deleted forum section {}", user.id, id);
    Ok(Json(json!({ "message": ForumIndex::DELETED })))
}

// ============================================================================
// ENTRIES
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateForumEntryRequest {
    pub index_id: i32,
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub media_url: Option<String>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateForumEntryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub media_url: Option<Option<String>>,
}

impl Writable for ForumEntry {
    type Create = CreateForumEntryRequest;
    type Update = UpdateForumEntryRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.user_id = subject;
    }
}

// ============================================================================
// COMMENTS
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateForumCommentRequest {
    pub entry_id: i32,
    #[serde(skip_deserializing)]
    pub user_id: UserId,
    pub content: String,
    pub media_url: Option<String>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateForumCommentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "crate::routes::crud::nullable", skip_serializing_if = "Option::is_none")]
    pub media_url: Option<Option<String>>,
}

impl Writable for ForumComment {
    type Create = CreateForumCommentRequest;
    type Update = UpdateForumCommentRequest;

    fn assign_owner(input: &mut Self::Create, subject: UserId) {
        input.user_id = subject;
    }
}

// ============================================================================
// TAGS
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateForumTagRequest {
    pub entry_id: i32,
    pub tag: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateForumTagRequest {
    pub tag: String,
}

/// Tag `id`, provided `subject` wrote the entry it is attached to.
async fn load_tag_for_writing(store: &dyn Store, subject: UserId, id: i32) -> Result<ForumTag, ApiError> {
    let tag = load_visible::<ForumTag>(store, subject, id).await?;
    match load_owned::<ForumEntry>(store, subject, tag.entry_id).await {
        Ok(_) => Ok(tag),
        Err(ApiError::NotFound(_)) => Err(ApiError::not_found(ForumTag::NOT_FOUND)),
        Err(other) => Err(other),
    }
}

pub async fn list_tags(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ForumTag>>, ApiError> {
    Ok(Json(list_visible::<ForumTag>(state.store.as_ref(), user.id).await?))
}

pub async fn show_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ForumTag>, ApiError> {
    Ok(Json(load_visible::<ForumTag>(state.store.as_ref(), user.id, id).await?))
}

pub async fn create_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<CreateForumTagRequest>,
) -> Result<(StatusCode, Json<ForumTag>), ApiError> {
    let store = state.store.as_ref();
    load_owned::<ForumEntry>(store, user.id, input.entry_id).await?;

    let tag = repository::insert::<ForumTag>(store, to_document(&input)?).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn update_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<UpdateForumTagRequest>,
) -> Result<Json<ForumTag>, ApiError> {
    let store = state.store.as_ref();
    load_tag_for_writing(store, user.id, id).await?;

    let tag = repository::update::<ForumTag>(store, id, to_document(&changes)?)
        .await?
        .ok_or(ApiError::not_found(ForumTag::NOT_FOUND))?;
    Ok(Json(tag))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.as_ref();
    load_tag_for_writing(store, user.id, id).await?;

    if !repository::delete::<ForumTag>(store, id).await? {
        return Err(ApiError::not_found(ForumTag::NOT_FOUND));
    }
    Ok(Json(json!({ "message": ForumTag::DELETED })))
}

pub fn create_forum_routes() -> Router<AppState> {
    Router::new()
        .route("/forum/index", get(crud::list::<ForumIndex>).post(crud::create::<ForumIndex>))
        .route(
            "/forum/index/{id}",
            get(crud::show::<ForumIndex>)
                .put(crud::update::<ForumIndex>)
                .delete(delete_section),
        )
        .merge(crud::routes::<ForumEntry>("/forum/entries"))
        .merge(crud::routes::<ForumComment>("/forum/comments"))
        .route("/forum/tags", get(list_tags).post(create_tag))
        .route("/forum/tags/{id}", get(show_tag).put(update_tag).delete(delete_tag))
}
