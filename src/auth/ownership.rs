//! Resource ownership checks.
//!
//! Single-row operations load the row by key and compare its owner columns
//! with the authenticated subject. A row that exists but belongs to someone
//! else is reported exactly like a missing one.

use crate::database::models::{Resource, UserId};
use crate::database::{repository, Store};
use crate::error::ApiError;

/// Load row `id` if `subject` may modify it.
pub async fn load_owned<R: Resource>(store: &dyn Store, subject: UserId, id: i32) -> Result<R, ApiError> {
    match repository::fetch::<R>(store, id).await? {
        Some(row) if row.is_accessible_by(subject) => Ok(row),
        Some(_) => {
            tracing::debug!("{} {} is not accessible by user {}", R::TABLE.name, id, subject);
            Err(ApiError::not_found(R::NOT_FOUND))
        }
        None => Err(ApiError::not_found(R::NOT_FOUND)),
    }
}

/// Load row `id` if `subject` may read it.
pub async fn load_visible<R: Resource>(store: &dyn Store, subject: UserId, id: i32) -> Result<R, ApiError> {
    if R::SHARED_READS {
        return repository::fetch::<R>(store, id)
            .await?
            .ok_or(ApiError::not_found(R::NOT_FOUND));
    }
    load_owned(store, subject, id).await
}

/// Every row `subject` may read. Private tables are filtered in storage.
pub async fn list_visible<R: Resource>(store: &dyn Store, subject: UserId) -> Result<Vec<R>, ApiError> {
    let party = if R::SHARED_READS || R::TABLE.owners.is_empty() {
        None
    } else {
        Some(subject)
    };
    Ok(repository::list::<R>(store, party).await?)
}
