//! Typed access on top of [`Store`]: serde in, serde out.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::models::{Resource, UserId};
use crate::database::store::{Document, Store, StoreError};

/// Serialize `value` into a row document. `None` fields marked
/// `skip_serializing_if` are left out, which is how partial updates are built.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Shape("document")),
    }
}

fn from_document<R: DeserializeOwned>(doc: Document) -> Result<R, StoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

pub async fn insert<R: Resource>(store: &dyn Store, row: Document) -> Result<R, StoreError> {
    let stored = store.insert(&R::TABLE, row).await?;
    from_document(stored)
}

pub async fn fetch<R: Resource>(store: &dyn Store, id: i32) -> Result<Option<R>, StoreError> {
    store.fetch(&R::TABLE, id).await?.map(from_document).transpose()
}

pub async fn find_by<R: Resource>(store: &dyn Store, column: &str, value: &str) -> Result<Option<R>, StoreError> {
    store
        .find_by(&R::TABLE, column, value)
        .await?
        .map(from_document)
        .transpose()
}

/// Every row, or with `party` only the rows whose owner columns name it.
pub async fn list<R: Resource>(store: &dyn Store, party: Option<UserId>) -> Result<Vec<R>, StoreError> {
    store
        .list(&R::TABLE, party)
        .await?
        .into_iter()
        .map(from_document)
        .collect()
}

pub async fn update<R: Resource>(store: &dyn Store, id: i32, changes: Document) -> Result<Option<R>, StoreError> {
    store
        .update(&R::TABLE, id, changes)
        .await?
        .map(from_document)
        .transpose()
}

pub async fn delete<R: Resource>(store: &dyn Store, id: i32) -> Result<bool, StoreError> {
    store.delete(&R::TABLE, id).await
}
