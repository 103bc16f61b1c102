//! In-memory [`Store`] used by the test suite.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::database::store::{Document, Store, StoreError, Table};

#[derive(Default)]
struct Rows {
    last_id: i32,
    rows: BTreeMap<i32, Document>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Rows>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held for `table`.
    pub fn count(&self, table: &Table) -> usize {
        self.tables
            .read()
            .get(table.name)
            .map_or(0, |t| t.rows.len())
    }
}

fn is_party(table: &Table, doc: &Document, user_id: i32) -> bool {
    table
        .owners
        .iter()
        .any(|owner| doc.get(*owner).and_then(Value::as_i64) == Some(i64::from(user_id)))
}

fn check_unique(table: &Table, rows: &Rows, candidate: &Document, skip: Option<i32>) -> Result<(), StoreError> {
    for column in table.unique {
        let Some(value) = candidate.get(*column).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = rows
            .rows
            .iter()
            .any(|(id, row)| Some(*id) != skip && row.get(*column) == Some(value));
        if taken {
            return Err(StoreError::Constraint(format!(
                "duplicate key value violates unique constraint on {}.{}",
                table.name, column
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, table: &Table, row: Document) -> Result<Document, StoreError> {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.name).or_default();

        let mut stored = Document::new();
        for column in table.columns {
            stored.insert(column.to_string(), row.get(*column).cloned().unwrap_or(Value::Null));
        }
        check_unique(table, rows, &stored, None)?;

        rows.last_id += 1;
        let id = rows.last_id;
        stored.insert(table.key.to_string(), Value::from(id));
        rows.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn fetch(&self, table: &Table, id: i32) -> Result<Option<Document>, StoreError> {
        Ok(self
            .tables
            .read()
            .get(table.name)
            .and_then(|t| t.rows.get(&id).cloned()))
    }

    async fn find_by(&self, table: &Table, column: &str, value: &str) -> Result<Option<Document>, StoreError> {
        if !table.has_column(column) {
            return Err(StoreError::UnknownColumn {
                table: table.name,
                column: column.to_string(),
            });
        }
        Ok(self.tables.read().get(table.name).and_then(|t| {
            t.rows
                .values()
                .find(|row| row.get(column).and_then(Value::as_str) == Some(value))
                .cloned()
        }))
    }

    async fn list(&self, table: &Table, party: Option<i32>) -> Result<Vec<Document>, StoreError> {
        let tables = self.tables.read();
        let Some(rows) = tables.get(table.name) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .rows
            .values()
            .filter(|row| party.is_none_or(|user_id| is_party(table, row, user_id)))
            .cloned()
            .collect())
    }

    async fn update(&self, table: &Table, id: i32, changes: Document) -> Result<Option<Document>, StoreError> {
        let mut tables = self.tables.write();
        let Some(rows) = tables.get_mut(table.name) else {
            return Ok(None);
        };
        let Some(current) = rows.rows.get(&id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        for column in table.changed_columns(&changes) {
            updated.insert(column.to_string(), changes[column].clone());
        }
        check_unique(table, rows, &updated, Some(id))?;

        rows.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, table: &Table, id: i32) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .write()
            .get_mut(table.name)
            .is_some_and(|t| t.rows.remove(&id).is_some()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ACCOUNTS: Table = Table {
        name: "accounts",
        key: "account_id",
        columns: &["email", "owner_id", "backup_id"],
        owners: &["owner_id", "backup_id"],
        unique: &["email"],
    };

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_keys_and_drops_unknown_columns() {
        let store = MemoryStore::new();
        let first = store
            .insert(&ACCOUNTS, doc(json!({ "email": "a@x.com", "owner_id": 1, "account_id": 77, "extra": 1 })))
            .await
            .unwrap();
        let second = store
            .insert(&ACCOUNTS, doc(json!({ "email": "b@x.com", "owner_id": 2 })))
            .await
            .unwrap();

        assert_eq!(first["account_id"], json!(1));
        assert_eq!(second["account_id"], json!(2));
        assert!(!first.contains_key("extra"));
        assert_eq!(second["backup_id"], Value::Null);
    }

    #[tokio::test]
    async fn unique_columns_are_enforced_on_insert_and_update() {
        let store = MemoryStore::new();
        store.insert(&ACCOUNTS, doc(json!({ "email": "a@x.com" }))).await.unwrap();
        store.insert(&ACCOUNTS, doc(json!({ "email": "b@x.com" }))).await.unwrap();

        let dup = store.insert(&ACCOUNTS, doc(json!({ "email": "a@x.com" }))).await;
        assert!(matches!(dup, Err(StoreError::Constraint(_))));

        let clash = store.update(&ACCOUNTS, 2, doc(json!({ "email": "a@x.com" }))).await;
        assert!(matches!(clash, Err(StoreError::Constraint(_))));

        // Re-saving a row's own value is not a clash.
        let same = store.update(&ACCOUNTS, 1, doc(json!({ "email": "a@x.com" }))).await.unwrap();
        assert!(same.is_some());
        assert_eq!(store.count(&ACCOUNTS), 2);
    }

    #[tokio::test]
    async fn party_filter_matches_any_owner_column() {
        let store = MemoryStore::new();
        store.insert(&ACCOUNTS, doc(json!({ "email": "1", "owner_id": 5, "backup_id": 6 }))).await.unwrap();
        store.insert(&ACCOUNTS, doc(json!({ "email": "2", "owner_id": 6 }))).await.unwrap();
        store.insert(&ACCOUNTS, doc(json!({ "email": "3", "owner_id": 7 }))).await.unwrap();

        assert_eq!(store.list(&ACCOUNTS, Some(6)).await.unwrap().len(), 2);
        assert_eq!(store.list(&ACCOUNTS, Some(5)).await.unwrap().len(), 1);
        assert_eq!(store.list(&ACCOUNTS, Some(9)).await.unwrap().len(), 0);
        assert_eq!(store.list(&ACCOUNTS, None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_touches_only_supplied_columns() {
        let store = MemoryStore::new();
        store.insert(&ACCOUNTS, doc(json!({ "email": "a@x.com", "owner_id": 1 }))).await.unwrap();

        let updated = store
            .update(&ACCOUNTS, 1, doc(json!({ "backup_id": 3, "account_id": 99 })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["email"], json!("a@x.com"));
        assert_eq!(updated["backup_id"], json!(3));
        assert_eq!(updated["account_id"], json!(1));

        assert!(store.update(&ACCOUNTS, 42, Document::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_and_delete() {
        let store = MemoryStore::new();
        store.insert(&ACCOUNTS, doc(json!({ "email": "a@x.com" }))).await.unwrap();

        assert!(store.find_by(&ACCOUNTS, "email", "a@x.com").await.unwrap().is_some());
        assert!(store.find_by(&ACCOUNTS, "email", "z@x.com").await.unwrap().is_none());
        assert!(matches!(
            store.find_by(&ACCOUNTS, "password", "x").await,
            Err(StoreError::UnknownColumn { .. })
        ));

        assert!(store.delete(&ACCOUNTS, 1).await.unwrap());
        assert!(!store.delete(&ACCOUNTS, 1).await.unwrap());
        assert!(store.fetch(&ACCOUNTS, 1).await.unwrap().is_none());
    }
}
