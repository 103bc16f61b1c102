//! Storage Abstraction
//!
//! The handlers talk to storage through the [`Store`] trait so the Postgres pool
//! and the in-memory test store are interchangeable. Rows cross this boundary as
//! JSON documents; typing happens in [`crate::database::repository`].

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A single row, keyed by column name.
pub type Document = Map<String, Value>;

/// Static description of a table.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    /// Integer primary key, assigned by storage.
    pub key: &'static str,
    /// Columns written on insert and accepted on update. Never contains `key`.
    pub columns: &'static [&'static str],
    /// Columns holding the id of a user allowed to read or modify the row.
    /// A row matches a party filter when any of them equals the user id.
    pub owners: &'static [&'static str],
    /// Columns that must be unique across the table.
    pub unique: &'static [&'static str],
}

impl Table {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    /// Writable columns present in `changes`, in declaration order.
    pub fn changed_columns<'a>(&'a self, changes: &'a Document) -> impl Iterator<Item = &'static str> + 'a {
        self.columns
            .iter()
            .copied()
            .filter(move |column| changes.contains_key(*column))
    }
}

/// Errors raised by a [`Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to get a database connection: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("query failed: {0}")]
    Query(tokio_postgres::Error),

    /// Unique, foreign-key or not-null violation.
    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("failed to encode or decode a row: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("table {table} has no column {column}")]
    UnknownColumn { table: &'static str, column: String },

    #[error("unexpected row shape returned from {0}")]
    Shape(&'static str),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        use tokio_postgres::error::SqlState;

        let constraint = err.code().is_some_and(|code| {
            *code == SqlState::UNIQUE_VIOLATION
                || *code == SqlState::FOREIGN_KEY_VIOLATION
                || *code == SqlState::NOT_NULL_VIOLATION
        });
        if constraint {
            let message = err
                .as_db_error()
                .map(|db| db.message().to_string())
                .unwrap_or_else(|| err.to_string());
            return StoreError::Constraint(message);
        }
        StoreError::Query(err)
    }
}

/// Single-statement storage operations. Every method is one round trip.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert `row` and return it as stored, key included.
    async fn insert(&self, table: &Table, row: Document) -> Result<Document, StoreError>;

    async fn fetch(&self, table: &Table, id: i32) -> Result<Option<Document>, StoreError>;

    /// First row whose text `column` equals `value`.
    async fn find_by(&self, table: &Table, column: &str, value: &str) -> Result<Option<Document>, StoreError>;

    /// All rows ordered by key. With `party`, only rows where one of the
    /// table's owner columns equals it; a table without owner columns then
    /// yields nothing.
    async fn list(&self, table: &Table, party: Option<i32>) -> Result<Vec<Document>, StoreError>;

    /// Overwrite the writable columns present in `changes`. `None` when the
    /// row does not exist.
    async fn update(&self, table: &Table, id: i32, changes: Document) -> Result<Option<Document>, StoreError>;

    /// `true` when a row was removed.
    async fn delete(&self, table: &Table, id: i32) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
