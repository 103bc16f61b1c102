//! # Database Module
//!
//! Storage for PsyCare: the [`Store`] seam, its PostgreSQL implementation
//! (tokio-postgres + deadpool), serde models and refinery migrations.

pub mod connection;
#[cfg(test)]
pub mod memory;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod store;

pub use connection::{DatabaseConfig, DatabaseConnection};
pub use store::{Document, Store, StoreError, Table};
