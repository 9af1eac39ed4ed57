//! `SQLite` document store adapter for stockroom.
//!
//! Collections are tables of JSON documents; field lookups and unique
//! indexes use `json_extract` expressions. The `SqlitePool` plays the part
//! of the long-lived store connection and a pooled connection is the
//! per-request scoped handle.

#![deny(unsafe_code)]

pub mod setup;
pub mod store;

// Re-export setup functions for convenient access
pub use setup::connect;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_store;

pub use store::{SqliteDocumentStore, SqliteScopedHandle};

use libsqlite3_sys as _;
