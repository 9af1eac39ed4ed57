//! Document store implementation using `SQLite`.
//!
//! All SQL lives in this module. The `SqlitePool` never leaks through the
//! port trait signatures.

mod sql;
mod sqlite_document_store;

pub use sqlite_document_store::{SqliteDocumentStore, SqliteScopedHandle};
