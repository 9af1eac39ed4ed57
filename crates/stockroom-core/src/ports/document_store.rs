//! Document store port.
//!
//! A document store keeps schemaless JSON documents in named collections
//! and can enforce uniqueness of a field through an index. Each request
//! works through its own [`ScopedHandle`], obtained from the shared
//! [`DocumentStore`] and released when dropped.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::StoreError;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Selects the documents an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every document in the collection.
    All,
    /// Documents whose top-level `field` is the string `value`.
    FieldEquals { field: String, value: String },
}

impl Filter {
    /// Shorthand for [`Filter::FieldEquals`].
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Long-lived, shared access to a document store.
///
/// Implementations own the underlying connection (or pool) and hand out
/// independent scoped handles. One instance is shared by every request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Install a unique, sparse index on `field` of `collection`.
    ///
    /// Idempotent. Documents lacking the field are exempt from the
    /// uniqueness check. Creates the collection if it does not exist.
    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError>;

    /// Acquire a handle for the lifetime of one request.
    ///
    /// The handle is released back to the store when dropped, on every
    /// exit path.
    async fn scoped(&self) -> Result<Box<dyn ScopedHandle>, StoreError>;
}

/// Per-request access to the store.
///
/// Methods take `&mut self` so in-flight state (cursors, statements) stays
/// private to the request that owns the handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScopedHandle: Send {
    /// Return all matching documents in insertion order.
    async fn find(&mut self, collection: &str, filter: &Filter)
    -> Result<Vec<Document>, StoreError>;

    /// Return the first matching document.
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing matches.
    async fn find_one(&mut self, collection: &str, filter: &Filter)
    -> Result<Document, StoreError>;

    /// Insert a new document.
    ///
    /// Returns `Err(StoreError::AlreadyExists)` on a unique index violation.
    async fn insert(&mut self, collection: &str, document: &Document) -> Result<(), StoreError>;

    /// Replace the first matching document with `document` in full.
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing matches and
    /// `Err(StoreError::AlreadyExists)` on a unique index violation.
    async fn replace_one(
        &mut self,
        collection: &str,
        filter: &Filter,
        document: &Document,
    ) -> Result<(), StoreError>;

    /// Remove the first matching document.
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing matches.
    async fn delete_one(&mut self, collection: &str, filter: &Filter) -> Result<(), StoreError>;
}
