//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Store outcomes are typed (`StoreError`), never driver error values

pub mod document_store;

use thiserror::Error;

pub use document_store::{Document, DocumentStore, Filter, ScopedHandle};

#[cfg(test)]
pub use document_store::{MockDocumentStore, MockScopedHandle};

/// Domain-specific errors for document store operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and lets services match exhaustively on store outcomes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document matched the filter.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique index rejected the write.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (connection, query, schema).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
