//! Core domain types, store ports and services for stockroom.
//!
//! This crate knows nothing about SQL or HTTP. Adapters (`stockroom-db`,
//! `stockroom-axum`) depend on it and plug their implementations into the
//! ports defined here.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::Article;
pub use ports::{Document, DocumentStore, Filter, ScopedHandle, StoreError};
pub use services::{ArticleError, ArticleService};
