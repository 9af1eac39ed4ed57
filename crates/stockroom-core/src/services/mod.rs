//! Core services - the application's business logic layer.
//!
//! Services orchestrate between ports (trait interfaces) and domain types.
//! They don't know about concrete implementations.

mod article_service;

pub use article_service::{ArticleError, ArticleService};
