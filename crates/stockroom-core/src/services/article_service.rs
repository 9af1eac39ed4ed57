//! Article service - maps article requests onto document store operations.
//!
//! Every operation acquires its own scoped handle, issues exactly one store
//! operation and translates the typed store outcome into an [`ArticleError`].
//! Nothing is cached between calls.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::Article;
use crate::ports::{Document, DocumentStore, Filter, ScopedHandle, StoreError};

/// Errors surfaced by [`ArticleService`].
///
/// The display text of each variant is the message shown to API callers.
/// `Store` deliberately hides the underlying detail; it is logged instead.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// The request body is not a valid article document.
    #[error("Incorrect body")]
    MalformedBody(#[source] serde_json::Error),

    /// Another article already uses this code.
    #[error("Article with this code already exists")]
    AlreadyExists(String),

    /// No article with this code.
    #[error("Article not found")]
    NotFound(String),

    /// The store failed for reasons unrelated to the caller's input.
    #[error("Database error")]
    Store(#[source] StoreError),
}

/// Service for article operations.
///
/// Holds the store capability it was constructed with and the name of the
/// collection articles live in.
pub struct ArticleService {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ArticleService {
    /// Create a new article service over `collection` of the given store.
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Name of the collection this service reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Install the unique index on the article code.
    ///
    /// Must succeed before any request is served.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        self.store
            .ensure_unique_index(&self.collection, Article::CODE_FIELD)
            .await
    }

    /// List every article in insertion order.
    pub async fn list(&self) -> Result<Vec<Article>, ArticleError> {
        let mut handle = self.handle("list").await?;
        let documents = handle
            .find(&self.collection, &Filter::All)
            .await
            .map_err(|e| store_failure("list", e))?;

        decode_all(documents).map_err(|e| store_failure("list", e))
    }

    /// Get a single article by code.
    ///
    /// A matching document whose code is empty counts as not found.
    pub async fn get_by_code(&self, code: &str) -> Result<Article, ArticleError> {
        let mut handle = self.handle("get_by_code").await?;
        let document = match handle
            .find_one(&self.collection, &Filter::eq(Article::CODE_FIELD, code))
            .await
        {
            Ok(document) => document,
            Err(StoreError::NotFound(_)) => return Err(ArticleError::NotFound(code.to_string())),
            Err(e) => return Err(store_failure("get_by_code", e)),
        };

        let article = decode(document).map_err(|e| store_failure("get_by_code", e))?;
        if !article.has_code() {
            return Err(ArticleError::NotFound(code.to_string()));
        }
        Ok(article)
    }

    /// List the articles in a category. An unknown category yields an empty list.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Article>, ArticleError> {
        let mut handle = self.handle("list_by_category").await?;
        let documents = handle
            .find(
                &self.collection,
                &Filter::eq(Article::CATEGORY_FIELD, category),
            )
            .await
            .map_err(|e| store_failure("list_by_category", e))?;

        decode_all(documents).map_err(|e| store_failure("list_by_category", e))
    }

    /// Create an article from a JSON request body.
    ///
    /// Code collisions are detected by the store's unique index, not by a
    /// prior lookup. Returns the article as stored.
    pub async fn create(&self, body: &[u8]) -> Result<Article, ArticleError> {
        let article = parse_body(body)?;
        let document = encode(&article).map_err(|e| store_failure("create", e))?;

        let mut handle = self.handle("create").await?;
        match handle.insert(&self.collection, &document).await {
            Ok(()) => {
                tracing::debug!(target: "stockroom.articles", code = %article.code, "Article created");
                Ok(article)
            }
            Err(StoreError::AlreadyExists(_)) => Err(ArticleError::AlreadyExists(article.code)),
            Err(e) => Err(store_failure("create", e)),
        }
    }

    /// Replace the article stored under `code` with the request body.
    ///
    /// This is a full replacement: attributes missing from the body are
    /// removed from the stored document.
    pub async fn replace(&self, code: &str, body: &[u8]) -> Result<(), ArticleError> {
        let article = parse_body(body)?;
        let document = encode(&article).map_err(|e| store_failure("replace", e))?;

        let mut handle = self.handle("replace").await?;
        match handle
            .replace_one(
                &self.collection,
                &Filter::eq(Article::CODE_FIELD, code),
                &document,
            )
            .await
        {
            Ok(()) => {
                tracing::debug!(target: "stockroom.articles", code, "Article replaced");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => Err(ArticleError::NotFound(code.to_string())),
            Err(StoreError::AlreadyExists(_)) => Err(ArticleError::AlreadyExists(article.code)),
            Err(e) => Err(store_failure("replace", e)),
        }
    }

    /// Delete the article stored under `code`.
    pub async fn delete(&self, code: &str) -> Result<(), ArticleError> {
        let mut handle = self.handle("delete").await?;
        match handle
            .delete_one(&self.collection, &Filter::eq(Article::CODE_FIELD, code))
            .await
        {
            Ok(()) => {
                tracing::debug!(target: "stockroom.articles", code, "Article deleted");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => Err(ArticleError::NotFound(code.to_string())),
            Err(e) => Err(store_failure("delete", e)),
        }
    }

    async fn handle(&self, operation: &'static str) -> Result<Box<dyn ScopedHandle>, ArticleError> {
        self.store
            .scoped()
            .await
            .map_err(|e| store_failure(operation, e))
    }
}

/// Log a store failure and hide its detail behind `ArticleError::Store`.
fn store_failure(operation: &'static str, err: StoreError) -> ArticleError {
    tracing::error!(
        target: "stockroom.articles",
        operation,
        error = %err,
        "Store operation failed"
    );
    ArticleError::Store(err)
}

/// Parse a request body. Only a JSON object is an article; arrays would
/// otherwise bind positionally to the struct fields.
fn parse_body(body: &[u8]) -> Result<Article, ArticleError> {
    let document: Document = serde_json::from_slice(body).map_err(ArticleError::MalformedBody)?;
    serde_json::from_value(Value::Object(document)).map_err(ArticleError::MalformedBody)
}

fn encode(article: &Article) -> Result<Document, StoreError> {
    match serde_json::to_value(article) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(StoreError::Serialization(format!(
            "article encoded as non-object: {other}"
        ))),
        Err(e) => Err(StoreError::Serialization(e.to_string())),
    }
}

fn decode(document: Document) -> Result<Article, StoreError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode_all(documents: Vec<Document>) -> Result<Vec<Article>, StoreError> {
    documents.into_iter().map(decode).collect()
}
