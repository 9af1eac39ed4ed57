//! `SQLite` implementation of the `DocumentStore` and `ScopedHandle` ports.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};

use stockroom_core::{Document, DocumentStore, Filter, ScopedHandle, StoreError};

use super::sql;

/// `SQLite` implementation of the `DocumentStore` trait.
///
/// Holds the connection pool shared by every request. Cloning is cheap and
/// shares the same pool.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every connection. Outstanding scoped handles finish first.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target: "stockroom.store", "Document store closed");
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        let collection = sql::identifier(collection)?;
        let field = sql::identifier(field)?;

        sqlx::query(&sql::create_collection(collection))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        sqlx::query(&sql::create_unique_sparse_index(collection, field))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        tracing::info!(
            target: "stockroom.store",
            collection,
            field,
            "Unique sparse index ensured"
        );
        Ok(())
    }

    async fn scoped(&self) -> Result<Box<dyn ScopedHandle>, StoreError> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteScopedHandle { conn }))
    }
}

/// A pooled connection used by a single request.
///
/// Dropping the handle returns the connection to the pool.
pub struct SqliteScopedHandle {
    conn: PoolConnection<Sqlite>,
}

#[async_trait]
impl ScopedHandle for SqliteScopedHandle {
    async fn find(
        &mut self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let collection = sql::identifier(collection)?;
        let (clause, value) = sql::where_clause(filter)?;
        let query = sql::select(collection, &clause, false);

        let mut rows = sqlx::query_scalar::<_, String>(&query);
        if let Some(value) = value {
            rows = rows.bind(value);
        }
        let docs = rows
            .fetch_all(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        docs.iter().map(String::as_str).map(decode_document).collect()
    }

    async fn find_one(&mut self, collection: &str, filter: &Filter) -> Result<Document, StoreError> {
        let collection = sql::identifier(collection)?;
        let (clause, value) = sql::where_clause(filter)?;
        let query = sql::select(collection, &clause, true);

        let mut row = sqlx::query_scalar::<_, String>(&query);
        if let Some(value) = value {
            row = row.bind(value);
        }
        let doc = row
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| StoreError::NotFound(format!("{collection} {filter:?}")))?;

        decode_document(&doc)
    }

    async fn insert(&mut self, collection: &str, document: &Document) -> Result<(), StoreError> {
        let collection = sql::identifier(collection)?;
        let doc = encode_document(document)?;

        sqlx::query(&sql::insert(collection))
            .bind(doc)
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn replace_one(
        &mut self,
        collection: &str,
        filter: &Filter,
        document: &Document,
    ) -> Result<(), StoreError> {
        let collection = sql::identifier(collection)?;
        let (clause, value) = sql::where_clause(filter)?;
        let doc = encode_document(document)?;
        let query = sql::replace_first(collection, &clause);

        let mut update = sqlx::query(&query).bind(doc);
        if let Some(value) = value {
            update = update.bind(value);
        }
        let result = update
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("{collection} {filter:?}")));
        }
        Ok(())
    }

    async fn delete_one(&mut self, collection: &str, filter: &Filter) -> Result<(), StoreError> {
        let collection = sql::identifier(collection)?;
        let (clause, value) = sql::where_clause(filter)?;
        let query = sql::delete_first(collection, &clause);

        let mut delete = sqlx::query(&query);
        if let Some(value) = value {
            delete = delete.bind(value);
        }
        let result = delete
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("{collection} {filter:?}")));
        }
        Ok(())
    }
}

/// Map `SQLx` errors to `StoreError`.
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return StoreError::AlreadyExists(db_err.message().to_string());
        }
    }
    StoreError::Storage(e.to_string())
}

fn encode_document(document: &Document) -> Result<String, StoreError> {
    serde_json::to_string(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode_document(doc: &str) -> Result<Document, StoreError> {
    serde_json::from_str(doc).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::{connect, setup_test_store};
    use serde_json::json;

    const COLLECTION: &str = "articles";

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    async fn setup() -> SqliteDocumentStore {
        let store = setup_test_store().await.unwrap();
        store
            .ensure_unique_index(COLLECTION, "articulo")
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        handle
            .insert(COLLECTION, &doc(json!({"articulo": "A", "descrip": "first"})))
            .await
            .unwrap();
        handle
            .insert(COLLECTION, &doc(json!({"articulo": "B", "descrip": "second"})))
            .await
            .unwrap();

        let all = handle.find(COLLECTION, &Filter::All).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["articulo"], "A");
        assert_eq!(all[1]["articulo"], "B");

        let one = handle
            .find_one(COLLECTION, &Filter::eq("articulo", "B"))
            .await
            .unwrap();
        assert_eq!(one["descrip"], "second");
    }

    #[tokio::test]
    async fn test_find_one_missing() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        let result = handle
            .find_one(COLLECTION, &Filter::eq("articulo", "nope"))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        handle
            .insert(COLLECTION, &doc(json!({"articulo": "A"})))
            .await
            .unwrap();
        let result = handle
            .insert(COLLECTION, &doc(json!({"articulo": "A", "descrip": "dup"})))
            .await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));

        let all = handle.find(COLLECTION, &Filter::All).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_unique_index_is_sparse() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        handle
            .insert(COLLECTION, &doc(json!({"descrip": "no code"})))
            .await
            .unwrap();
        handle
            .insert(COLLECTION, &doc(json!({"descrip": "no code either"})))
            .await
            .unwrap();

        let all = handle.find(COLLECTION, &Filter::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_ensure_unique_index_is_idempotent() {
        let store = setup().await;
        store
            .ensure_unique_index(COLLECTION, "articulo")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ensure_unique_index_fails_on_existing_duplicates() {
        let store = setup_test_store().await.unwrap();
        store.ensure_unique_index(COLLECTION, "marca").await.unwrap();
        {
            let mut handle = store.scoped().await.unwrap();
            handle
                .insert(COLLECTION, &doc(json!({"articulo": "A", "marca": "acme"})))
                .await
                .unwrap();
            handle
                .insert(COLLECTION, &doc(json!({"articulo": "A", "marca": "zenith"})))
                .await
                .unwrap();
        }

        let result = store.ensure_unique_index(COLLECTION, "articulo").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_replace_one_is_full_replacement() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        handle
            .insert(
                COLLECTION,
                &doc(json!({"articulo": "A", "descrip": "old", "precio": "10"})),
            )
            .await
            .unwrap();
        handle
            .replace_one(
                COLLECTION,
                &Filter::eq("articulo", "A"),
                &doc(json!({"articulo": "A", "descrip": "new"})),
            )
            .await
            .unwrap();

        let one = handle
            .find_one(COLLECTION, &Filter::eq("articulo", "A"))
            .await
            .unwrap();
        assert_eq!(one, doc(json!({"articulo": "A", "descrip": "new"})));
    }

    #[tokio::test]
    async fn test_replace_one_missing() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        let result = handle
            .replace_one(
                COLLECTION,
                &Filter::eq("articulo", "A"),
                &doc(json!({"articulo": "A"})),
            )
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_replace_one_into_duplicate() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        handle
            .insert(COLLECTION, &doc(json!({"articulo": "A"})))
            .await
            .unwrap();
        handle
            .insert(COLLECTION, &doc(json!({"articulo": "B"})))
            .await
            .unwrap();

        let result = handle
            .replace_one(
                COLLECTION,
                &Filter::eq("articulo", "A"),
                &doc(json!({"articulo": "B"})),
            )
            .await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_delete_one() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        handle
            .insert(COLLECTION, &doc(json!({"articulo": "A"})))
            .await
            .unwrap();
        handle
            .delete_one(COLLECTION, &Filter::eq("articulo", "A"))
            .await
            .unwrap();

        let second = handle
            .delete_one(COLLECTION, &Filter::eq("articulo", "A"))
            .await;
        assert!(matches!(second, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_string_equality_is_strict() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        handle
            .insert(COLLECTION, &doc(json!({"articulo": "A", "rubro": 7})))
            .await
            .unwrap();

        let found = handle
            .find(COLLECTION, &Filter::eq("rubro", "7"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_collection_name() {
        let store = setup().await;
        let mut handle = store.scoped().await.unwrap();

        let result = handle.find("articles; --", &Filter::All).await;
        assert!(matches!(result, Err(StoreError::Storage(_))));
    }

    #[tokio::test]
    async fn test_handles_release_connection_on_drop() {
        // The test store has a single connection, so a second acquire only
        // succeeds once the first handle is gone.
        let store = setup().await;
        {
            let mut handle = store.scoped().await.unwrap();
            let _ = handle.find(COLLECTION, &Filter::All).await.unwrap();
        }
        let mut handle = store.scoped().await.unwrap();
        let all = handle.find(COLLECTION, &Filter::All).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_documents_survive_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let address = format!("sqlite://{}", dir.path().join("store.db").display());

        let store = connect(&address, 2).await.unwrap();
        store
            .ensure_unique_index(COLLECTION, "articulo")
            .await
            .unwrap();
        {
            let mut handle = store.scoped().await.unwrap();
            handle
                .insert(COLLECTION, &doc(json!({"articulo": "kept"})))
                .await
                .unwrap();
        }
        store.close().await;

        let reopened = connect(&address, 2).await.unwrap();
        reopened
            .ensure_unique_index(COLLECTION, "articulo")
            .await
            .unwrap();
        let mut handle = reopened.scoped().await.unwrap();
        let one = handle
            .find_one(COLLECTION, &Filter::eq("articulo", "kept"))
            .await
            .unwrap();
        assert_eq!(one["articulo"], "kept");
    }
}
