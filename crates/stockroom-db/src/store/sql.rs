//! SQL text for collection tables.
//!
//! Collection and field names end up inside SQL text, so they are checked
//! against a conservative identifier alphabet first. Filter values are
//! always bound.

use stockroom_core::{Filter, StoreError};

/// Check that `name` is usable as a collection or field name.
pub(super) fn identifier(name: &str) -> Result<&str, StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(StoreError::Storage(format!("Invalid identifier: {name:?}")))
    }
}

/// Expression extracting a top-level document field.
///
/// Index definitions and lookups must produce identical text for `SQLite`
/// to use the index.
pub(super) fn field_expr(field: &str) -> String {
    format!("json_extract(doc, '$.{field}')")
}

pub(super) fn create_collection(collection: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS "{collection}" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            doc TEXT NOT NULL CHECK (json_valid(doc))
        )"#
    )
}

/// Unique index that skips documents lacking the field.
pub(super) fn create_unique_sparse_index(collection: &str, field: &str) -> String {
    let expr = field_expr(field);
    format!(
        r#"CREATE UNIQUE INDEX IF NOT EXISTS "{collection}_{field}_unique"
            ON "{collection}" ({expr}) WHERE {expr} IS NOT NULL"#
    )
}

/// A `WHERE` clause for `filter` plus the value to bind, if any.
pub(super) fn where_clause(filter: &Filter) -> Result<(String, Option<&str>), StoreError> {
    match filter {
        Filter::All => Ok((String::new(), None)),
        Filter::FieldEquals { field, value } => {
            let expr = field_expr(identifier(field)?);
            Ok((format!("WHERE {expr} = ?"), Some(value.as_str())))
        }
    }
}

pub(super) fn select(collection: &str, clause: &str, limit_one: bool) -> String {
    let limit = if limit_one { " LIMIT 1" } else { "" };
    format!(r#"SELECT doc FROM "{collection}" {clause} ORDER BY id{limit}"#)
}

pub(super) fn insert(collection: &str) -> String {
    format!(r#"INSERT INTO "{collection}" (doc) VALUES (?)"#)
}

/// Replace the first matching document (the document value is bound first).
pub(super) fn replace_first(collection: &str, clause: &str) -> String {
    format!(
        r#"UPDATE "{collection}" SET doc = ?
            WHERE id = (SELECT id FROM "{collection}" {clause} ORDER BY id LIMIT 1)"#
    )
}

pub(super) fn delete_first(collection: &str, clause: &str) -> String {
    format!(
        r#"DELETE FROM "{collection}"
            WHERE id = (SELECT id FROM "{collection}" {clause} ORDER BY id LIMIT 1)"#
    )
}
