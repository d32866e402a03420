//! Record store talking to PostgreSQL directly.
//!
//! Rows are exchanged as JSONB so the same [`Record`] shape works for every
//! collection without per-table queries.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::debug;

use hotel::Collection;

use super::{Filter, Query, Record, RecordStore, StoreError, column_from_message, project};

/// SQLSTATE undefined_column.
const UNDEFINED_COLUMN: &str = "42703";

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Columns present in any of the rows, in first-seen order.
fn column_list(records: &[Record]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for key in records.iter().flat_map(|record| record.keys()) {
        if !columns.contains(&key.as_str()) {
            columns.push(key);
        }
    }
    columns
}

fn insert_sql(collection: Collection, columns: &[&str]) -> String {
    let table = quote_ident(collection.as_str());
    let columns = columns
        .iter()
        .map(|column| quote_ident(column))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"
        WITH inserted AS (
            INSERT INTO {table} ({columns})
            SELECT {columns} FROM jsonb_populate_recordset(NULL::{table}, $1)
            RETURNING *
        )
        SELECT to_jsonb(inserted) FROM inserted ORDER BY id
        "#
    )
}

fn classify(collection: Collection, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNDEFINED_COLUMN) {
            if let Some(column) = column_from_message(db.message()) {
                return StoreError::UnknownColumn {
                    collection,
                    column: column.to_string(),
                };
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), StoreError> {
        let Filter::IdGreaterThan(floor) = filter;
        let sql = format!("DELETE FROM {} WHERE id > $1", quote_ident(collection.as_str()));
        let result = sqlx::query(&sql)
            .bind(floor.0)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(collection, e))?;
        debug!("Deleted {} rows from {}", result.rows_affected(), collection);
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, StoreError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        let sql = insert_sql(collection, &column_list(&records));
        let rows: Vec<Json<Record>> = sqlx::query_scalar(&sql)
            .bind(Json(&records))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify(collection, e))?;
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn select(&self, collection: Collection, query: &Query) -> Result<Vec<Record>, StoreError> {
        let table = quote_ident(collection.as_str());
        let order = if query.order_by_id { " ORDER BY t.id ASC" } else { "" };
        let sql = format!("SELECT to_jsonb(t) FROM {table} AS t{order}");
        let rows: Vec<Json<Record>> = sqlx::query_scalar(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify(collection, e))?;
        Ok(rows
            .iter()
            .map(|Json(row)| project(row, &query.columns))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::to_records;
    use serde_json::json;

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("nationalID"), "\"nationalID\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_column_list_unions_keys_in_order() {
        let records = to_records(&[
            json!({"fullName": "Ana", "email": "ana@example.com"}),
            json!({"fullName": "Bo", "nationalID": "123"}),
        ])
        .unwrap();
        let columns = column_list(&records);
        assert_eq!(columns.len(), 3);
        assert!(columns.contains(&"nationalID"));
    }

    #[test]
    fn test_insert_sql_names_every_column() {
        let sql = insert_sql(Collection::Guests, &["fullName", "email"]);
        assert!(sql.contains(r#"INSERT INTO "guests" ("fullName", "email")"#));
        assert!(sql.contains(r#"jsonb_populate_recordset(NULL::"guests", $1)"#));
        assert!(sql.contains("ORDER BY id"));
    }
}
