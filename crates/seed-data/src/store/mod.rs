//! Record store abstraction.
//!
//! The hosted database is reached through a [`RecordStore`]: a table-oriented
//! service that creates, deletes and selects rows in named collections and
//! assigns its own identifiers to created rows. Rows travel as JSON objects.

mod memory;
mod postgres;
mod rest;

pub use memory::{MemoryRecordStore, Operation};
pub use postgres::PgRecordStore;
pub use rest::RestRecordStore;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use hotel::{Collection, RecordId};

/// A single row, keyed by column name.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{collection} rejected the request (status {status}): {message}")]
    Rejected {
        collection: Collection,
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("column '{column}' does not exist on {collection}")]
    UnknownColumn {
        collection: Collection,
        column: String,
    },
    #[error("Malformed payload: {0}")]
    Decode(String),
    #[error("{0}")]
    Injected(String),
}

impl StoreError {
    /// True when the store refused a write because one of `columns` is not part of its schema.
    pub fn is_unknown_column(&self, columns: &[&str]) -> bool {
        match self {
            StoreError::UnknownColumn { column, .. } => columns.contains(&column.as_str()),
            _ => false,
        }
    }
}

/// Row predicate for deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    IdGreaterThan(RecordId),
}

impl Filter {
    /// Matches every row; assigned identifiers are always positive.
    pub const fn all() -> Self {
        Filter::IdGreaterThan(RecordId::FLOOR)
    }

    pub fn matches(&self, id: RecordId) -> bool {
        match self {
            Filter::IdGreaterThan(floor) => id > *floor,
        }
    }
}

/// Column selection for reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Columns to return. Empty means every column.
    pub columns: Vec<&'static str>,
    pub order_by_id: bool,
}

impl Query {
    /// Identifiers only, ascending, which is insertion order for an identity column.
    pub fn ids_ascending() -> Self {
        Self {
            columns: vec!["id"],
            order_by_id: true,
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Deletes every row of `collection` matched by `filter`.
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), StoreError>;

    /// Inserts `records` in one call and returns the stored rows, including
    /// their assigned `id`, in insertion order.
    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, StoreError>;

    async fn select(&self, collection: Collection, query: &Query) -> Result<Vec<Record>, StoreError>;
}

/// Serializes seed values into rows.
pub fn to_records<T: Serialize>(values: &[T]) -> Result<Vec<Record>, StoreError> {
    values
        .iter()
        .map(|value| match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(StoreError::Decode(format!("expected an object, got {other}"))),
        })
        .collect()
}

/// Extracts the `id` column of each row.
pub fn ids_of(records: &[Record]) -> Result<Vec<RecordId>, StoreError> {
    records
        .iter()
        .map(|record| {
            record
                .get("id")
                .and_then(serde_json::Value::as_i64)
                .map(RecordId)
                .ok_or_else(|| StoreError::Decode("row without a numeric id".to_string()))
        })
        .collect()
}

/// Keeps only the requested columns of a row.
pub(crate) fn project(record: &Record, columns: &[&str]) -> Record {
    if columns.is_empty() || columns.contains(&"*") {
        return record.clone();
    }
    record
        .iter()
        .filter(|(key, _)| columns.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Pulls the first quoted name out of a database error message, e.g.
/// `Could not find the 'nationalID' column of 'guests'` or
/// `column "nationalID" of relation "guests" does not exist`.
pub(crate) fn column_from_message(message: &str) -> Option<&str> {
    let start = message.find(['\'', '"'])?;
    let quote = message[start..].chars().next()?;
    let rest = &message[start + 1..];
    rest.find(quote).map(|end| &rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_all_matches_every_assigned_id() {
        let filter = Filter::all();
        assert!(filter.matches(RecordId(1)));
        assert!(filter.matches(RecordId(i64::MAX)));
        assert!(!filter.matches(RecordId(0)));
    }

    #[test]
    fn test_ids_of_requires_numeric_id() {
        let rows = to_records(&[json!({"id": 3}), json!({"id": 7})]).unwrap();
        assert_eq!(ids_of(&rows).unwrap(), vec![RecordId(3), RecordId(7)]);

        let rows = to_records(&[json!({"id": "x"})]).unwrap();
        assert!(matches!(ids_of(&rows), Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_to_records_rejects_non_objects() {
        assert!(matches!(to_records(&[1, 2]), Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_project_keeps_requested_columns() {
        let row = to_records(&[json!({"id": 1, "fullName": "Ana", "email": "a@b.c"})])
            .unwrap()
            .remove(0);
        let projected = project(&row, &["id"]);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected["id"], json!(1));
        assert_eq!(project(&row, &[]).len(), 3);
    }

    #[test]
    fn test_column_from_message_handles_both_quote_styles() {
        assert_eq!(
            column_from_message("Could not find the 'nationalID' column of 'guests' in the schema cache"),
            Some("nationalID")
        );
        assert_eq!(
            column_from_message(r#"column "national_id" of relation "guests" does not exist"#),
            Some("national_id")
        );
        assert_eq!(column_from_message("no quotes here"), None);
    }

    #[test]
    fn test_unknown_column_check_is_structural() {
        let err = StoreError::UnknownColumn {
            collection: Collection::Guests,
            column: "nationalID".to_string(),
        };
        assert!(err.is_unknown_column(&["nationalID", "national_id"]));
        assert!(!err.is_unknown_column(&["email"]));

        let rejected = StoreError::Rejected {
            collection: Collection::Guests,
            status: 400,
            code: None,
            message: "nationalID is invalid".to_string(),
        };
        assert!(!rejected.is_unknown_column(&["nationalID"]));
    }
}
