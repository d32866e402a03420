//! In-process record store.
//!
//! Behaves like the hosted database for the purposes of seeding: identifiers
//! come from a per-collection sequence that never rewinds, rows are returned
//! in identifier order, and a schema can be narrowed to reject columns.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use hotel::{Collection, RecordId};

use super::{Filter, Query, Record, RecordStore, StoreError, project};

/// Store operation, used for failure injection and the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Delete,
    Insert,
    Select,
}

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<RecordId, Record>,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<Collection, Table>,
    rejected_columns: HashMap<Collection, HashSet<String>>,
    failures: HashMap<(Collection, Operation), String>,
    calls: Vec<(Operation, Collection)>,
}

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
    latency: Option<Duration>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every call, so concurrent callers interleave as they would over a network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes inserts into `collection` fail when a row carries `column`.
    pub fn reject_column(self, collection: Collection, column: impl Into<String>) -> Self {
        self.lock()
            .rejected_columns
            .entry(collection)
            .or_default()
            .insert(column.into());
        self
    }

    /// Makes every `operation` on `collection` fail with `message`.
    pub fn fail_on(&self, collection: Collection, operation: Operation, message: impl Into<String>) {
        self.lock()
            .failures
            .insert((collection, operation), message.into());
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Rows of `collection` in identifier order.
    pub fn rows(&self, collection: Collection) -> Vec<Record> {
        self.lock()
            .tables
            .get(&collection)
            .map(|table| table.rows.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, collection: Collection) -> usize {
        self.lock()
            .tables
            .get(&collection)
            .map_or(0, |table| table.rows.len())
    }

    /// Every call made so far, in order, including failed ones.
    pub fn calls(&self) -> Vec<(Operation, Collection)> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    /// Records the call and returns the injected failure for it, if any.
    fn begin(inner: &mut Inner, collection: Collection, operation: Operation) -> Result<(), StoreError> {
        inner.calls.push((operation, collection));
        match inner.failures.get(&(collection, operation)) {
            Some(message) => Err(StoreError::Injected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), StoreError> {
        self.pause().await;
        let mut inner = self.lock();
        Self::begin(&mut inner, collection, Operation::Delete)?;
        if let Some(table) = inner.tables.get_mut(&collection) {
            table.rows.retain(|id, _| !filter.matches(*id));
        }
        Ok(())
    }

    async fn insert(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<Record>, StoreError> {
        self.pause().await;
        let mut inner = self.lock();
        Self::begin(&mut inner, collection, Operation::Insert)?;

        // Whole batch is rejected, as a single INSERT statement would be.
        if let Some(rejected) = inner.rejected_columns.get(&collection) {
            if let Some(column) = records
                .iter()
                .flat_map(|record| record.keys())
                .find(|key| rejected.contains(key.as_str()))
            {
                return Err(StoreError::UnknownColumn {
                    collection,
                    column: column.clone(),
                });
            }
        }

        let table = inner.tables.entry(collection).or_default();
        let mut stored = Vec::with_capacity(records.len());
        for mut record in records {
            table.last_id += 1;
            let id = RecordId(table.last_id);
            record.insert("id".to_string(), Value::from(id.0));
            table.rows.insert(id, record.clone());
            stored.push(record);
        }
        Ok(stored)
    }

    async fn select(&self, collection: Collection, query: &Query) -> Result<Vec<Record>, StoreError> {
        self.pause().await;
        let mut inner = self.lock();
        Self::begin(&mut inner, collection, Operation::Select)?;
        Ok(inner
            .tables
            .get(&collection)
            .map(|table| {
                table
                    .rows
                    .values()
                    .map(|row| project(row, &query.columns))
                    .collect()
            })
            .unwrap_or_default())
    }
}
