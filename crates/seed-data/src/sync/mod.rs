//! Resets and repopulates the sample data collections.
//!
//! The [`SeedSynchronizer`] deletes bookings, guests and cabins (in that
//! order, since bookings reference the other two), inserts guests and cabins,
//! then resolves each booking's positional references into the identifiers
//! the store assigned and inserts the bookings in one batch.
//!
//! Deletes and the guest/cabin inserts are best-effort: failures are logged
//! and the sequence continues. Booking resolution and insertion are not:
//! their failures abort the run and are returned to the caller.

mod controller;
mod resolve;
mod status;

pub use controller::{UploadController, UploadState};
pub use resolve::{IdentifierMap, ResolveOptions, ResolvedBooking, resolve_bookings};
pub use status::{StatusPolicy, derive_status};

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::Date;
use tracing::{debug, error, info, warn};

use hotel::{Collection, RecordId};

use crate::data::SeedDataset;
use crate::store::{Filter, Query, Record, RecordStore, StoreError, ids_of, to_records};

/// Spellings of the optional national identifier column on the guests collection.
const NATIONAL_ID_COLUMNS: [&str; 2] = ["nationalID", "national_id"];

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("No {collection} found ({reason}). Please create {collection} first.")]
    MissingPrerequisite {
        collection: Collection,
        reason: String,
    },
    #[error("{missing_guest} bookings have no guestId and {missing_cabin} have no cabinId")]
    ReferentialIntegrity {
        missing_guest: usize,
        missing_cabin: usize,
    },
    #[error("Failed to insert bookings: {message}")]
    Persistence { message: String },
    #[error("An upload is already in progress")]
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadKind {
    All,
    BookingsOnly,
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub kind: UploadKind,
    pub guests: usize,
    pub cabins: usize,
    pub bookings: usize,
}

impl UploadSummary {
    /// One-line notification for the operator.
    pub fn message(&self) -> String {
        match self.kind {
            UploadKind::All => "All data uploaded successfully!".to_string(),
            UploadKind::BookingsOnly => {
                format!("Successfully uploaded {} bookings!", self.bookings)
            }
        }
    }
}

/// Seeds a [`RecordStore`] from a [`SeedDataset`].
///
/// Runs must not overlap on the same store; [`UploadController`] enforces that.
pub struct SeedSynchronizer {
    store: Arc<dyn RecordStore>,
    dataset: SeedDataset,
    today: Date,
    options: ResolveOptions,
}

impl SeedSynchronizer {
    /// `today` anchors booking status derivation.
    pub fn new(store: Arc<dyn RecordStore>, dataset: SeedDataset, today: Date) -> Self {
        Self {
            store,
            dataset,
            today,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dataset(&self) -> &SeedDataset {
        &self.dataset
    }

    /// Deletes every booking, guest and cabin, in that order. Never fails.
    pub async fn clear_all(&self) {
        for collection in Collection::DELETE_ORDER {
            self.delete_all(collection).await;
        }
    }

    async fn delete_all(&self, collection: Collection) {
        match self.store.delete(collection, &Filter::all()).await {
            Ok(()) => debug!("Cleared {}", collection),
            Err(e) => warn!("Failed to delete {}: {}", collection, e),
        }
    }

    /// Inserts the guest and cabin seeds. Failures are logged, not returned.
    ///
    /// Returns the assigned identifiers when both inserts succeeded and
    /// reported one row per seed, in seed order.
    pub async fn seed_guests_and_cabins(&self) -> Option<IdentifierMap> {
        let guests = self.insert_guests().await;
        let cabins = match to_records(&self.dataset.cabins) {
            Ok(records) => self.insert_logged(Collection::Cabins, records).await,
            Err(e) => {
                error!("Error encoding cabins: {}", e);
                None
            }
        };

        Some(IdentifierMap::new(
            self.inserted_ids(Collection::Guests, &guests?, self.dataset.guests.len())?,
            self.inserted_ids(Collection::Cabins, &cabins?, self.dataset.cabins.len())?,
        ))
    }

    async fn insert_guests(&self) -> Option<Vec<Record>> {
        let records = match to_records(&self.dataset.guests) {
            Ok(records) => records,
            Err(e) => {
                error!("Error encoding guests: {}", e);
                return None;
            }
        };

        match self.store.insert(Collection::Guests, records.clone()).await {
            Ok(rows) => {
                info!("Seeded {} guests", rows.len());
                Some(rows)
            }
            Err(e) if e.is_unknown_column(&NATIONAL_ID_COLUMNS) => {
                warn!("{}; retrying guests without the national ID", e);
                let stripped = records
                    .into_iter()
                    .map(|mut record| {
                        for column in NATIONAL_ID_COLUMNS {
                            record.remove(column);
                        }
                        record
                    })
                    .collect();
                self.insert_logged(Collection::Guests, stripped).await
            }
            Err(e) => {
                error!("Error creating guests: {}", e);
                None
            }
        }
    }

    async fn insert_logged(&self, collection: Collection, records: Vec<Record>) -> Option<Vec<Record>> {
        match self.store.insert(collection, records).await {
            Ok(rows) => {
                info!("Seeded {} {}", rows.len(), collection);
                Some(rows)
            }
            Err(e) => {
                error!("Error creating {}: {}", collection, e);
                None
            }
        }
    }

    fn inserted_ids(
        &self,
        collection: Collection,
        rows: &[Record],
        expected: usize,
    ) -> Option<Vec<RecordId>> {
        match ids_of(rows) {
            Ok(ids) if ids.len() == expected => Some(ids),
            Ok(ids) => {
                debug!(
                    "{} insert returned {} rows for {} seeds; identifiers will be fetched",
                    collection,
                    ids.len(),
                    expected
                );
                None
            }
            Err(e) => {
                debug!("{} insert returned unusable rows ({}); identifiers will be fetched", collection, e);
                None
            }
        }
    }

    /// Reads the guest and cabin identifiers back from the store, ascending.
    ///
    /// The i-th identifier is taken to belong to the i-th seed, which holds as
    /// long as the store hands out increasing identifiers in insertion order.
    pub async fn fetch_identifiers(&self) -> Result<IdentifierMap, SyncError> {
        let guests = self.fetch_ids(Collection::Guests).await?;
        let cabins = self.fetch_ids(Collection::Cabins).await?;
        Ok(IdentifierMap::new(guests, cabins))
    }

    async fn fetch_ids(&self, collection: Collection) -> Result<Vec<RecordId>, SyncError> {
        let missing = |reason: String| {
            error!("Error fetching {}: {}", collection, reason);
            SyncError::MissingPrerequisite { collection, reason }
        };

        let rows = self
            .store
            .select(collection, &Query::ids_ascending())
            .await
            .map_err(|e| missing(e.to_string()))?;
        let ids = ids_of(&rows).map_err(|e| missing(e.to_string()))?;
        if ids.is_empty() {
            return Err(missing("collection is empty".to_string()));
        }
        Ok(ids)
    }

    /// Fetches the stored guests and cabins, then resolves and inserts every booking.
    ///
    /// Returns the number of bookings inserted.
    pub async fn resolve_and_seed_bookings(&self) -> Result<usize, SyncError> {
        let ids = self.fetch_identifiers().await?;
        self.seed_bookings(&ids).await
    }

    /// Resolves the booking seeds against `ids` and inserts them in one batch.
    ///
    /// Nothing is written if any booking fails to resolve.
    pub async fn seed_bookings(&self, ids: &IdentifierMap) -> Result<usize, SyncError> {
        let resolved = resolve_bookings(
            &self.dataset.bookings,
            &self.dataset.cabins,
            ids,
            self.today,
            &self.options,
        );

        if !resolved.iter().all(ResolvedBooking::is_resolved) {
            let err = SyncError::ReferentialIntegrity {
                missing_guest: resolved.iter().filter(|b| b.guest_id.is_none()).count(),
                missing_cabin: resolved.iter().filter(|b| b.cabin_id.is_none()).count(),
            };
            error!("{}", err);
            return Err(err);
        }

        let records = to_records(&resolved).map_err(|e| persistence(&e))?;
        let rows = self
            .store
            .insert(Collection::Bookings, records)
            .await
            .map_err(|e| persistence(&e))?;

        info!("Seeded {} bookings", rows.len());
        Ok(rows.len())
    }

    /// Clears every collection, then seeds guests, cabins and bookings.
    pub async fn upload_all(&self) -> Result<UploadSummary, SyncError> {
        info!("Uploading all sample data...");
        self.clear_all().await;

        let ids = match self.seed_guests_and_cabins().await {
            Some(ids) => ids,
            None => self.fetch_identifiers().await?,
        };
        let bookings = self.seed_bookings(&ids).await?;

        Ok(UploadSummary {
            kind: UploadKind::All,
            guests: ids.guest_count(),
            cabins: ids.cabin_count(),
            bookings,
        })
    }

    /// Replaces the bookings, keeping the stored guests and cabins.
    pub async fn upload_bookings_only(&self) -> Result<UploadSummary, SyncError> {
        info!("Uploading sample bookings...");
        self.delete_all(Collection::Bookings).await;

        let ids = self.fetch_identifiers().await?;
        let bookings = self.seed_bookings(&ids).await?;

        Ok(UploadSummary {
            kind: UploadKind::BookingsOnly,
            guests: ids.guest_count(),
            cabins: ids.cabin_count(),
            bookings,
        })
    }
}

fn persistence(err: &StoreError) -> SyncError {
    error!("Error inserting bookings: {}", err);
    SyncError::Persistence {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_messages() {
        let all = UploadSummary {
            kind: UploadKind::All,
            guests: 16,
            cabins: 8,
            bookings: 18,
        };
        assert_eq!(all.message(), "All data uploaded successfully!");

        let bookings = UploadSummary {
            kind: UploadKind::BookingsOnly,
            ..all
        };
        assert_eq!(bookings.message(), "Successfully uploaded 18 bookings!");
    }

    #[test]
    fn test_missing_prerequisite_message_names_collection() {
        let err = SyncError::MissingPrerequisite {
            collection: Collection::Guests,
            reason: "collection is empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No guests found (collection is empty). Please create guests first."
        );
    }
}
