//! Sample data uploader for the Wild Oasis admin.
//!
//! Resets the guests, cabins and bookings collections of the hosted database
//! and repopulates them from compiled-in seed data. Bookings refer to guests
//! and cabins by position in the seed data; those references are resolved
//! into the identifiers the store assigns before bookings are written.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let today = time::OffsetDateTime::now_utc().date();
//! let store = Arc::new(RestRecordStore::new(url, key));
//! let sync = SeedSynchronizer::new(store, SeedDataset::builtin(today), today);
//! let summary = UploadController::new(sync).upload_all().await?;
//! println!("{}", summary.message());
//! ```

pub mod config;
pub mod data;
pub mod store;
pub mod sync;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{Backend, SeedConfig, UploadMode};
    pub use crate::data::{BookingSeed, CabinSeed, GuestSeed, SeedDataset};
    pub use crate::store::{
        MemoryRecordStore, PgRecordStore, RecordStore, RestRecordStore, StoreError,
    };
    pub use crate::sync::{
        IdentifierMap, SeedSynchronizer, StatusPolicy, SyncError, UploadController, UploadState,
        UploadSummary,
    };
    pub use hotel::{BookingStatus, Collection, RecordId};
}
