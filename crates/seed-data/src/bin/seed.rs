//! Uploads the sample data.
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed [all|bookings]
//! ```

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use seed_data::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = SeedConfig::from_env()?;
    if let Some(mode) = std::env::args().nth(1) {
        config.mode = mode.parse()?;
    }

    let store: Arc<dyn RecordStore> = match config.backend {
        Backend::Rest => {
            let (url, key) = config.rest_credentials()?;
            tracing::info!("Seeding through {}", url);
            Arc::new(RestRecordStore::new(url, key))
        }
        Backend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(config.database_url()?)
                .await?;
            tracing::info!("Connected to database");
            Arc::new(PgRecordStore::new(pool))
        }
        Backend::Memory => {
            tracing::info!("Seeding an in-memory store (dry run)");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let today = OffsetDateTime::now_utc().date();
    let sync = SeedSynchronizer::new(store, SeedDataset::builtin(today), today)
        .with_options(config.resolve_options());
    let controller = UploadController::new(sync);

    let summary = match config.mode {
        UploadMode::All => controller.upload_all().await?,
        UploadMode::Bookings => controller.upload_bookings_only().await?,
    };

    tracing::info!("Seed completed!");
    tracing::info!("  Guests: {}", summary.guests);
    tracing::info!("  Cabins: {}", summary.cabins);
    tracing::info!("  Bookings: {}", summary.bookings);

    Ok(())
}
