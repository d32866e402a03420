//! Upload state machine.
//!
//! Wraps a [`SeedSynchronizer`] so that only one upload runs at a time and
//! callers can observe progress through a `watch` channel.

use tokio::sync::watch;
use tracing::{error, info, warn};

use super::{SeedSynchronizer, SyncError, UploadKind, UploadSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Running(UploadKind),
    Succeeded(UploadSummary),
    Failed(String),
}

impl UploadState {
    pub fn is_running(&self) -> bool {
        matches!(self, UploadState::Running(_))
    }
}

/// Leaves the state `Failed` if a run is dropped before it reports a result.
struct RunGuard<'a> {
    state: &'a watch::Sender<UploadState>,
    finished: bool,
}

impl RunGuard<'_> {
    fn finish(mut self, next: UploadState) {
        self.finished = true;
        self.state.send_replace(next);
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Upload cancelled before completion");
            self.state
                .send_replace(UploadState::Failed("upload cancelled".to_string()));
        }
    }
}

pub struct UploadController {
    sync: SeedSynchronizer,
    state: watch::Sender<UploadState>,
}

impl UploadController {
    pub fn new(sync: SeedSynchronizer) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self { sync, state }
    }

    /// Current state.
    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    pub async fn upload_all(&self) -> Result<UploadSummary, SyncError> {
        self.run(UploadKind::All).await
    }

    pub async fn upload_bookings_only(&self) -> Result<UploadSummary, SyncError> {
        self.run(UploadKind::BookingsOnly).await
    }

    async fn run(&self, kind: UploadKind) -> Result<UploadSummary, SyncError> {
        let started = self.state.send_if_modified(|state| {
            if state.is_running() {
                return false;
            }
            *state = UploadState::Running(kind);
            true
        });
        if !started {
            return Err(SyncError::AlreadyRunning);
        }
        let guard = RunGuard {
            state: &self.state,
            finished: false,
        };

        let result = match kind {
            UploadKind::All => self.sync.upload_all().await,
            UploadKind::BookingsOnly => self.sync.upload_bookings_only().await,
        };

        let next = match &result {
            Ok(summary) => {
                info!("{}", summary.message());
                UploadState::Succeeded(summary.clone())
            }
            Err(e) => {
                error!("Upload error: {}", e);
                UploadState::Failed(e.to_string())
            }
        };
        guard.finish(next);
        result
    }
}
