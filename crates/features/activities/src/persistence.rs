//! Catalog snapshots in the storage sandbox.
//!
//! The writer listens for [`RosterChanged`] and rewrites the whole catalog. Events that arrive
//! within [`SNAPSHOT_DEBOUNCE`] of each other collapse into one write.

use crate::Activities;
use crate::error::{RosterError, RosterErrorExt};
use crate::events::RosterChanged;
use crate::seed::parse_catalog;
use roster_domain::activity::Catalog;
use roster_event_bus::EventReceiverExt;
use roster_storage::{Storage, StorageError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

pub const SNAPSHOT_DEBOUNCE: Duration = Duration::from_millis(50);

/// A catalog file inside the storage sandbox.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    storage: Storage,
    file: PathBuf,
}

impl SnapshotStore {
    pub fn new(storage: Storage, file: impl Into<PathBuf>) -> Self {
        Self { storage, file: file.into() }
    }

    /// Reads the snapshot; `None` when none has been written yet.
    ///
    /// # Errors
    /// [`RosterError::Storage`] for unreadable files, [`RosterError::Serde`] for corrupt ones.
    pub async fn load(&self) -> Result<Option<Catalog>, RosterError> {
        if !self.storage.exists(&self.file).context("Resolving snapshot")? {
            debug!(file = %self.file.display(), "No snapshot yet");
            return Ok(None);
        }

        match self.storage.read(&self.file).await {
            Ok(bytes) => {
                let catalog = parse_catalog(&bytes)
                    .context(format!("Snapshot {}", self.file.display()))?;
                Ok(Some(catalog))
            },
            // Removed between the check and the read.
            Err(StorageError::FileNotFound { .. }) => Ok(None),
            Err(err) => Err(err).context("Reading snapshot"),
        }
    }

    /// Atomically replaces the snapshot with `catalog`.
    ///
    /// # Errors
    /// [`RosterError::Serde`] or [`RosterError::Storage`].
    pub async fn save(&self, catalog: &Catalog) -> Result<(), RosterError> {
        let bytes = serde_json::to_vec_pretty(catalog).context("Encoding snapshot")?;
        self.storage.write(&self.file, &bytes).await.context("Writing snapshot")
    }

    /// Runs the writer until the event bus shuts down.
    pub fn spawn_writer(
        self,
        activities: Activities,
        events: broadcast::Receiver<Arc<RosterChanged>>,
    ) -> JoinHandle<()> {
        info!(file = %self.file.display(), "Snapshot writer started");
        tokio::spawn(self.run(activities, events))
    }

    async fn run(
        self,
        activities: Activities,
        mut events: broadcast::Receiver<Arc<RosterChanged>>,
    ) {
        while EventReceiverExt::recv(&mut events).await.is_some() {
            tokio::time::sleep(SNAPSHOT_DEBOUNCE).await;
            let coalesced = 1 + drain(&mut events);

            match self.save(&activities.list_activities()).await {
                Ok(()) => debug!(coalesced, "Snapshot written"),
                // Retried implicitly by the next event.
                Err(err) => error!(error = %err, coalesced, "Snapshot write failed"),
            }
        }
        debug!("Snapshot writer stopped");
    }
}

fn drain(events: &mut broadcast::Receiver<Arc<RosterChanged>>) -> usize {
    let mut drained = 0;
    loop {
        match events.try_recv() {
            Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => drained += 1,
            Err(_) => return drained,
        }
    }
}
