//! Activities feature slice: the Mergington activity roster.
//!
//! * [`RosterManager`] owns the catalog and enforces the enrollment rules.
//! * [`Activities`] is the slice handle registered in the API state. It wraps the manager and
//!   announces every committed change as a [`RosterChanged`] event.
//! * [`persistence::SnapshotStore`] optionally mirrors the catalog to disk.
//! * The `server` feature adds the HTTP handlers.

mod error;
pub mod events;
mod manager;
pub mod persistence;
pub mod seed;
#[cfg(feature = "server")]
pub mod server;

pub use crate::error::{RosterError, RosterErrorExt, RosterErrorKind};
pub use crate::events::{Change, RosterChanged};
pub use crate::manager::{Enrollment, RosterManager};

use crate::persistence::SnapshotStore;
use parking_lot::Mutex;
use roster_domain::activity::{Activity, Catalog};
use roster_domain::config::ApiConfig;
use roster_domain::registry::InitializedSlice;
use roster_event_bus::EventBus;
use roster_storage::Storage;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Activities feature state.
#[roster_derive::roster_slice]
pub struct Activities {
    manager: RosterManager,
    events: EventBus,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl Activities {
    /// Builds the slice around a validated catalog.
    ///
    /// # Errors
    /// [`RosterError::InvalidSeed`] if the catalog breaks a roster invariant.
    pub fn from_catalog(catalog: Catalog, events: EventBus) -> Result<Self, RosterError> {
        Ok(Self::new(ActivitiesInner {
            manager: RosterManager::new(catalog)?,
            events,
            writer: Mutex::new(None),
        }))
    }

    #[must_use]
    pub fn manager(&self) -> &RosterManager {
        &self.manager
    }

    #[must_use]
    pub fn list_activities(&self) -> Catalog {
        self.manager.list_activities()
    }

    /// # Errors
    /// See [`RosterManager::activity`].
    pub fn activity(&self, name: &str) -> Result<Activity, RosterError> {
        self.manager.activity(name)
    }

    /// Enrolls and announces the change.
    ///
    /// # Errors
    /// See [`RosterManager::enroll`].
    pub fn enroll(&self, name: &str, email: &str) -> Result<Enrollment, RosterError> {
        let ack = self.manager.enroll(name, email)?;
        self.announce(&ack);
        Ok(ack)
    }

    /// Unregisters and announces the change.
    ///
    /// # Errors
    /// See [`RosterManager::unregister`].
    pub fn unregister(&self, name: &str, email: &str) -> Result<Enrollment, RosterError> {
        let ack = self.manager.unregister(name, email)?;
        self.announce(&ack);
        Ok(ack)
    }

    /// Waits for the snapshot writer to store the changes it has already received.
    ///
    /// The writer only stops once the event bus is shut down, so call this after
    /// [`EventBus::shutdown`]. Returns `false` if the writer failed or outlived `timeout`.
    pub async fn wait_for_writer(&self, timeout: Duration) -> bool {
        let handle = self.writer.lock().take();
        let Some(handle) = handle else {
            return true;
        };

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                error!(error = %err, "Snapshot writer aborted");
                false
            },
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis(), "Snapshot writer did not stop in time");
                false
            },
        }
    }

    fn announce(&self, ack: &Enrollment) {
        let event = RosterChanged {
            activity: ack.activity.clone(),
            email: ack.email.clone(),
            change: ack.change,
        };
        // The change is already committed; a lost event only delays the next snapshot.
        if let Err(err) = self.events.publish(event) {
            warn!(error = %err, activity = %ack.activity, "Failed to publish roster change");
        }
    }
}

/// Initializes the activities slice.
///
/// The catalog comes from the first available source: the snapshot (when enabled), the
/// configured seed file, then the built-in catalog.
///
/// # Errors
/// Fails if the chosen source cannot be read or holds an invalid catalog.
pub async fn init(
    config: &ApiConfig,
    storage: &Storage,
    events: &EventBus,
) -> Result<InitializedSlice, RosterError> {
    let snapshots = config
        .roster
        .snapshot
        .enabled
        .then(|| SnapshotStore::new(storage.clone(), &config.roster.snapshot.file));

    let catalog = load_catalog(config, snapshots.as_ref()).await?;
    let activities = Activities::from_catalog(catalog, events.clone())?;

    if let Some(store) = snapshots {
        let rx = events.subscribe::<RosterChanged>().map_err(|err| RosterError::Internal {
            message: err.to_string().into(),
            context: Some("Subscribing snapshot writer".into()),
        })?;
        let handle = store.spawn_writer(activities.clone(), rx);
        *activities.writer.lock() = Some(handle);
    }

    info!(activities = activities.manager.len(), "Activities slice initialized");
    Ok(InitializedSlice::new(activities))
}

async fn load_catalog(
    config: &ApiConfig,
    snapshots: Option<&SnapshotStore>,
) -> Result<Catalog, RosterError> {
    if let Some(store) = snapshots
        && let Some(catalog) = store.load().await?
    {
        info!(source = "snapshot", "Catalog loaded");
        return Ok(catalog);
    }

    if let Some(path) = &config.roster.seed {
        let catalog = seed::load_seed_file(path).await?;
        info!(source = %path.display(), "Catalog loaded");
        return Ok(catalog);
    }

    info!(source = "built-in", "Catalog loaded");
    Ok(seed::default_catalog())
}
