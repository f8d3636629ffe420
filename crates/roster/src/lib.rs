//! Facade crate for the activity roster.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it composes other crates and holds no business logic.
//!
//! ## Usage
//! - Depend on `roster` with the `server` feature for HTTP routers.
//! - Call [`init`] once at startup and register the returned slices in the API state.

pub use roster_domain as domain;
pub use roster_event_bus as events;
pub use roster_kernel as kernel;
pub use roster_storage as storage;

use roster_domain::config::ApiConfig;
use roster_domain::registry::InitializedSlice;
use roster_event_bus::EventBus;
use roster_storage::Storage;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use roster_activities::server::router as activities_router;
        pub use roster_kernel::server::router::system_router;
    }
}

/// Feature slices.
pub mod features {
    pub use roster_activities as activities;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "activities",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initializes every feature slice.
///
/// # Errors
/// Returns the first slice initialization failure.
pub async fn init(
    config: &ApiConfig,
    storage: &Storage,
    events: &EventBus,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![features::activities::init(config, storage, events).await?];
    Ok(slices)
}
