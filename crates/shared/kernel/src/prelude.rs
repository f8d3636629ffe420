//! Common imports for feature slices.

pub use roster_domain::activity::{Activity, Catalog};
pub use roster_domain::config::ApiConfig;
pub use roster_domain::registry::{FeatureSlice, InitializedSlice};
pub use roster_event_bus::EventBus;

#[cfg(feature = "server")]
pub use crate::server::{ApiError, ApiQuery, ApiState};
