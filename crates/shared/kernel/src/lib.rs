//! Kernel utilities shared across slices.
//!
//! Keep this crate lightweight: configuration loading for every build, plus the HTTP state,
//! system routes and error body behind the `server` feature.
//!
//! ## Config loading
//! ```rust,no_run
//! use roster_kernel::config::load_config;
//! use roster_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! println!("listening on port {}", cfg.server.port);
//! ```

pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use roster_domain as domain;
pub use roster_event_bus as events;
