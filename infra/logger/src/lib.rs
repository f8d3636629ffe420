//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for the roster server.
//!
//! * Console output is compact and colored.
//! * File output rolls daily through a non-blocking writer, optionally as JSON.
//! * The level given to the builder is only a default; `RUST_LOG` or an explicit
//!   [`LoggerBuilder::env_filter`] refine it per module (e.g. `"roster_activities=debug"`).
//!
//! ## Example
//!
//! ```rust
//! use roster_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("roster-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;

pub use crate::builder::{LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle to the installed subscriber.
///
/// Holds the file writer's worker guard; pending lines are flushed when it drops, so keep it
/// alive until the process exits.
#[must_use = "Dropping this handle stops the background log writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the subscriber. The name prefixes rolling files
    /// (`roster-server.2026-10-16.log`).
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logger shutting down, flushing file output");
        }
    }
}
