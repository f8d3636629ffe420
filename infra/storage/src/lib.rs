//! Sandboxed filesystem storage used to persist roster snapshots.
//!
//! * **Sandbox**: every path is relative to the storage root; absolute paths and `..`
//!   segments that would leave the root are rejected, and existing ancestors are
//!   canonicalized so symlinks cannot escape either.
//! * **Atomic writes**: data goes to a unique temp file, is `fsync`ed, then renamed over
//!   the target, so readers see either the old or the new file and never a partial one.
//! * **Self-healing**: stale temp files left by a crash are removed on [`StorageBuilder::connect`].
//!
//! # Example
//!
//! ```rust
//! use roster_storage::{Storage, StorageError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     # let root = tmp.path().join("data");
//!     let storage = Storage::builder().root(&root).connect().await?;
//!
//!     storage.write("activities.json", b"{}").await?;
//!     assert_eq!(storage.read("activities.json").await?, b"{}");
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod security;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
