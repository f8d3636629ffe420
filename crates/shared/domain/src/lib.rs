//! # Domain Models
//!
//! Pure data shared by every roster crate: configuration, the activity catalog and the
//! feature slice registry. Keep it lean: `serde` only (plus `utoipa` schemas behind the
//! `server` feature), no I/O and no locking.

pub mod activity;
pub mod config;
pub mod constants;
pub mod registry;
