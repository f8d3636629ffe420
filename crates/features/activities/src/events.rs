//! Events published by the activities slice.

use serde::Serialize;

/// Which transition a roster went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    Enrolled,
    Unregistered,
}

/// Published on the event bus after a roster change has been committed in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterChanged {
    pub activity: String,
    pub email: String,
    pub change: Change,
}
