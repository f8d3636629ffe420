use roster_storage::StorageError;
use std::borrow::Cow;

/// Failures of the activity roster.
///
/// The first four variants are request-scoped outcomes of enroll/unregister and never fatal.
/// The rest only occur while loading or persisting the catalog.
#[roster_derive::roster_error]
pub enum RosterError {
    #[error("Activity not found: {name}")]
    NotFound { name: String },

    #[error("{email} is already signed up for {activity}")]
    AlreadyRegistered { activity: String, email: String },

    #[error("{activity} is full ({max_participants} participants)")]
    CapacityExceeded { activity: String, max_participants: u32 },

    #[error("{email} is not registered for {activity}")]
    NotRegistered { activity: String, email: String },

    #[error("Invalid seed catalog{}: {message}", format_context(.context))]
    InvalidSeed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("Catalog JSON error{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal roster error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Payload-free classification of a [`RosterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterErrorKind {
    NotFound,
    AlreadyRegistered,
    CapacityExceeded,
    NotRegistered,
    InvalidSeed,
    Storage,
    Serde,
    Internal,
}

impl RosterError {
    #[must_use]
    pub const fn kind(&self) -> RosterErrorKind {
        match self {
            Self::NotFound { .. } => RosterErrorKind::NotFound,
            Self::AlreadyRegistered { .. } => RosterErrorKind::AlreadyRegistered,
            Self::CapacityExceeded { .. } => RosterErrorKind::CapacityExceeded,
            Self::NotRegistered { .. } => RosterErrorKind::NotRegistered,
            Self::InvalidSeed { .. } => RosterErrorKind::InvalidSeed,
            Self::Storage { .. } => RosterErrorKind::Storage,
            Self::Serde { .. } => RosterErrorKind::Serde,
            Self::Internal { .. } => RosterErrorKind::Internal,
        }
    }

    pub(crate) fn invalid_seed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidSeed { message: message.into(), context: None }
    }
}
