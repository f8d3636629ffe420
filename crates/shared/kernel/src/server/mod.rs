//! HTTP building blocks shared by every slice.

mod error;
mod extract;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ErrorBody};
pub use extract::ApiQuery;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
