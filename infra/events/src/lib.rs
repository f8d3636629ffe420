//! # Event Bus
//!
//! A typed, asynchronous broadcast bus shared by the roster slices.
//!
//! Events are keyed by their Rust type. Every subscriber of a type receives every event of
//! that type published after it subscribed (fan-out). Publishing with no subscribers is not
//! an error; the event is simply dropped.
//!
//! # Example
//!
//! ```rust
//! use roster_event_bus::{EventBus, EventBusError, EventReceiverExt};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct StudentEnrolled { activity: String }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!     let mut rx = bus.subscribe::<StudentEnrolled>()?;
//!
//!     bus.publish(StudentEnrolled { activity: "Chess Club".to_owned() })?;
//!
//!     let event = EventReceiverExt::recv(&mut rx).await;
//!     assert_eq!(event.map(|e| e.activity.clone()), Some("Chess Club".to_owned()));
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::{EventBusError, EventBusErrorExt};
pub use receiver::EventReceiverExt;
