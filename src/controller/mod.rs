//! The controller: clock, latch, transitions and notifications.
//!
//! [`Controller`] wraps the pure functions of [`crate::core`] with the
//! mutable parts of the machine: elapsed time, the walk-request latch, the
//! transition history and the observers to notify.

mod builder;
mod error;
mod machine;
mod snapshot;

pub use builder::ControllerBuilder;
pub use error::{BuildError, TickError};
pub use machine::{Controller, DEFAULT_HISTORY_CAPACITY};
pub use snapshot::Snapshot;
