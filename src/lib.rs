//! Crosswalk: a Mealy-machine pedestrian crossing controller
//!
//! The crate models one signalized crossing as a finite state machine whose
//! outputs (car light, pedestrian signal) change in the same step as the
//! transition that causes them. The host owns a [`Controller`], advances it
//! with `tick`, forwards button presses with `request_crossing`, and renders
//! whatever the controller reports.
//!
//! # Core Concepts
//!
//! - **Phase**: the five logical states `Green → Yellow → (RedWalk →
//!   RedFlash →) RedWait → Green`
//! - **Latch**: a walk request accepted only in `Green`, consumed when
//!   `Yellow` times out
//! - **Observers**: synchronous `StateChanged` / `OutputsUpdated`
//!   notifications
//!
//! # Example
//!
//! ```rust
//! use crosswalk::core::{CarSignal, Durations, Phase};
//! use crosswalk::Controller;
//! use std::time::Duration;
//!
//! let mut controller = Controller::new(Durations::from_millis(5000, 3000, 8000, 3000, 2000));
//!
//! controller.tick(Duration::from_millis(5000));
//! assert_eq!(controller.phase(), Phase::Yellow);
//! assert_eq!(controller.car_signal(), CarSignal::Yellow);
//!
//! // No request was latched in Green, so Yellow skips the walk phases.
//! controller.tick(Duration::from_millis(3000));
//! assert_eq!(controller.phase(), Phase::RedWait);
//!
//! controller.tick(Duration::from_millis(2000));
//! assert_eq!(controller.phase(), Phase::Green);
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod driver;
pub mod observer;

// Re-export commonly used types
pub use config::{ConfigError, Settings};
pub use controller::{BuildError, Controller, ControllerBuilder, Snapshot, TickError};
pub use crate::core::{CarSignal, Durations, Outputs, PedSignal, Phase};
pub use observer::{Notification, Observer};
