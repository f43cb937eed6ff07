//! Core crossing types and logic.
//!
//! This module contains the pure part of the controller:
//! - Phases and the signals they drive
//! - Per-phase duration thresholds
//! - The transition function and its edge table
//! - Bounded transition history
//!
//! Nothing here keeps a clock or notifies anyone; that is the job of
//! [`Controller`](crate::controller::Controller).

mod durations;
mod history;
mod signal;
mod state;
mod transition;

pub use durations::{saturating_millis, Durations};
pub use history::{PhaseHistory, TransitionRecord};
pub use signal::{CarSignal, Outputs, PedSignal};
pub use state::Phase;
pub use transition::{edges, formal_description, next_phase, Edge, Step, Trigger};
