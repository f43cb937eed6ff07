//! # Observers: synchronous notification handlers
//!
//! The controller reports two kinds of [`Notification`]:
//! - [`StateChanged`] once per transition, carrying the outputs in effect
//!   right after it;
//! - [`OutputsUpdated`] on every tick (and when a walk request is latched).
//!
//! ```text
//! Controller::tick ──► ObserverSet::notify(&Notification)
//!                          │ (registration order, before tick returns)
//!                          ├──► LogObserver      (tracing)
//!                          ├──► ChannelObserver  (tokio mpsc)
//!                          └──► from_fn(|n| ...) (user logic)
//! ```
//!
//! Delivery is synchronous: an observer sees the new phase before the call
//! that caused it returns.
//!
//! ## Example
//! ```rust
//! use crosswalk::observer::{from_fn, Notification};
//! use crosswalk::Controller;
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//!
//! let mut controller = Controller::default();
//! controller.subscribe(from_fn(move |n: &Notification| {
//!     if let Notification::StateChanged(change) = n {
//!         sink.lock().unwrap().push(change.current);
//!     }
//! }));
//!
//! controller.tick(Duration::from_secs(30));
//! assert_eq!(seen.lock().unwrap().len(), 1);
//! ```

mod channel;
mod log;
mod set;

pub use channel::ChannelObserver;
pub use log::LogObserver;
pub use set::{ObserverSet, SubscriptionId};

use crate::core::{Outputs, Phase, Trigger};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Emitted once per transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StateChanged {
    pub previous: Phase,
    pub current: Phase,
    /// Outputs effective immediately after the transition
    pub outputs: Outputs,
    pub trigger: Trigger,
}

/// Emitted after every tick and whenever the visible controller state moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OutputsUpdated {
    pub phase: Phase,
    pub outputs: Outputs,
    pub elapsed: Duration,
    pub request_queued: bool,
}

/// Everything a controller can tell its observers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Notification {
    StateChanged(StateChanged),
    OutputsUpdated(OutputsUpdated),
}

impl Notification {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::StateChanged(_) => "state_changed",
            Self::OutputsUpdated(_) => "outputs_updated",
        }
    }

    /// Phase current after this notification.
    pub fn phase(&self) -> Phase {
        match self {
            Self::StateChanged(e) => e.current,
            Self::OutputsUpdated(e) => e.phase,
        }
    }

    /// Outputs current after this notification.
    pub fn outputs(&self) -> Outputs {
        match self {
            Self::StateChanged(e) => e.outputs,
            Self::OutputsUpdated(e) => e.outputs,
        }
    }
}

/// Receives controller notifications.
///
/// Called synchronously from inside `tick` / `request_crossing`; keep
/// handlers short and never call back into the controller.
pub trait Observer: Send {
    /// Handles a single notification.
    fn on_notification(&mut self, notification: &Notification);

    /// Returns the observer name used in logs.
    ///
    /// The default uses `type_name::<Self>()`; override it with something
    /// short when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Observer backed by a closure. Built with [`from_fn`].
pub struct FnObserver<F> {
    f: F,
}

impl<F> Observer for FnObserver<F>
where
    F: FnMut(&Notification) + Send,
{
    fn on_notification(&mut self, notification: &Notification) {
        (self.f)(notification)
    }

    fn name(&self) -> &'static str {
        "fn"
    }
}

/// Wrap a closure as an [`Observer`].
pub fn from_fn<F>(f: F) -> FnObserver<F>
where
    F: FnMut(&Notification) + Send,
{
    FnObserver { f }
}
