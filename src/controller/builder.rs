//! Builder for constructing controllers.

use crate::controller::error::BuildError;
use crate::controller::machine::{Controller, DEFAULT_HISTORY_CAPACITY};
use crate::core::{Durations, Phase, PhaseHistory};
use crate::observer::{Observer, ObserverSet};
use std::time::Duration;

/// Builder for [`Controller`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::Phase;
/// use crosswalk::observer::LogObserver;
/// use crosswalk::Controller;
/// use std::time::Duration;
///
/// let controller = Controller::builder()
///     .duration(Phase::Green, Duration::from_secs(5))
///     .history_capacity(16)
///     .observer(LogObserver)
///     .build()
///     .unwrap();
///
/// assert_eq!(controller.remaining(), Duration::from_secs(5));
/// ```
pub struct ControllerBuilder {
    durations: Durations,
    history_capacity: usize,
    observers: ObserverSet,
}

impl ControllerBuilder {
    /// Create a new builder with default durations.
    pub fn new() -> Self {
        Self {
            durations: Durations::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            observers: ObserverSet::new(),
        }
    }

    /// Replace every duration.
    pub fn durations(mut self, durations: Durations) -> Self {
        self.durations = durations;
        self
    }

    /// Override the duration of one phase.
    pub fn duration(mut self, phase: Phase, duration: Duration) -> Self {
        self.durations = self.durations.with(phase, duration);
        self
    }

    /// Number of transitions to keep; zero disables history.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Register an observer before the first tick.
    pub fn observer<O>(mut self, observer: O) -> Self
    where
        O: Observer + 'static,
    {
        self.observers.subscribe(Box::new(observer));
        self
    }

    /// Build the controller.
    /// Returns an error if any phase duration is zero.
    pub fn build(self) -> Result<Controller, BuildError> {
        if let Some(phase) = self.durations.first_zero() {
            return Err(BuildError::ZeroDuration { phase });
        }

        Ok(Controller::with_parts(
            self.durations,
            PhaseHistory::with_capacity(self.history_capacity),
            self.observers,
        ))
    }
}

impl Default for ControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
