//! The crossing controller: a Mealy machine driven by ticks.

use crate::controller::error::TickError;
use crate::controller::snapshot::Snapshot;
use crate::controller::ControllerBuilder;
use crate::core::{
    next_phase, saturating_millis, CarSignal, Durations, Outputs, PedSignal, Phase, PhaseHistory,
    Step, TransitionRecord,
};
use crate::observer::{
    Notification, Observer, ObserverSet, OutputsUpdated, StateChanged, SubscriptionId,
};
use std::time::Duration;

/// Number of transitions kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Timed controller for a single pedestrian crossing.
///
/// The host advances time with [`tick`](Self::tick) and forwards button
/// presses with [`request_crossing`](Self::request_crossing). Transitions only
/// ever happen inside `tick`, at most one per call, and outputs change in the
/// same call as the transition that causes them.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::{Durations, Phase, PedSignal};
/// use crosswalk::Controller;
/// use std::time::Duration;
///
/// let mut controller = Controller::new(Durations::from_millis(5000, 3000, 8000, 3000, 2000));
/// assert!(controller.request_crossing());
///
/// controller.tick(Duration::from_millis(5000));
/// assert_eq!(controller.phase(), Phase::Yellow);
///
/// controller.tick(Duration::from_millis(3000));
/// assert_eq!(controller.phase(), Phase::RedWalk);
/// assert_eq!(controller.ped_signal(), PedSignal::Walk);
/// assert!(!controller.is_request_queued());
/// ```
#[derive(Debug)]
pub struct Controller {
    phase: Phase,
    outputs: Outputs,
    elapsed: Duration,
    uptime: Duration,
    request_queued: bool,
    durations: Durations,
    history: PhaseHistory,
    observers: ObserverSet,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}

impl Controller {
    /// Create a controller in the initial phase.
    ///
    /// Durations are taken as given; a zero duration makes its phase last a
    /// single tick. Use [`Controller::builder`] to have them validated.
    pub fn new(durations: Durations) -> Self {
        Self::with_parts(
            durations,
            PhaseHistory::with_capacity(DEFAULT_HISTORY_CAPACITY),
            ObserverSet::new(),
        )
    }

    /// Start building a controller.
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new()
    }

    pub(crate) fn with_parts(
        durations: Durations,
        history: PhaseHistory,
        observers: ObserverSet,
    ) -> Self {
        let phase = Phase::INITIAL;
        Self {
            phase,
            outputs: phase.outputs(),
            elapsed: Duration::ZERO,
            uptime: Duration::ZERO,
            request_queued: false,
            durations,
            history,
            observers,
        }
    }

    /// Advance the controller clock by `delta`.
    ///
    /// Performs at most one transition, even when `delta` spans several
    /// phase durations. Observers get `StateChanged` and `OutputsUpdated` for
    /// a transition, then one more `OutputsUpdated` for the tick itself.
    pub fn tick(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
        self.uptime = self.uptime.saturating_add(delta);
        self.outputs = self.phase.outputs();

        if self.elapsed >= self.durations.threshold(self.phase) {
            let step = next_phase(self.phase, self.request_queued);
            self.transition(step);
        }

        self.emit_outputs();
    }

    /// Tick by a signed number of milliseconds.
    ///
    /// Negative values are rejected and leave the controller untouched.
    pub fn tick_millis(&mut self, millis: i64) -> Result<(), TickError> {
        let ms = u64::try_from(millis).map_err(|_| {
            tracing::warn!(millis, "rejected negative tick");
            TickError::NegativeMillis { millis }
        })?;
        self.tick(Duration::from_millis(ms));
        Ok(())
    }

    /// Tick by a number of seconds given as a float.
    ///
    /// Negative, NaN, infinite and unrepresentable values are rejected and
    /// leave the controller untouched.
    pub fn tick_secs_f64(&mut self, seconds: f64) -> Result<(), TickError> {
        let delta = checked_secs(seconds).map_err(|err| {
            tracing::warn!(seconds, reason = err.as_label(), "rejected tick");
            err
        })?;
        self.tick(delta);
        Ok(())
    }

    /// Register a pedestrian button press.
    ///
    /// Latched only in a phase that accepts requests and only if no request
    /// is already pending. A newly latched request notifies observers with
    /// `OutputsUpdated` right away so a host can disable its button. Returns
    /// whether the press was latched.
    pub fn request_crossing(&mut self) -> bool {
        if !self.phase.accepts_requests() {
            tracing::trace!(phase = %self.phase, "crossing request ignored");
            return false;
        }
        if self.request_queued {
            return false;
        }

        self.request_queued = true;
        tracing::debug!(phase = %self.phase, "crossing request latched");
        self.emit_outputs();
        true
    }

    fn transition(&mut self, step: Step) {
        let previous = self.phase;
        let dwell = self.elapsed;

        if step.consumes_request {
            self.request_queued = false;
        }
        self.phase = step.to;
        self.elapsed = Duration::ZERO;
        self.outputs = self.phase.outputs();

        self.history.record(TransitionRecord {
            from: previous,
            to: step.to,
            trigger: step.trigger,
            dwell,
            at: self.uptime,
        });

        tracing::debug!(
            from = %previous,
            to = %self.phase,
            trigger = %step.trigger,
            dwell_ms = saturating_millis(dwell),
            "transition"
        );

        self.observers.notify(&Notification::StateChanged(StateChanged {
            previous,
            current: self.phase,
            outputs: self.outputs,
            trigger: step.trigger,
        }));
        self.emit_outputs();
    }

    fn emit_outputs(&mut self) {
        let event = Notification::OutputsUpdated(OutputsUpdated {
            phase: self.phase,
            outputs: self.outputs,
            elapsed: self.elapsed,
            request_queued: self.request_queued,
        });
        self.observers.notify(&event);
    }

    /// Register an observer; see [`crate::observer`].
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: Observer + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if `id` is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outputs(&self) -> Outputs {
        self.outputs
    }

    pub fn car_signal(&self) -> CarSignal {
        self.outputs.car
    }

    pub fn ped_signal(&self) -> PedSignal {
        self.outputs.ped
    }

    /// Time spent in the current phase.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total time ticked since construction.
    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    pub fn is_request_queued(&self) -> bool {
        self.request_queued
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    /// Time left before the current phase times out, zero once overdue.
    pub fn remaining(&self) -> Duration {
        self.durations
            .threshold(self.phase)
            .saturating_sub(self.elapsed)
    }

    /// [`remaining`](Self::remaining) in whole seconds, rounded up.
    pub fn remaining_secs(&self) -> u64 {
        let ms = self.remaining().as_millis();
        u64::try_from(ms.div_ceil(1000)).unwrap_or(u64::MAX)
    }

    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            outputs: self.outputs,
            elapsed_ms: saturating_millis(self.elapsed),
            remaining_ms: saturating_millis(self.remaining()),
            remaining_secs: self.remaining_secs(),
            request_queued: self.request_queued,
            uptime_ms: saturating_millis(self.uptime),
            cycles: self.history.cycles(),
        }
    }
}

fn checked_secs(seconds: f64) -> Result<Duration, TickError> {
    if !seconds.is_finite() {
        return Err(TickError::NonFinite { seconds });
    }
    if seconds < 0.0 {
        return Err(TickError::NegativeSeconds { seconds });
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| TickError::Overflow { seconds })
}
