//! Phase transition history.
//!
//! Keeps a bounded log of the transitions a controller performed, stamped
//! with the controller's logical clock rather than wall time.

use super::state::Phase;
use super::transition::Trigger;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single phase transition.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::{Phase, TransitionRecord, Trigger};
/// use std::time::Duration;
///
/// let record = TransitionRecord {
///     from: Phase::Green,
///     to: Phase::Yellow,
///     trigger: Trigger::Timeout,
///     dwell: Duration::from_millis(5000),
///     at: Duration::from_millis(5000),
/// };
/// assert!(!record.consumed_request());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The phase being left
    pub from: Phase,
    /// The phase being entered
    pub to: Phase,
    /// What fired the transition
    pub trigger: Trigger,
    /// Elapsed time in `from` when it was left (may overshoot the threshold)
    pub dwell: Duration,
    /// Controller uptime at which the transition happened
    pub at: Duration,
}

impl TransitionRecord {
    /// Whether this transition consumed a latched walk request.
    pub fn consumed_request(&self) -> bool {
        self.trigger == Trigger::TimeoutWithRequest
    }
}

/// Upper bound on records reserved when a history is created.
const PREALLOCATED_RECORDS: usize = 64;

/// Bounded, ordered history of transitions.
///
/// Once `capacity` records are stored the oldest one is dropped for each new
/// record. A capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::{Phase, PhaseHistory, TransitionRecord, Trigger};
/// use std::time::Duration;
///
/// let mut history = PhaseHistory::with_capacity(8);
/// history.record(TransitionRecord {
///     from: Phase::Green,
///     to: Phase::Yellow,
///     trigger: Trigger::Timeout,
///     dwell: Duration::from_secs(5),
///     at: Duration::from_secs(5),
/// });
///
/// assert_eq!(history.path(), vec![Phase::Green, Phase::Yellow]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PhaseHistory {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
    /// Total transitions seen, including evicted ones.
    total: u64,
    cycles: u64,
}

impl PhaseHistory {
    /// Create an empty history keeping at most `capacity` records.
    ///
    /// Storage grows as records arrive, so a large `capacity` costs nothing
    /// up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(PREALLOCATED_RECORDS)),
            total: 0,
            cycles: 0,
        }
    }

    /// Append a transition, evicting the oldest record if full.
    pub fn record(&mut self, record: TransitionRecord) {
        self.total += 1;
        if record.to == Phase::INITIAL {
            self.cycles += 1;
        }
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Phases traversed by the retained records: the first record's `from`,
    /// then the `to` of each record.
    pub fn path(&self) -> Vec<Phase> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    /// Most recent transition, if any is retained.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Number of completed cycles (returns to the initial phase).
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Transitions recorded since creation, evicted ones included.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
