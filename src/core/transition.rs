//! Pure transition function and the edge table derived from it.
//!
//! The controller never decides where to go on its own; it asks
//! [`next_phase`] and applies the resulting [`Step`]. The same function backs
//! [`edges`], so the published diagram cannot drift from the running machine.

use super::durations::Durations;
use super::state::Phase;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Input condition that fires a transition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Trigger {
    /// The phase duration elapsed; the edge does not look at the latch.
    Timeout,
    /// Yellow timed out with a pedestrian request latched.
    TimeoutWithRequest,
    /// Yellow timed out with no request latched.
    TimeoutWithoutRequest,
}

impl Trigger {
    /// Short label used on diagram edges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::TimeoutWithRequest => "timeout & walk = true",
            Self::TimeoutWithoutRequest => "timeout & walk = false",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a timeout in some phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Step {
    pub to: Phase,
    pub trigger: Trigger,
    /// `true` when the step consumes the latched walk request.
    pub consumes_request: bool,
}

/// Where `phase` goes when its duration elapses.
///
/// Yellow is the only fork: a latched request sends it to the walk phase and
/// is consumed; otherwise the crossing goes straight to the all-red wait.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::{next_phase, Phase, Trigger};
///
/// let step = next_phase(Phase::Yellow, true);
/// assert_eq!(step.to, Phase::RedWalk);
/// assert_eq!(step.trigger, Trigger::TimeoutWithRequest);
/// assert!(step.consumes_request);
///
/// assert_eq!(next_phase(Phase::Yellow, false).to, Phase::RedWait);
/// ```
pub const fn next_phase(phase: Phase, request_queued: bool) -> Step {
    let (to, trigger) = match phase {
        Phase::Green => (Phase::Yellow, Trigger::Timeout),
        Phase::Yellow if request_queued => (Phase::RedWalk, Trigger::TimeoutWithRequest),
        Phase::Yellow => (Phase::RedWait, Trigger::TimeoutWithoutRequest),
        Phase::RedWalk => (Phase::RedFlash, Trigger::Timeout),
        Phase::RedFlash => (Phase::RedWait, Trigger::Timeout),
        Phase::RedWait => (Phase::Green, Trigger::Timeout),
    };
    Step {
        to,
        trigger,
        consumes_request: matches!(trigger, Trigger::TimeoutWithRequest),
    }
}

/// One labelled edge of the state diagram.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub from: Phase,
    pub trigger: Trigger,
    pub to: Phase,
}

const EDGES: [Edge; 6] = {
    const fn edge(from: Phase, queued: bool) -> Edge {
        let step = next_phase(from, queued);
        Edge {
            from,
            trigger: step.trigger,
            to: step.to,
        }
    }
    [
        edge(Phase::Green, false),
        edge(Phase::Yellow, true),
        edge(Phase::Yellow, false),
        edge(Phase::RedWalk, false),
        edge(Phase::RedFlash, false),
        edge(Phase::RedWait, false),
    ]
};

/// Every edge of the machine, in cycle order.
pub fn edges() -> &'static [Edge] {
    &EDGES
}

/// Render the machine as a formal Mealy description.
///
/// The text lists the tuple (Q, Σ, Λ, q0), the transition/output table and
/// the configured durations, and is what hosts show next to the diagram.
pub fn formal_description(durations: &Durations) -> String {
    let mut out = String::new();
    let names: Vec<&str> = Phase::ALL.iter().map(Phase::name).collect();

    let _ = writeln!(out, "Mealy machine: pedestrian crossing controller");
    let _ = writeln!(out);
    let _ = writeln!(out, "Q  = {{ {} }}", names.join(", "));
    let _ = writeln!(out, "Σ  = {{ timeout, walk = true, walk = false }}");
    let _ = writeln!(out, "Λ  = car ∈ {{ green, yellow, red }} × ped ∈ {{ walk, don't walk, flashing }}");
    let _ = writeln!(out, "q0 = {}", Phase::INITIAL);
    let _ = writeln!(out);
    let _ = writeln!(out, "Transitions (δ / λ):");
    for edge in edges() {
        let _ = writeln!(
            out,
            "  {:<8} --[{}]--> {:<8} / {}",
            edge.from.name(),
            edge.trigger,
            edge.to.name(),
            edge.to.outputs()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Durations:");
    for phase in Phase::ALL {
        let _ = writeln!(
            out,
            "  {:<8} {} ms",
            phase.name(),
            durations.threshold(phase).as_millis()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Walk requests are latched only in {}; extra presses are ignored.",
        Phase::Green
    );
    out
}
