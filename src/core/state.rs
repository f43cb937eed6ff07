//! Controller phases.
//!
//! A [`Phase`] is the logical state of the intersection. Every method here is
//! pure: the outputs and request policy of a phase never depend on anything
//! but the phase itself.

use super::signal::{CarSignal, Outputs, PedSignal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical state of the crossing.
///
/// The machine starts in [`Phase::Green`] and cycles forever; no phase is
/// terminal.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::{CarSignal, Phase, PedSignal};
///
/// let phase = Phase::RedFlash;
/// assert_eq!(phase.name(), "RedFlash");
/// assert_eq!(phase.outputs().car, CarSignal::Red);
/// assert_eq!(phase.outputs().ped, PedSignal::Flashing);
/// assert!(!phase.accepts_requests());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Cars go, pedestrians wait. The only phase that latches walk requests.
    #[default]
    Green,
    /// Cars clear the intersection.
    Yellow,
    /// Cars stopped, pedestrians cross.
    RedWalk,
    /// Cars stopped, walk indication ending.
    RedFlash,
    /// All-red clearance before cars get green again.
    RedWait,
}

impl Phase {
    /// Every phase in cycle order.
    pub const ALL: [Phase; 5] = [
        Phase::Green,
        Phase::Yellow,
        Phase::RedWalk,
        Phase::RedFlash,
        Phase::RedWait,
    ];

    /// The phase a freshly built controller starts in.
    pub const INITIAL: Phase = Phase::Green;

    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::RedWalk => "RedWalk",
            Self::RedFlash => "RedFlash",
            Self::RedWait => "RedWait",
        }
    }

    /// Signals in effect while this phase is current.
    pub const fn outputs(&self) -> Outputs {
        match self {
            Self::Green => Outputs::new(CarSignal::Green, PedSignal::DontWalk),
            Self::Yellow => Outputs::new(CarSignal::Yellow, PedSignal::DontWalk),
            Self::RedWalk => Outputs::new(CarSignal::Red, PedSignal::Walk),
            Self::RedFlash => Outputs::new(CarSignal::Red, PedSignal::Flashing),
            Self::RedWait => Outputs::new(CarSignal::Red, PedSignal::DontWalk),
        }
    }

    /// Whether a button press in this phase is latched.
    pub const fn accepts_requests(&self) -> bool {
        matches!(self, Self::Green)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_name_returns_correct_value() {
        assert_eq!(Phase::Green.name(), "Green");
        assert_eq!(Phase::Yellow.name(), "Yellow");
        assert_eq!(Phase::RedWalk.name(), "RedWalk");
        assert_eq!(Phase::RedFlash.name(), "RedFlash");
        assert_eq!(Phase::RedWait.name(), "RedWait");
    }

    #[test]
    fn outputs_follow_the_signal_table() {
        use CarSignal as C;
        use PedSignal as P;

        let expected = [
            (Phase::Green, C::Green, P::DontWalk),
            (Phase::Yellow, C::Yellow, P::DontWalk),
            (Phase::RedWalk, C::Red, P::Walk),
            (Phase::RedFlash, C::Red, P::Flashing),
            (Phase::RedWait, C::Red, P::DontWalk),
        ];

        for (phase, car, ped) in expected {
            assert_eq!(phase.outputs(), Outputs::new(car, ped), "{phase}");
        }
    }

    #[test]
    fn only_green_accepts_requests() {
        for phase in Phase::ALL {
            assert_eq!(phase.accepts_requests(), phase == Phase::Green);
        }
    }

    #[test]
    fn default_is_initial_phase() {
        assert_eq!(Phase::default(), Phase::INITIAL);
        assert_eq!(Phase::INITIAL, Phase::Green);
    }

    #[test]
    fn phase_serializes_correctly() {
        let json = serde_json::to_string(&Phase::RedWalk).unwrap();
        assert_eq!(json, "\"RedWalk\"");
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Phase::RedWalk);
    }
}
