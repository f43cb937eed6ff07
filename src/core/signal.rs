//! Signal outputs driven by the controller.
//!
//! Car and pedestrian signals are never set on their own: they are derived
//! from the current [`Phase`](super::Phase) every time it is read or changed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Color shown to vehicle traffic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CarSignal {
    Green,
    Yellow,
    Red,
}

/// Indication shown to pedestrians.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PedSignal {
    Walk,
    DontWalk,
    /// Walk is ending; pedestrians already crossing should finish.
    Flashing,
}

impl fmt::Display for CarSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        })
    }
}

impl fmt::Display for PedSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Walk => "walk",
            Self::DontWalk => "don't walk",
            Self::Flashing => "flashing",
        })
    }
}

/// The pair of signals in effect for one phase.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::{CarSignal, Outputs, Phase, PedSignal};
///
/// let outputs = Phase::RedWalk.outputs();
/// assert_eq!(outputs, Outputs { car: CarSignal::Red, ped: PedSignal::Walk });
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Outputs {
    pub car: CarSignal,
    pub ped: PedSignal,
}

impl Outputs {
    /// Build an output pair.
    pub const fn new(car: CarSignal, ped: PedSignal) -> Self {
        Self { car, ped }
    }
}

impl fmt::Display for Outputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car={} ped={}", self.car, self.ped)
    }
}
