//! Serializable view of a controller.

use crate::core::{Outputs, Phase};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of everything a renderer needs.
///
/// Times are whole milliseconds so the value prints cleanly as JSON.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub outputs: Outputs,
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
    /// Countdown shown to pedestrians, rounded up
    pub remaining_secs: u64,
    pub request_queued: bool,
    pub uptime_ms: u64,
    pub cycles: u64,
}

impl Default for Snapshot {
    fn default() -> Self {
        let phase = Phase::INITIAL;
        Self {
            phase,
            outputs: phase.outputs(),
            elapsed_ms: 0,
            remaining_ms: 0,
            remaining_secs: 0,
            request_queued: false,
            uptime_ms: 0,
            cycles: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_flat() {
        let snap = Snapshot {
            phase: Phase::RedWalk,
            outputs: Phase::RedWalk.outputs(),
            elapsed_ms: 400,
            remaining_ms: 7600,
            remaining_secs: 8,
            request_queued: false,
            uptime_ms: 8400,
            cycles: 0,
        };

        let json = serde_json::to_value(snap).unwrap();
        assert_eq!(json["phase"], "RedWalk");
        assert_eq!(json["outputs"]["ped"], "Walk");
        assert_eq!(json["remaining_secs"], 8);
    }
}
