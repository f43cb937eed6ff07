//! Errors raised at the controller boundary.
//!
//! The machine itself cannot fail; these cover bad host input and bad
//! construction parameters.

use crate::core::Phase;
use thiserror::Error;

/// A tick delta the controller refuses to apply.
///
/// Rejected ticks leave the controller untouched and emit no notification.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum TickError {
    #[error("tick delta must not be negative (got {millis} ms)")]
    NegativeMillis { millis: i64 },

    #[error("tick delta must not be negative (got {seconds} s)")]
    NegativeSeconds { seconds: f64 },

    #[error("tick delta must be finite (got {seconds})")]
    NonFinite { seconds: f64 },

    #[error("tick delta {seconds} s is too large to represent")]
    Overflow { seconds: f64 },
}

impl TickError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NegativeMillis { .. } | Self::NegativeSeconds { .. } => "tick_negative",
            Self::NonFinite { .. } => "tick_non_finite",
            Self::Overflow { .. } => "tick_overflow",
        }
    }
}

/// Errors that can occur when building a controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("duration for phase {phase} is zero. Every phase needs a positive duration")]
    ZeroDuration { phase: Phase },
}
