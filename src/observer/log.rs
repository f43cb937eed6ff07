//! # Tracing observer.
//!
//! [`LogObserver`] turns notifications into structured `tracing` events:
//! transitions at `INFO`, per-tick output updates at `TRACE`.
//!
//! ```text
//! INFO  crosswalk::observer: phase changed from=Yellow to=RedWalk car=red ped=walk trigger="timeout & walk = true"
//! TRACE crosswalk::observer: outputs updated phase=RedWalk car=red ped=walk elapsed_ms=200 queued=false
//! ```

use super::{Notification, Observer};
use crate::core::saturating_millis;

/// Structured logging observer.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_notification(&mut self, notification: &Notification) {
        match notification {
            Notification::StateChanged(e) => {
                tracing::info!(
                    target: "crosswalk::observer",
                    from = %e.previous,
                    to = %e.current,
                    car = %e.outputs.car,
                    ped = %e.outputs.ped,
                    trigger = %e.trigger,
                    "phase changed"
                );
            }
            Notification::OutputsUpdated(e) => {
                tracing::trace!(
                    target: "crosswalk::observer",
                    phase = %e.phase,
                    car = %e.outputs.car,
                    ped = %e.outputs.ped,
                    elapsed_ms = saturating_millis(e.elapsed),
                    queued = e.request_queued,
                    "outputs updated"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
