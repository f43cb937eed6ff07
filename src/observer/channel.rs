//! Channel-backed observer for message-passing hosts.

use super::{Notification, Observer};
use tokio::sync::mpsc;

/// Forwards every notification onto an unbounded tokio channel.
///
/// Sending never blocks, so it is safe to call from inside `tick`. Once the
/// receiver is dropped notifications are discarded and a single warning is
/// logged.
///
/// # Example
/// ```rust
/// use crosswalk::observer::{ChannelObserver, Notification};
/// use crosswalk::Controller;
/// use std::time::Duration;
///
/// let (observer, mut rx) = ChannelObserver::channel();
/// let mut controller = Controller::default();
/// controller.subscribe(observer);
///
/// controller.tick(Duration::from_millis(200));
/// assert!(matches!(rx.try_recv(), Ok(Notification::OutputsUpdated(_))));
/// ```
#[derive(Debug)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<Notification>,
    closed: bool,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx, closed: false }
    }

    /// Create an observer together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Observer for ChannelObserver {
    fn on_notification(&mut self, notification: &Notification) {
        if self.tx.send(*notification).is_err() && !self.closed {
            self.closed = true;
            tracing::warn!("notification receiver dropped; discarding further notifications");
        }
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
