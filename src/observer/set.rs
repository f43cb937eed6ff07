//! # ObserverSet: ordered synchronous fan-out
//!
//! [`ObserverSet`] delivers each [`Notification`] to every registered
//! observer, in registration order, before `notify` returns.
//!
//! ```text
//!    notify(&Notification)
//!        ├──► observer #1 ─► on_notification()
//!        ├──► observer #2 ─► on_notification()
//!        └──► observer #N ─► on_notification()
//! ```

use super::{Notification, Observer};
use std::fmt;

/// Handle returned by [`ObserverSet::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

struct Entry {
    id: SubscriptionId,
    observer: Box<dyn Observer>,
}

/// Ordered collection of observers.
#[derive(Default)]
pub struct ObserverSet {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ObserverSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; it receives every later notification.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        tracing::trace!(%id, observer = observer.name(), "observer subscribed");
        self.entries.push(Entry { id, observer });
        id
    }

    /// Remove an observer. Returns `false` if `id` is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::trace!(%id, "observer unsubscribed");
        }
        removed
    }

    /// Deliver `notification` to every observer in registration order.
    pub fn notify(&mut self, notification: &Notification) {
        for entry in &mut self.entries {
            entry.observer.on_notification(notification);
        }
    }

    /// True if there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.id, e.observer.name())))
            .finish()
    }
}
