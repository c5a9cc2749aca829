//! Change listeners and polling feedback.
//!
//! A monitored storage pushes batches of signed deltas to its registered
//! [`MonitorReceiver`]s. Registration pairs each receiver with a
//! [`ListenerToken`]; before every delivery the receiver is asked whether it
//! still considers itself valid for that token, and is dropped from the
//! registry if not. There is no other cleanup.
//!
//! Every batch carries the [`MonitorId`] of the storage that produced it.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::action::ActionSource;
use crate::stack::StorageStack;

/// Opaque token a receiver registered with.
///
/// Receivers typically compare it against a generation or network id they
/// hold to decide whether they still care about a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerToken(pub u64);

/// Identifies the monitor a change batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonitorId(u64);

impl MonitorId {
    /// Creates an id from a raw value.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns an id no earlier call in this process has returned.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monitor#{}", self.0)
    }
}

/// Observer of a monitored storage.
pub trait MonitorReceiver: Send + Sync + 'static {
    /// Returns `true` while this receiver wants notifications for `token`.
    fn is_valid(&self, token: &ListenerToken) -> bool;

    /// Receives one batch of deltas from `monitor`.
    ///
    /// Positive amounts are items that appeared, negative ones items that
    /// disappeared. `source` is whatever the monitor last recorded.
    fn post_change(
        &self,
        monitor: MonitorId,
        changes: &[StorageStack],
        source: Option<&ActionSource>,
    );
}

/// Listener registration for a monitored storage.
pub trait MeMonitor {
    /// Registers `receiver` with `token`, replacing any earlier token for it.
    fn add_listener(&mut self, receiver: Arc<dyn MonitorReceiver>, token: ListenerToken);

    /// Unregisters `receiver`.
    fn remove_listener(&mut self, receiver: &Arc<dyn MonitorReceiver>);
}

/// Polling feedback from a [`TickingMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickRateModulation {
    /// Nothing to do for a while; poll at the slowest rate.
    Idle,
    /// Nothing changed; back off a little.
    Slower,
    /// Keep the current rate.
    Same,
    /// Poll somewhat more often.
    Faster,
    /// Things are changing; poll at the fastest rate.
    Urgent,
    /// Stop polling until explicitly woken.
    Sleep,
}

/// A storage that discovers changes by being polled.
pub trait TickingMonitor {
    /// Polls once and reports how soon the next poll should happen.
    fn on_tick(&mut self) -> TickRateModulation;

    /// Records the source forwarded with subsequent change batches.
    fn set_action_source(&mut self, source: ActionSource);
}
