//! A receiver that folds change batches into a local view.

use core::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotlink_inventory::ItemKey;

use crate::action::ActionSource;
use crate::list::ResourceList;
use crate::monitor::{ListenerToken, MonitorId, MonitorReceiver};
use crate::stack::StorageStack;

#[derive(Debug, Default)]
struct CacheState {
    items: ResourceList,
    last_source: Option<ActionSource>,
    last_monitor: Option<MonitorId>,
    batches: usize,
}

/// Keeps a running total of everything a monitor has reported.
///
/// This is what a network-side index does with a monitor's deltas: apply
/// them to the previous view. Starting from an empty view and feeding every
/// batch from the first reconciliation on, the cache holds exactly the
/// monitored contents.
///
/// The cache accepts notifications only for the token it was created with
/// and stops accepting them once [`invalidate`](Self::invalidate)d.
#[derive(Debug)]
pub struct MonitorCache {
    token: ListenerToken,
    valid: AtomicBool,
    state: Mutex<CacheState>,
}

impl MonitorCache {
    /// Creates an empty cache bound to `token`.
    #[must_use]
    pub fn new(token: ListenerToken) -> Self {
        Self {
            token,
            valid: AtomicBool::new(true),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Marks the cache as no longer interested in notifications.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Returns a copy of the current view.
    #[must_use]
    pub fn snapshot(&self) -> ResourceList {
        self.state.lock().items.clone()
    }

    /// Returns the cached amount of `key`.
    #[must_use]
    pub fn amount_of(&self, key: &ItemKey) -> i64 {
        self.state.lock().items.amount_of(key)
    }

    /// Returns the source of the most recent batch.
    #[must_use]
    pub fn last_source(&self) -> Option<ActionSource> {
        self.state.lock().last_source.clone()
    }

    /// Returns the monitor that sent the most recent batch.
    #[must_use]
    pub fn last_monitor(&self) -> Option<MonitorId> {
        self.state.lock().last_monitor
    }

    /// Returns how many batches have been applied.
    #[must_use]
    pub fn batches_received(&self) -> usize {
        self.state.lock().batches
    }
}

impl MonitorReceiver for MonitorCache {
    fn is_valid(&self, token: &ListenerToken) -> bool {
        self.valid.load(Ordering::Acquire) && *token == self.token
    }

    fn post_change(
        &self,
        monitor: MonitorId,
        changes: &[StorageStack],
        source: Option<&ActionSource>,
    ) {
        let mut state = self.state.lock();
        state.items.extend(changes.iter().cloned());
        state.items.prune();
        state.last_source = source.cloned();
        state.last_monitor = Some(monitor);
        state.batches += 1;

        tracing::trace!(
            %monitor,
            changes = changes.len(),
            distinct = state.items.len(),
            "applied change batch"
        );
    }
}
