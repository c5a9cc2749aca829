//! Listener registry with lazy liveness checks.

use core::hash::{Hash, Hasher};
use std::sync::Arc;

use hashbrown::HashMap;
use slotlink_storage::{ActionSource, ListenerToken, MonitorId, MonitorReceiver, StorageStack};

/// Registry key comparing receivers by allocation, not by value.
struct ReceiverKey(Arc<dyn MonitorReceiver>);

impl ReceiverKey {
    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for ReceiverKey {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.addr(), other.addr())
    }
}

impl Eq for ReceiverKey {}

impl Hash for ReceiverKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

/// Receivers registered with a monitor, each paired with its token.
///
/// Delivery order is unspecified. A receiver that reports itself invalid
/// for its token is removed during [`post`](Self::post) and is not notified.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: HashMap<ReceiverKey, ListenerToken>,
}

impl core::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.entries.len())
            .finish()
    }
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `receiver`, replacing its previous token if already present.
    pub fn insert(&mut self, receiver: Arc<dyn MonitorReceiver>, token: ListenerToken) {
        self.entries.insert(ReceiverKey(receiver), token);
    }

    /// Unregisters `receiver`. Returns its token if it was registered.
    pub fn remove(&mut self, receiver: &Arc<dyn MonitorReceiver>) -> Option<ListenerToken> {
        self.entries.remove(&ReceiverKey(Arc::clone(receiver)))
    }

    /// Returns `true` if `receiver` is registered.
    #[must_use]
    pub fn contains(&self, receiver: &Arc<dyn MonitorReceiver>) -> bool {
        self.entries.contains_key(&ReceiverKey(Arc::clone(receiver)))
    }

    /// Returns the number of registered receivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `changes` from `monitor` to every valid receiver, pruning
    /// the invalid ones.
    ///
    /// Each receiver gets the whole batch in a single call. Returns the
    /// number of receivers pruned.
    pub fn post(
        &mut self,
        monitor: MonitorId,
        changes: &[StorageStack],
        source: Option<&ActionSource>,
    ) -> usize {
        let before = self.entries.len();
        self.entries.retain(|receiver, token| {
            if receiver.0.is_valid(token) {
                receiver.0.post_change(monitor, changes, source);
                true
            } else {
                false
            }
        });
        before - self.entries.len()
    }
}
