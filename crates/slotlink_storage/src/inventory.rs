//! The network-facing inventory contract.

use crate::action::{ActionSource, Actionable};
use crate::list::ResourceList;
use crate::stack::{StorageChannel, StorageStack};

/// A storage the network can insert into, extract from and list.
///
/// Implementations never fail across this boundary: a full target, an empty
/// source or a misbehaving backend all degrade to well-defined results.
pub trait MeInventory {
    /// Offers `input` to the storage.
    ///
    /// Returns what could not be stored, or `None` if everything was. When
    /// nothing at all was accepted the returned stack equals `input`.
    fn inject_items(
        &mut self,
        input: &StorageStack,
        mode: Actionable,
        source: &ActionSource,
    ) -> Option<StorageStack>;

    /// Requests up to `request.amount()` items of `request`'s kind.
    ///
    /// Returns what was (or, when simulating, would be) extracted, or `None`
    /// if nothing was available.
    fn extract_items(
        &mut self,
        request: &StorageStack,
        mode: Actionable,
        source: &ActionSource,
    ) -> Option<StorageStack>;

    /// Appends the current contents to `out` and returns it.
    fn available_items<'a>(&self, out: &'a mut ResourceList) -> &'a mut ResourceList;

    /// Returns the resource kind this storage handles.
    fn channel(&self) -> StorageChannel;
}
