//! Item accumulator.

use indexmap::IndexMap;
use slotlink_inventory::ItemKey;

use crate::stack::StorageStack;

/// Accumulates [`StorageStack`]s, merging amounts per [`ItemKey`].
///
/// Adapters append one stack per occupied slot without merging; the list
/// does the merging. Entries keep first-seen order. Entries whose amount
/// reaches zero stay in the list until [`prune`](Self::prune) is called.
///
/// # Example
///
/// ```
/// use slotlink_inventory::ItemKey;
/// use slotlink_storage::{ResourceList, StorageStack};
///
/// let torch = ItemKey::new("minecraft:torch");
/// let mut list = ResourceList::new();
/// list.add_storage(StorageStack::new(torch.clone(), 16));
/// list.add_storage(StorageStack::new(torch.clone(), 5));
///
/// assert_eq!(list.len(), 1);
/// assert_eq!(list.amount_of(&torch), 21);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResourceList {
    entries: IndexMap<ItemKey, i64>,
}

impl ResourceList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Adds `stack` to the list, merging with an existing entry for the same item.
    ///
    /// Negative amounts subtract.
    pub fn add_storage(&mut self, stack: StorageStack) {
        let amount = stack.amount();
        *self.entries.entry(stack.key().clone()).or_insert(0) += amount;
    }

    /// Returns the merged stack for `key`.
    #[must_use]
    pub fn find(&self, key: &ItemKey) -> Option<StorageStack> {
        self.entries
            .get(key)
            .map(|amount| StorageStack::new(key.clone(), *amount))
    }

    /// Returns the merged amount for `key`, or zero.
    #[must_use]
    pub fn amount_of(&self, key: &ItemKey) -> i64 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    /// Removes entries whose amount is zero.
    pub fn prune(&mut self) {
        self.entries.retain(|_, amount| *amount != 0);
    }

    /// Iterates over the merged stacks in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = StorageStack> + '_ {
        self.entries
            .iter()
            .map(|(key, amount)| StorageStack::new(key.clone(), *amount))
    }

    /// Returns the number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sum of all amounts.
    #[must_use]
    pub fn total_amount(&self) -> i64 {
        self.entries.values().sum()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Extend<StorageStack> for ResourceList {
    fn extend<I: IntoIterator<Item = StorageStack>>(&mut self, iter: I) {
        for stack in iter {
            self.add_storage(stack);
        }
    }
}

impl FromIterator<StorageStack> for ResourceList {
    fn from_iter<I: IntoIterator<Item = StorageStack>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str) -> ItemKey {
        ItemKey::new(id)
    }

    #[test]
    fn merges_by_key_and_keeps_order() {
        let list: ResourceList = [
            StorageStack::new(key("minecraft:b"), 2),
            StorageStack::new(key("minecraft:a"), 1),
            StorageStack::new(key("minecraft:b"), 3),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = list.iter().map(|s| s.key().id().to_owned()).collect();
        assert_eq!(order, ["minecraft:b", "minecraft:a"]);
        assert_eq!(list.amount_of(&key("minecraft:b")), 5);
        assert_eq!(list.total_amount(), 6);
    }

    #[test]
    fn negative_amounts_subtract_and_prune_removes_zeroes() {
        let mut list = ResourceList::new();
        list.add_storage(StorageStack::new(key("minecraft:a"), 4));
        list.add_storage(StorageStack::new(key("minecraft:a"), -4));

        assert_eq!(list.len(), 1);
        assert_eq!(list.find(&key("minecraft:a")).map(|s| s.amount()), Some(0));

        list.prune();
        assert!(list.is_empty());
        assert_eq!(list.find(&key("minecraft:a")), None);
    }
}
