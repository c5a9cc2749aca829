//! Per-slot cache of what the adapter last saw.

use slotlink_inventory::ItemStack;
use slotlink_storage::StorageStack;

/// The adapter's view of each slot as of the last reconciliation.
///
/// Two parallel vectors indexed by slot: the raw stack, used for identity
/// comparisons, and its network-facing summary. An entry is `None` in both
/// exactly when the slot was empty.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    stacks: Vec<Option<ItemStack>>,
    resources: Vec<Option<StorageStack>>,
}

impl Snapshot {
    /// Creates an empty, zero-length snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    /// Returns `true` if no slots are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Returns the cached raw stack of `slot`.
    #[must_use]
    pub fn stack(&self, slot: usize) -> Option<&ItemStack> {
        self.stacks.get(slot)?.as_ref()
    }

    /// Returns the cached summary of `slot`.
    #[must_use]
    pub fn resource(&self, slot: usize) -> Option<&StorageStack> {
        self.resources.get(slot)?.as_ref()
    }

    /// Extends the snapshot with empty slots up to `slots`. Never shrinks.
    pub(crate) fn grow_to(&mut self, slots: usize) {
        if slots > self.stacks.len() {
            self.stacks.resize(slots, None);
            self.resources.resize(slots, None);
        }
    }

    /// Drops every slot from `slots` on, recording a removal for each occupied one.
    pub(crate) fn shrink_to(&mut self, slots: usize, changes: &mut Vec<StorageStack>) {
        if slots >= self.stacks.len() {
            return;
        }
        changes.extend(
            self.resources[slots..]
                .iter()
                .flatten()
                .map(StorageStack::negated),
        );
        self.stacks.truncate(slots);
        self.resources.truncate(slots);
    }

    /// Replaces the occupant of `slot`, recording its removal and the newcomer's arrival.
    pub(crate) fn replace(
        &mut self,
        slot: usize,
        stack: Option<ItemStack>,
        changes: &mut Vec<StorageStack>,
    ) {
        let resource = stack.as_ref().and_then(StorageStack::from_item);

        if let Some(old) = &self.resources[slot] {
            changes.push(old.negated());
        }
        if let Some(new) = &resource {
            changes.push(new.clone());
        }

        self.stacks[slot] = stack;
        self.resources[slot] = resource;
    }

    /// Updates the count of the same item in `slot`, recording the difference.
    ///
    /// The cached summary keeps its original identity; only its amount moves.
    pub(crate) fn resize_stack(
        &mut self,
        slot: usize,
        stack: ItemStack,
        changes: &mut Vec<StorageStack>,
    ) {
        let Some(old) = self.resources[slot].clone() else {
            self.replace(slot, Some(stack), changes);
            return;
        };

        let diff = i64::from(stack.count()) - old.amount();
        if diff == 0 {
            return;
        }

        let updated = old.with_amount(i64::from(stack.count()));
        changes.push(old.with_amount(diff));
        self.stacks[slot] = Some(stack);
        self.resources[slot] = Some(updated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotlink_inventory::ItemKey;

    fn wool(count: u32) -> ItemStack {
        ItemStack::new(ItemKey::new("minecraft:white_wool"), count)
    }

    fn amounts(changes: &[StorageStack]) -> Vec<i64> {
        changes.iter().map(StorageStack::amount).collect()
    }

    #[test]
    fn grow_fills_empty_slots() {
        let mut snapshot = Snapshot::new();
        snapshot.grow_to(3);
        snapshot.grow_to(1);

        assert_eq!(snapshot.len(), 3);
        assert!(snapshot.stack(2).is_none());
        assert!(snapshot.resource(2).is_none());
    }

    #[test]
    fn replace_emits_removal_then_addition() {
        let mut snapshot = Snapshot::new();
        let mut changes = Vec::new();
        snapshot.grow_to(1);

        snapshot.replace(0, Some(wool(4)), &mut changes);
        snapshot.replace(0, None, &mut changes);

        assert_eq!(amounts(&changes), [4, -4]);
        assert!(snapshot.resource(0).is_none());
    }

    #[test]
    fn resize_stack_emits_signed_difference() {
        let mut snapshot = Snapshot::new();
        let mut changes = Vec::new();
        snapshot.grow_to(1);
        snapshot.replace(0, Some(wool(10)), &mut changes);
        changes.clear();

        snapshot.resize_stack(0, wool(7), &mut changes);
        snapshot.resize_stack(0, wool(7), &mut changes);

        assert_eq!(amounts(&changes), [-3]);
        assert_eq!(snapshot.resource(0).map(StorageStack::amount), Some(7));
        assert_eq!(snapshot.stack(0), Some(&wool(7)));
    }

    #[test]
    fn shrink_removes_only_occupied_slots() {
        let mut snapshot = Snapshot::new();
        let mut changes = Vec::new();
        snapshot.grow_to(4);
        snapshot.replace(3, Some(wool(12)), &mut changes);
        changes.clear();

        snapshot.shrink_to(2, &mut changes);

        assert_eq!(amounts(&changes), [-12]);
        assert_eq!(snapshot.len(), 2);
    }
}
