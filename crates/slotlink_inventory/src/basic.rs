//! A plain fixed-limit container.

use parking_lot::Mutex;

use crate::error::InventoryError;
use crate::inventory::SlotInventory;
use crate::stack::ItemStack;

/// A simple inventory where every slot holds up to `slot_limit` items of one kind.
///
/// Slots only stack items with an identical [`ItemKey`](crate::ItemKey). The
/// slot count can be changed at runtime with [`resize`](Self::resize), which
/// drops the contents of removed slots.
///
/// # Example
///
/// ```
/// use slotlink_inventory::{BasicInventory, ItemKey, ItemStack, SlotInventory};
///
/// let chest = BasicInventory::new(2, 16).with_name("chest");
/// let leftover = chest
///     .insert_item(0, ItemStack::new(ItemKey::new("minecraft:egg"), 20), false)
///     .unwrap();
///
/// assert_eq!(leftover.map(|s| s.count()), Some(4));
/// assert_eq!(chest.name(), "chest");
/// ```
#[derive(Debug)]
pub struct BasicInventory {
    name: String,
    slot_limit: u32,
    slots: Mutex<Vec<Option<ItemStack>>>,
}

impl BasicInventory {
    /// Creates an inventory with `slots` empty slots.
    #[must_use]
    pub fn new(slots: usize, slot_limit: u32) -> Self {
        Self {
            name: "BasicInventory".to_owned(),
            slot_limit,
            slots: Mutex::new(vec![None; slots]),
        }
    }

    /// Sets the diagnostic name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the per-slot item limit.
    #[must_use]
    pub fn slot_limit(&self) -> u32 {
        self.slot_limit
    }

    /// Overwrites the contents of `slot`, bypassing the slot limit.
    ///
    /// Models a change made by the container's owner rather than through
    /// the capability.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::SlotOutOfRange`] if `slot` does not exist.
    pub fn set_stack(&self, slot: usize, stack: Option<ItemStack>) -> Result<(), InventoryError> {
        let mut slots = self.slots.lock();
        InventoryError::check_slot(slot, slots.len())?;
        slots[slot] = stack.and_then(ItemStack::non_empty);
        Ok(())
    }

    /// Changes the slot count. New slots are empty; removed slots are discarded.
    pub fn resize(&self, slots: usize) {
        self.slots.lock().resize(slots, None);
    }

    /// Returns a copy of every slot.
    #[must_use]
    pub fn contents(&self) -> Vec<Option<ItemStack>> {
        self.slots.lock().clone()
    }
}

impl SlotInventory for BasicInventory {
    fn name(&self) -> &str {
        &self.name
    }

    fn slots(&self) -> usize {
        self.slots.lock().len()
    }

    fn stack_in_slot(&self, slot: usize) -> Option<ItemStack> {
        self.slots.lock().get(slot).cloned().flatten()
    }

    fn insert_item(
        &self,
        slot: usize,
        stack: ItemStack,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        let mut slots = self.slots.lock();
        InventoryError::check_slot(slot, slots.len())?;

        if stack.is_empty() {
            return Ok(None);
        }

        let (present, room) = match &slots[slot] {
            None => (0, self.slot_limit),
            Some(existing) if existing.key() == stack.key() => {
                (existing.count(), self.slot_limit.saturating_sub(existing.count()))
            }
            Some(_) => return Ok(Some(stack)),
        };

        let accepted = room.min(stack.count());
        if accepted == 0 {
            return Ok(Some(stack));
        }

        if !simulate {
            slots[slot] = Some(stack.with_count(present + accepted));
        }

        Ok(stack.with_count(stack.count() - accepted).non_empty())
    }

    fn extract_item(
        &self,
        slot: usize,
        amount: u32,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        let mut slots = self.slots.lock();
        InventoryError::check_slot(slot, slots.len())?;

        let Some(existing) = slots[slot].as_mut() else {
            return Ok(None);
        };

        if simulate {
            return Ok(existing.with_count(amount.min(existing.count())).non_empty());
        }

        let extracted = existing.split(amount);
        if existing.is_empty() {
            slots[slot] = None;
        }
        Ok(extracted)
    }
}
