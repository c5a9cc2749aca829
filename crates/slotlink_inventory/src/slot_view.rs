//! Single-slot views over another inventory.

use std::sync::Arc;

use crate::error::InventoryError;
use crate::inventory::SlotInventory;
use crate::stack::ItemStack;

type SlotFilter = dyn Fn(&ItemStack) -> bool + Send + Sync;

/// Exposes one slot of another inventory as a one-slot inventory.
///
/// An optional filter narrows what may be inserted; extraction is never
/// filtered. The view reports zero slots while the underlying slot does not
/// exist.
pub struct SlotView {
    inner: Arc<dyn SlotInventory>,
    slot: usize,
    filter: Option<Arc<SlotFilter>>,
}

impl core::fmt::Debug for SlotView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlotView")
            .field("inner", &self.inner.name())
            .field("slot", &self.slot)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl SlotView {
    /// Creates a view of `slot` in `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn SlotInventory>, slot: usize) -> Self {
        Self {
            inner,
            slot,
            filter: None,
        }
    }

    /// Only accepts inserts for which `filter` returns `true`.
    #[must_use]
    pub fn with_filter(
        mut self,
        filter: impl Fn(&ItemStack) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Returns the wrapped slot index.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    fn accepts(&self, stack: &ItemStack) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(stack))
    }
}

impl SlotInventory for SlotView {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn slots(&self) -> usize {
        usize::from(self.slot < self.inner.slots())
    }

    fn stack_in_slot(&self, slot: usize) -> Option<ItemStack> {
        if slot != 0 {
            return None;
        }
        self.inner.stack_in_slot(self.slot)
    }

    fn insert_item(
        &self,
        slot: usize,
        stack: ItemStack,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        InventoryError::check_slot(slot, 1)?;
        if !self.accepts(&stack) {
            return Ok(Some(stack));
        }
        self.inner.insert_item(self.slot, stack, simulate)
    }

    fn extract_item(
        &self,
        slot: usize,
        amount: u32,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        InventoryError::check_slot(slot, 1)?;
        self.inner.extract_item(self.slot, amount, simulate)
    }
}
