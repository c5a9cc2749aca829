//! Several inventories flattened into one slot range.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::InventoryError;
use crate::inventory::SlotInventory;
use crate::stack::ItemStack;

/// Where one member inventory starts in the combined slot range.
#[derive(Debug, Clone, Copy)]
struct Segment {
    offset: usize,
    size: usize,
}

#[derive(Debug, Default)]
struct Layout {
    members: Vec<Arc<dyn SlotInventory>>,
    segments: Vec<Segment>,
    total: usize,
}

impl Layout {
    fn new(members: Vec<Arc<dyn SlotInventory>>) -> Self {
        let mut segments = Vec::with_capacity(members.len());
        let mut offset = 0;
        for member in &members {
            let size = member.slots();
            segments.push(Segment { offset, size });
            offset += size;
        }

        Self {
            members,
            segments,
            total: offset,
        }
    }

    /// Maps a combined slot to `(member index, local slot)`.
    fn locate(&self, slot: usize) -> Option<(usize, usize)> {
        if slot >= self.total {
            return None;
        }
        // First segment that ends after `slot`; empty segments are skipped naturally.
        let index = self
            .segments
            .partition_point(|segment| segment.offset + segment.size <= slot);
        let segment = self.segments.get(index)?;
        Some((index, slot - segment.offset))
    }
}

/// Exposes several inventories back to back as a single inventory.
///
/// Slot `0` is the first slot of the first member; the slots of the second
/// member follow the last slot of the first, and so on. Member sizes are
/// captured when the chain is built (or [`recalculate`](Self::recalculate)d),
/// so a member that grows later only exposes its original slots.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use slotlink_inventory::{BasicInventory, ChainedInventory, SlotInventory};
///
/// let chain = ChainedInventory::new(vec![
///     Arc::new(BasicInventory::new(2, 64)),
///     Arc::new(BasicInventory::new(3, 64)),
/// ]);
///
/// assert_eq!(chain.slots(), 5);
/// assert_eq!(chain.local_slot(3), Some(1));
/// ```
pub struct ChainedInventory {
    layout: RwLock<Layout>,
}

impl core::fmt::Debug for ChainedInventory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let layout = self.layout.read();
        f.debug_struct("ChainedInventory")
            .field("members", &layout.members.len())
            .field("slots", &layout.total)
            .finish()
    }
}

impl ChainedInventory {
    /// Chains `members` in order.
    #[must_use]
    pub fn new(members: Vec<Arc<dyn SlotInventory>>) -> Self {
        Self {
            layout: RwLock::new(Layout::new(members)),
        }
    }

    /// Re-reads every member's slot count.
    pub fn recalculate(&self) {
        let mut layout = self.layout.write();
        let before = layout.total;
        let members = core::mem::take(&mut layout.members);
        *layout = Layout::new(members);

        if layout.total != before {
            tracing::debug!(before, after = layout.total, "chained inventory resized");
        }
    }

    /// Moves the last member to the front.
    ///
    /// Useful for spreading inserts across members over time.
    pub fn cycle_order(&self) {
        let mut layout = self.layout.write();
        if layout.members.len() < 2 {
            return;
        }
        let mut members = core::mem::take(&mut layout.members);
        members.rotate_right(1);
        *layout = Layout::new(members);
    }

    /// Returns the member inventory that owns `slot`.
    #[must_use]
    pub fn inventory_for(&self, slot: usize) -> Option<Arc<dyn SlotInventory>> {
        let layout = self.layout.read();
        layout
            .locate(slot)
            .map(|(index, _)| Arc::clone(&layout.members[index]))
    }

    /// Returns `slot` translated into its member's own numbering.
    #[must_use]
    pub fn local_slot(&self, slot: usize) -> Option<usize> {
        self.layout.read().locate(slot).map(|(_, local)| local)
    }

    fn route(&self, slot: usize) -> Result<(Arc<dyn SlotInventory>, usize), InventoryError> {
        let layout = self.layout.read();
        let (index, local) = layout.locate(slot).ok_or(InventoryError::SlotOutOfRange {
            slot,
            slots: layout.total,
        })?;
        Ok((Arc::clone(&layout.members[index]), local))
    }
}

impl SlotInventory for ChainedInventory {
    fn name(&self) -> &str {
        "ChainedInventory"
    }

    fn slots(&self) -> usize {
        self.layout.read().total
    }

    fn stack_in_slot(&self, slot: usize) -> Option<ItemStack> {
        let (member, local) = self.route(slot).ok()?;
        member.stack_in_slot(local)
    }

    fn insert_item(
        &self,
        slot: usize,
        stack: ItemStack,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        let (member, local) = self.route(slot)?;
        member.insert_item(local, stack, simulate)
    }

    fn extract_item(
        &self,
        slot: usize,
        amount: u32,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        let (member, local) = self.route(slot)?;
        member.extract_item(local, amount, simulate)
    }
}
