//! The slot inventory capability and its re-resolution seam.
//!
//! A [`SlotInventory`] is a live handle to someone else's container. The
//! owner of that container may swap or drop it at any time, so adapters do
//! not hold on to a handle forever: they ask an [`InventoryProvider`] for a
//! fresh one and fall back to [`NullInventory`] when none is offered.

use core::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::InventoryError;
use crate::stack::ItemStack;

// ─────────────────────────────────────────────────────────────────────────────
// SlotInventory
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered list of slots, each holding at most one [`ItemStack`].
///
/// Both mutating operations take a `simulate` flag; when it is `true` the
/// inventory must report what *would* happen without changing anything.
///
/// # Contract
///
/// - `insert_item` returns the part of `stack` that did not fit (`None` if
///   everything was accepted). Returning a value equal to the input means
///   the slot accepted nothing.
/// - `extract_item` returns at most `amount` items from the slot (`None` if
///   nothing was extracted).
///
/// Implementations are not trusted to honor this. See the crate docs.
pub trait SlotInventory: Send + Sync + 'static {
    /// Human-readable name used in diagnostics.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }

    /// Returns the current number of slots. May change between calls.
    fn slots(&self) -> usize;

    /// Returns a copy of the contents of `slot`, or `None` if it is empty or out of range.
    fn stack_in_slot(&self, slot: usize) -> Option<ItemStack>;

    /// Attempts to insert `stack` into `slot`, returning the leftover.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is out of range or the inventory fails.
    fn insert_item(
        &self,
        slot: usize,
        stack: ItemStack,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError>;

    /// Attempts to extract up to `amount` items from `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is out of range or the inventory fails.
    fn extract_item(
        &self,
        slot: usize,
        amount: u32,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError>;
}

impl fmt::Debug for dyn SlotInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotInventory")
            .field("name", &self.name())
            .field("slots", &self.slots())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// NullInventory
// ─────────────────────────────────────────────────────────────────────────────

/// A stateless inventory with no slots.
///
/// Stands in for a capability that has disappeared. Every insert is
/// rejected and every extract yields nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInventory;

impl NullInventory {
    /// Returns a shared handle to a `NullInventory`.
    #[must_use]
    pub fn shared() -> Arc<dyn SlotInventory> {
        Arc::new(Self)
    }
}

impl SlotInventory for NullInventory {
    fn name(&self) -> &str {
        "NullInventory"
    }

    fn slots(&self) -> usize {
        0
    }

    fn stack_in_slot(&self, _slot: usize) -> Option<ItemStack> {
        None
    }

    fn insert_item(
        &self,
        _slot: usize,
        stack: ItemStack,
        _simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        Ok(Some(stack))
    }

    fn extract_item(
        &self,
        _slot: usize,
        _amount: u32,
        _simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        Ok(None)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Facing
// ─────────────────────────────────────────────────────────────────────────────

/// The side of a container an adapter is attached to.
///
/// Containers may expose different capabilities per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Negative Y.
    Down,
    /// Positive Y.
    Up,
    /// Negative Z.
    North,
    /// Positive Z.
    South,
    /// Negative X.
    West,
    /// Positive X.
    East,
}

// ─────────────────────────────────────────────────────────────────────────────
// InventoryProvider
// ─────────────────────────────────────────────────────────────────────────────

/// Resolves the current inventory capability of a container.
///
/// Called again on every full reconciliation; the answer may change or
/// become `None` at any time.
pub trait InventoryProvider: Send + Sync + 'static {
    /// Returns the capability exposed on `facing`, if any.
    fn inventory(&self, facing: Facing) -> Option<Arc<dyn SlotInventory>>;
}

impl InventoryProvider for Arc<dyn SlotInventory> {
    fn inventory(&self, _facing: Facing) -> Option<Arc<dyn SlotInventory>> {
        Some(Arc::clone(self))
    }
}

/// A swappable capability slot, usable as an [`InventoryProvider`].
///
/// The owning side calls [`set`](Self::set) and [`clear`](Self::clear) as its
/// container comes and goes; adapters observe the change the next time they
/// re-resolve. The same capability is offered on every facing.
#[derive(Default)]
pub struct CapabilityCell {
    current: RwLock<Option<Arc<dyn SlotInventory>>>,
}

impl CapabilityCell {
    /// Creates a cell holding `inventory`.
    #[must_use]
    pub fn new(inventory: Arc<dyn SlotInventory>) -> Self {
        Self {
            current: RwLock::new(Some(inventory)),
        }
    }

    /// Creates a cell with no capability.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the current capability.
    pub fn set(&self, inventory: Arc<dyn SlotInventory>) {
        *self.current.write() = Some(inventory);
    }

    /// Removes the current capability.
    pub fn clear(&self) {
        *self.current.write() = None;
    }

    /// Returns the current capability.
    #[must_use]
    pub fn get(&self) -> Option<Arc<dyn SlotInventory>> {
        self.current.read().clone()
    }
}

impl fmt::Debug for CapabilityCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityCell")
            .field("current", &self.current.read().as_ref().map(|inv| inv.name().to_owned()))
            .finish()
    }
}

impl InventoryProvider for CapabilityCell {
    fn inventory(&self, _facing: Facing) -> Option<Arc<dyn SlotInventory>> {
        self.get()
    }
}
