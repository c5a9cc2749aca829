//! Bridges slot-based inventories into a uniform network-storage view.
//!
//! An [`InventoryPort`](slotlink_port::InventoryPort) wraps any
//! [`SlotInventory`](slotlink_inventory::SlotInventory), serves inserts and
//! extracts against it, and reports every change it sees to registered
//! listeners as signed deltas.

pub use slotlink_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use slotlink_internal::prelude::*;
}
