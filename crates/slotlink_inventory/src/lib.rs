//! Slot-based inventory capabilities for slotlink (Layer 1).
//!
//! `slotlink_inventory` defines the narrow interface slotlink uses to talk to
//! externally-owned containers, together with a few containers of its own:
//!
//! - [`stack`] - Item identity ([`ItemKey`]) and raw slot contents ([`ItemStack`])
//! - [`comparison`] - Pluggable "same item" predicates ([`ItemComparison`])
//! - [`inventory`] - The [`SlotInventory`] capability and its re-resolution seam
//! - [`basic`] - A plain fixed-limit container ([`BasicInventory`])
//! - [`chained`] - Several inventories exposed as one ([`ChainedInventory`])
//! - [`slot_view`] - A single slot of another inventory ([`SlotView`])
//!
//! # Trust Model
//!
//! A [`SlotInventory`] is foreign code. Its `insert_item`/`extract_item`
//! may reject, partially fulfill, return more than asked for or fail
//! outright. Callers in this workspace clamp and recover at every call site
//! instead of relying on the documented contract.
//!
//! # Example
//!
//! ```
//! use slotlink_inventory::{BasicInventory, ItemKey, ItemStack, SlotInventory};
//!
//! let chest = BasicInventory::new(3, 64);
//! let leftover = chest
//!     .insert_item(0, ItemStack::new(ItemKey::new("minecraft:cobblestone"), 10), false)
//!     .unwrap();
//!
//! assert!(leftover.is_none());
//! assert_eq!(chest.stack_in_slot(0).map(|s| s.count()), Some(10));
//! ```

/// A plain fixed-limit container.
pub mod basic;

/// Several inventories flattened into one slot range.
pub mod chained;

/// "Same item" predicates.
pub mod comparison;

/// Error types for inventory capabilities.
pub mod error;

/// The slot inventory capability and provider seam.
pub mod inventory;

/// Single-slot views over another inventory.
pub mod slot_view;

/// Item identity and stacks.
pub mod stack;

pub use basic::BasicInventory;
pub use chained::ChainedInventory;
pub use comparison::{ExactComparison, ItemComparison, ItemIdComparison};
pub use error::InventoryError;
pub use inventory::{CapabilityCell, Facing, InventoryProvider, NullInventory, SlotInventory};
pub use slot_view::SlotView;
pub use stack::{ItemKey, ItemStack};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::basic::*;
    pub use crate::chained::*;
    pub use crate::comparison::*;
    pub use crate::error::*;
    pub use crate::inventory::*;
    pub use crate::slot_view::*;
    pub use crate::stack::*;
}
