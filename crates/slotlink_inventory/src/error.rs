//! Error types for inventory capabilities.

/// Errors reported by a [`SlotInventory`](crate::SlotInventory).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    /// The slot index is past the end of the inventory.
    #[error("slot {slot} out of range for inventory with {slots} slots")]
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// The number of slots the inventory exposes.
        slots: usize,
    },

    /// The inventory failed in a way it could not describe more precisely.
    #[error("inventory '{inventory}' failed: {reason}")]
    Fault {
        /// Name of the failing inventory.
        inventory: String,
        /// What went wrong.
        reason: String,
    },
}

impl InventoryError {
    /// Creates a [`Fault`](Self::Fault).
    pub fn fault(inventory: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fault {
            inventory: inventory.into(),
            reason: reason.into(),
        }
    }

    /// Checks `slot` against `slots`, returning [`SlotOutOfRange`](Self::SlotOutOfRange) if it is past the end.
    pub fn check_slot(slot: usize, slots: usize) -> Result<(), Self> {
        if slot < slots {
            Ok(())
        } else {
            Err(Self::SlotOutOfRange { slot, slots })
        }
    }
}
