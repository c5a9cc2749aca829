//! Containment for inventory calls.
//!
//! A [`SlotInventory`] belongs to whoever placed the block, not to the
//! network. A panic inside one of its methods must not unwind through the
//! port, so every call the port makes goes through [`read`] or [`call`],
//! which turn a panic into [`InventoryError::Fault`].

use core::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use slotlink_inventory::{InventoryError, SlotInventory};

/// Runs an infallible inventory method, catching a panic as a fault.
pub(crate) fn read<T>(
    inventory: &dyn SlotInventory,
    op: impl FnOnce() -> T,
) -> Result<T, InventoryError> {
    catch_unwind(AssertUnwindSafe(op))
        .map_err(|payload| InventoryError::fault(inventory.name(), panic_message(&*payload)))
}

/// Runs a fallible inventory method, folding a caught panic into its error.
pub(crate) fn call<T>(
    inventory: &dyn SlotInventory,
    op: impl FnOnce() -> Result<T, InventoryError>,
) -> Result<T, InventoryError> {
    read(inventory, op)?
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotlink_inventory::NullInventory;

    #[test]
    fn panics_become_faults() {
        let inventory = NullInventory;

        let error = read(&inventory, || -> usize { panic!("slot table torn") }).unwrap_err();

        assert_eq!(
            error,
            InventoryError::fault(inventory.name(), "panicked: slot table torn")
        );
    }

    #[test]
    fn errors_and_values_pass_through() {
        let inventory = NullInventory;

        assert_eq!(read(&inventory, || 3), Ok(3));
        assert_eq!(
            call(&inventory, || -> Result<(), _> {
                Err(InventoryError::SlotOutOfRange { slot: 1, slots: 0 })
            }),
            Err(InventoryError::SlotOutOfRange { slot: 1, slots: 0 })
        );
    }
}
