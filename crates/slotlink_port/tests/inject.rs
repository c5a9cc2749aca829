//! Insertion tests for `InventoryPort`.
//!
//! Covers slot fill order, full-target detection, simulation, and recovery
//! from inventories that fail or report impossible leftovers.

mod test_utils;

use core::sync::atomic::Ordering;
use std::sync::Arc;

use slotlink_inventory::{BasicInventory, NullInventory, SlotInventory};
use slotlink_storage::{ActionSource, Actionable, MeInventory, TickingMonitor};
use test_utils::{
    InflatingInventory, PanickingInventory, ScriptedInventory, attach_recorder, item, net, port_over, stored,
};

/// Verifies that inserts fill slots in ascending order and stop once consumed.
#[test]
fn insert_fills_slots_in_order() {
    let chest = Arc::new(BasicInventory::new(3, 10));
    let (mut port, _cell) = port_over(chest.clone());

    let leftover = port.inject_items(
        &stored("cobblestone", 25),
        Actionable::Modulate,
        &ActionSource::Unknown,
    );

    assert_eq!(leftover, None, "all 25 items should fit");
    assert_eq!(chest.stack_in_slot(0), Some(item("cobblestone", 10)));
    assert_eq!(chest.stack_in_slot(1), Some(item("cobblestone", 10)));
    assert_eq!(chest.stack_in_slot(2), Some(item("cobblestone", 5)));
}

/// Verifies that a partially fitting insert returns the exact remainder.
#[test]
fn insert_returns_remainder_when_partially_accepted() {
    let chest = Arc::new(BasicInventory::new(2, 10));
    let (mut port, _cell) = port_over(chest.clone());

    let leftover = port.inject_items(
        &stored("dirt", 32),
        Actionable::Modulate,
        &ActionSource::Unknown,
    );

    assert_eq!(leftover, Some(stored("dirt", 12)));
}

/// Verifies that a full target returns the original request unchanged.
#[test]
fn insert_into_full_target_returns_request() {
    let chest = Arc::new(BasicInventory::new(2, 10));
    chest.set_stack(0, Some(item("stone", 10))).unwrap();
    chest.set_stack(1, Some(item("sand", 3))).unwrap();
    let (mut port, _cell) = port_over(chest.clone());
    port.on_tick();
    let recorder = attach_recorder(&mut port);
    let cached_before = port.snapshot().clone();

    let request = stored("gravel", 8);
    let leftover = port.inject_items(&request, Actionable::Modulate, &ActionSource::Unknown);

    assert_eq!(leftover, Some(request));
    assert_eq!(recorder.batch_count(), 0, "nothing changed, nothing to report");
    assert_eq!(port.snapshot().len(), cached_before.len());
    for slot in 0..cached_before.len() {
        assert_eq!(port.snapshot().stack(slot), cached_before.stack(slot));
    }
}

/// Verifies that an inventory without slots rejects everything.
#[test]
fn insert_into_null_inventory_is_rejected() {
    let (mut port, _cell) = port_over(NullInventory::shared());
    let request = stored("stone", 1);

    assert_eq!(
        port.inject_items(&request, Actionable::Modulate, &ActionSource::Unknown),
        Some(request)
    );
}

/// Verifies that simulation touches neither the inventory nor the cache.
#[test]
fn simulated_insert_changes_nothing() {
    let chest = Arc::new(BasicInventory::new(3, 10));
    let (mut port, _cell) = port_over(chest.clone());
    let recorder = attach_recorder(&mut port);

    let leftover = port.inject_items(
        &stored("glass", 25),
        Actionable::Simulate,
        &ActionSource::Unknown,
    );

    assert_eq!(leftover, None);
    assert_eq!(chest.contents(), vec![None, None, None]);
    assert!(port.snapshot().is_empty());
    assert_eq!(recorder.batch_count(), 0);
}

/// Verifies that a committed insert is reported to listeners before returning.
#[test]
fn modulated_insert_notifies_listeners() {
    let chest = Arc::new(BasicInventory::new(3, 10));
    let (mut port, _cell) = port_over(chest.clone());
    port.on_tick();
    let recorder = attach_recorder(&mut port);

    port.inject_items(
        &stored("iron_ingot", 15),
        Actionable::Modulate,
        &ActionSource::machine("importer"),
    );

    let batch = recorder.last_batch().expect("insert should be reported");
    assert_eq!(net(&batch).get(&test_utils::key("iron_ingot")), Some(&15));
    assert_eq!(recorder.batch_count(), 1, "one batch per reconciliation");
}

/// Verifies that a failing inventory ends the scan without panicking.
#[test]
fn insert_fault_is_recovered() {
    let chest = Arc::new(ScriptedInventory::new(3, 10));
    chest.fail_insert.store(true, Ordering::SeqCst);
    let (mut port, _cell) = port_over(chest.clone());
    let request = stored("coal", 5);

    let leftover = port.inject_items(&request, Actionable::Modulate, &ActionSource::Unknown);

    assert_eq!(leftover, Some(request));
    assert_eq!(port.stats().capability_faults, 1);
}

/// Verifies that a panicking inventory is contained and counted as a fault.
#[test]
fn insert_panic_is_contained() {
    let chest = Arc::new(PanickingInventory::new(2, 64));
    chest.panic_insert.store(true, Ordering::SeqCst);
    let (mut port, _cell) = port_over(chest.clone());
    let recorder = attach_recorder(&mut port);
    let request = stored("brick", 10);

    let leftover = port.inject_items(&request, Actionable::Modulate, &ActionSource::Unknown);

    assert_eq!(leftover, Some(request.clone()));
    assert_eq!(port.stats().capability_faults, 1);
    assert_eq!(recorder.batch_count(), 0);

    // The port stays usable once the inventory recovers.
    chest.panic_insert.store(false, Ordering::SeqCst);
    let leftover = port.inject_items(&request, Actionable::Modulate, &ActionSource::Unknown);
    assert_eq!(leftover, None);
    assert_eq!(chest.inner.stack_in_slot(0), Some(item("brick", 10)));
}

/// Verifies that a leftover larger than the offer counts as "accepted nothing".
#[test]
fn impossible_leftover_is_treated_as_rejection() {
    let (mut port, _cell) = port_over(Arc::new(InflatingInventory { slots: 2 }));
    let request = stored("clay_ball", 4);

    let leftover = port.inject_items(&request, Actionable::Modulate, &ActionSource::Unknown);

    assert_eq!(leftover, Some(request));
    assert_eq!(port.stats().capability_faults, 2);
}

/// Verifies that zero-sized requests are a no-op.
#[test]
fn empty_request_has_no_leftover() {
    let chest = Arc::new(BasicInventory::new(1, 10));
    let (mut port, _cell) = port_over(chest.clone());

    assert_eq!(
        port.inject_items(&stored("stone", 0), Actionable::Modulate, &ActionSource::Unknown),
        None
    );
    assert_eq!(chest.stack_in_slot(0), None);
}
