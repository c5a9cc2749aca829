//! Integration tests driving real ports through the scheduler.

use std::sync::Arc;

use slotlink_core::{PortConfig, PortHandle, PortScheduler};
use slotlink_inventory::{BasicInventory, CapabilityCell, Facing, ItemKey, ItemStack};
use slotlink_storage::{
    ActionSource, Actionable, ListenerToken, MeInventory, MeMonitor, MonitorCache, StorageStack,
};

fn torch(count: u32) -> ItemStack {
    ItemStack::new(ItemKey::new("minecraft:torch"), count)
}

fn scheduled_chest(
    config: &PortConfig,
) -> (
    PortScheduler,
    PortHandle,
    Arc<BasicInventory>,
    Arc<CapabilityCell>,
    Arc<MonitorCache>,
) {
    let chest = Arc::new(BasicInventory::new(9, 64));
    let cell = Arc::new(CapabilityCell::new(chest.clone()));
    let mut port = config.build_port(cell.clone(), Facing::East).unwrap();
    let cache = Arc::new(MonitorCache::new(ListenerToken(1)));
    port.add_listener(cache.clone(), ListenerToken(1));

    let mut scheduler = PortScheduler::new();
    let handle = scheduler.register(port, config.ticking_request().unwrap());
    (scheduler, handle, chest, cell, cache)
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADAPTIVE POLLING
// ═══════════════════════════════════════════════════════════════════════════════

/// Verifies that a quiet inventory backs off to the slowest rate.
#[test]
fn quiet_port_backs_off_to_max() {
    let config = PortConfig::new().with_tick_interval(1, 4);
    let (mut scheduler, handle, _chest, _cell, _cache) = scheduled_chest(&config);

    scheduler.run(50);

    assert_eq!(scheduler.interval_of(handle), Some(4));
}

/// Verifies that a detected change snaps the port back to the fastest rate.
#[test]
fn change_resets_to_min() {
    let config = PortConfig::new().with_tick_interval(2, 6);
    let (mut scheduler, handle, chest, _cell, cache) = scheduled_chest(&config);
    scheduler.run(60);
    assert_eq!(scheduler.interval_of(handle), Some(6));

    chest.set_stack(3, Some(torch(5))).unwrap();
    let mut waited = 0;
    while scheduler.tick() == 0 {
        waited += 1;
    }

    assert!(waited < 6, "seen within one slow interval");
    assert_eq!(cache.amount_of(torch(1).key()), 5);
    assert_eq!(scheduler.interval_of(handle), Some(2));
}

/// Verifies that changes are only seen when the port is polled.
#[test]
fn changes_wait_for_next_poll() {
    let config = PortConfig::new().with_tick_interval(5, 5);
    let (mut scheduler, _handle, chest, _cell, cache) = scheduled_chest(&config);
    scheduler.tick();

    chest.set_stack(0, Some(torch(1))).unwrap();
    scheduler.run(4);
    assert_eq!(cache.amount_of(torch(1).key()), 0);

    scheduler.tick();
    assert_eq!(cache.amount_of(torch(1).key()), 1);
}

// ═══════════════════════════════════════════════════════════════════════════════
// DIRECT ACCESS
// ═══════════════════════════════════════════════════════════════════════════════

/// Verifies that a scheduled port still serves inserts between ticks.
#[test]
fn scheduled_port_accepts_inserts() {
    let config = PortConfig::default();
    let (mut scheduler, handle, chest, _cell, cache) = scheduled_chest(&config);
    scheduler.tick();

    let port = scheduler.get_mut(handle).unwrap();
    let leftover = port.inject_items(
        &StorageStack::new(ItemKey::new("minecraft:torch"), 100),
        Actionable::Modulate,
        &ActionSource::machine("export bus"),
    );

    assert_eq!(leftover, None);
    let stored: u32 = chest.contents().iter().flatten().map(ItemStack::count).sum();
    assert_eq!(stored, 100);
    assert_eq!(cache.amount_of(torch(1).key()), 100);
}

/// Verifies that a vanished inventory is noticed on the next poll.
#[test]
fn vanished_inventory_empties_cache() {
    let config = PortConfig::new().with_tick_interval(1, 1);
    let (mut scheduler, handle, chest, cell, cache) = scheduled_chest(&config);
    chest.set_stack(8, Some(torch(32))).unwrap();
    scheduler.tick();
    assert_eq!(cache.amount_of(torch(1).key()), 32);

    cell.clear();
    scheduler.tick();

    assert_eq!(cache.amount_of(torch(1).key()), 0);
    assert!(scheduler.get(handle).unwrap().snapshot().is_empty());
}

/// Verifies that an unregistered port is handed back intact.
#[test]
fn unregister_returns_port() {
    let config = PortConfig::default();
    let (mut scheduler, handle, _chest, _cell, _cache) = scheduled_chest(&config);
    scheduler.tick();

    let port = scheduler.unregister(handle).unwrap();

    assert_eq!(port.facing(), Facing::East);
    assert_eq!(port.stats().reconciliations, 1);
    assert_eq!(scheduler.tick(), 0);
}
