//! Slot inventory to network storage adapter (Layer 3).
//!
//! `slotlink_port` wraps a foreign [`SlotInventory`](slotlink_inventory::SlotInventory)
//! so that a storage network can use it like any other storage:
//!
//! - [`InventoryPort`] - The adapter: inject, extract, list, and poll
//! - [`Snapshot`] - Per-slot cache the poller diffs against
//! - [`ListenerRegistry`] - Receivers of change batches, pruned lazily
//! - [`PortStats`] - Counters for reconciliation work and misbehaving inventories
//!
//! # Polling Model
//!
//! The adapter never watches the inventory on its own. An external driver
//! calls [`on_tick`](InventoryPort::on_tick); each call compares the live
//! slots with the [`Snapshot`], sends the differences to every listener as
//! one batch, and answers [`Urgent`](slotlink_storage::TickRateModulation::Urgent)
//! if anything changed or [`Slower`](slotlink_storage::TickRateModulation::Slower)
//! otherwise. Committed inserts and extracts run a narrower pass of their
//! own before returning, so listeners see their effect immediately.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use slotlink_inventory::{BasicInventory, CapabilityCell, Facing, ItemKey, ItemStack};
//! use slotlink_port::InventoryPort;
//! use slotlink_storage::{ListenerToken, MeMonitor, MonitorCache, TickingMonitor};
//!
//! let chest = Arc::new(BasicInventory::new(9, 64));
//! chest.set_stack(4, Some(ItemStack::new(ItemKey::new("minecraft:apple"), 3))).unwrap();
//!
//! let mut port = InventoryPort::new(Arc::new(CapabilityCell::new(chest)), Facing::Up);
//! let cache = Arc::new(MonitorCache::new(ListenerToken(1)));
//! port.add_listener(cache.clone(), ListenerToken(1));
//!
//! port.on_tick();
//! assert_eq!(cache.amount_of(&ItemKey::new("minecraft:apple")), 3);
//! ```

mod guard;
mod port;
mod registry;
mod snapshot;
mod stats;

pub use port::InventoryPort;
pub use registry::ListenerRegistry;
pub use snapshot::Snapshot;
pub use stats::PortStats;
