//! The network-storage contract for slotlink (Layer 2).
//!
//! `slotlink_storage` describes how a storage network sees an attached
//! container, independent of how that container is laid out:
//!
//! - [`StorageStack`] - A summarized, signed quantity of one item; also used as a delta
//! - [`ResourceList`] - Accumulator that merges stacks by item
//! - [`MeInventory`] - Inject / extract / list contract exposed to the network
//! - [`MeMonitor`] and [`MonitorReceiver`] - Change listeners with lazy liveness checks
//! - [`TickingMonitor`] - Polling entry point returning a [`TickRateModulation`]
//! - [`MonitorCache`] - A receiver that folds change batches into a local view
//!
//! # Architecture
//!
//! - **Layer 1** (`slotlink_inventory`): Slot capabilities of foreign containers
//! - **Layer 2** (`slotlink_storage`): Network-facing contract (this crate)
//! - **Layer 3** (`slotlink_port`): The adapter between the two

/// Provenance and transaction modes.
pub mod action;

/// A receiver that folds change batches into a local view.
pub mod cache;

/// The network-facing inventory contract.
pub mod inventory;

/// Item accumulator.
pub mod list;

/// Change listeners and polling feedback.
pub mod monitor;

/// Summarized stacks and storage channels.
pub mod stack;

pub use action::{ActionSource, Actionable};
pub use cache::MonitorCache;
pub use inventory::MeInventory;
pub use list::ResourceList;
pub use monitor::{
    ListenerToken, MeMonitor, MonitorId, MonitorReceiver, TickRateModulation, TickingMonitor,
};
pub use stack::{StorageChannel, StorageStack};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::action::*;
    pub use crate::cache::*;
    pub use crate::inventory::*;
    pub use crate::list::*;
    pub use crate::monitor::*;
    pub use crate::stack::*;
}
