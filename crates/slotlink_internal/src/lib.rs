//! # slotlink Internal Library
//!
//! Re-exports the core slotlink crates for convenience.

/// Layer 1: Slot inventory capability and item stacks.
pub use slotlink_inventory;

/// Layer 2: Network storage contracts and resource lists.
pub use slotlink_storage;

/// Layer 3: The inventory port.
pub use slotlink_port;

/// Layer 4: Configuration, scheduling and tracing setup.
pub use slotlink_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use slotlink_core::{PortConfig, PortHandle, PortScheduler, TickingRequest};
    pub use slotlink_inventory::prelude::*;
    pub use slotlink_port::{InventoryPort, PortStats};
    pub use slotlink_storage::prelude::*;
}
