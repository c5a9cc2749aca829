//! Port configuration, polling, and observability setup (Layer 4).
//!
//! `slotlink_core` is where ports meet the host loop:
//!
//! - [`PortConfig`] - Builder-style settings, validated into a port and a [`TickingRequest`]
//! - [`PortScheduler`] - Polls [`TickingMonitor`](slotlink_storage::TickingMonitor)s at adaptive intervals
//! - [`telemetry`] - `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use slotlink_core::{PortConfig, PortScheduler};
//! use slotlink_inventory::{BasicInventory, CapabilityCell, Facing, ItemKey, ItemStack};
//! use slotlink_storage::{ListenerToken, MeMonitor, MonitorCache};
//!
//! let chest = Arc::new(BasicInventory::new(27, 64));
//! let config = PortConfig::default();
//! let mut port = config
//!     .build_port(Arc::new(CapabilityCell::new(chest.clone())), Facing::North)
//!     .unwrap();
//! let cache = Arc::new(MonitorCache::new(ListenerToken(1)));
//! port.add_listener(cache.clone(), ListenerToken(1));
//!
//! let mut scheduler = PortScheduler::new();
//! scheduler.register(port, config.ticking_request().unwrap());
//!
//! chest.set_stack(0, Some(ItemStack::new(ItemKey::new("minecraft:torch"), 16))).unwrap();
//! scheduler.tick();
//! assert_eq!(cache.amount_of(&ItemKey::new("minecraft:torch")), 16);
//! ```

mod config;
mod error;
mod schedule;
pub mod telemetry;

pub use config::{DEFAULT_MAX_TICK_INTERVAL, DEFAULT_MIN_TICK_INTERVAL, PortConfig, TickingRequest};
pub use error::{ConfigError, ScheduleError};
pub use schedule::{PortHandle, PortScheduler};
