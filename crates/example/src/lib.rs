//! A scripted chest simulation built with slotlink.
//!
//! A [`BasicInventory`] plays the chest. A hopper (direct slot writes) and a
//! player (resizing, breaking and replacing the chest) change it behind the
//! network's back, while an import bus and an export bus go through the
//! port. A [`MonitorCache`] stands in for the network's item view.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  set_stack / resize   ┌────────────────┐
//! │ hopper/player│──────────────────────▶│ BasicInventory │
//! └──────────────┘                       └───────▲────────┘
//!                                                │ CapabilityCell
//! ┌──────────────┐  inject / extract     ┌───────┴────────┐   deltas   ┌──────────────┐
//! │ import/export│──────────────────────▶│ InventoryPort  │───────────▶│ MonitorCache │
//! └──────────────┘                       └───────▲────────┘            └──────────────┘
//!                                                │ on_tick
//!                                        ┌───────┴────────┐
//!                                        │ PortScheduler  │
//!                                        └────────────────┘
//! ```

use std::sync::Arc;

use slotlink_core::{ConfigError, PortConfig, PortHandle, PortScheduler};
use slotlink_inventory::{BasicInventory, CapabilityCell, Facing, ItemKey, ItemStack};
use slotlink_port::{InventoryPort, PortStats};
use slotlink_storage::{
    ActionSource, Actionable, ListenerToken, MeInventory, MeMonitor, MonitorCache, ResourceList,
    StorageStack, TickingMonitor,
};

/// One scripted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Lets the scheduler run for a number of ticks.
    Wait(u64),
    /// A hopper writes a slot directly.
    Place {
        /// Target slot.
        slot: usize,
        /// Item id.
        item: &'static str,
        /// Stack size.
        count: u32,
    },
    /// A hopper empties a slot directly.
    Clear(usize),
    /// The chest is upgraded or downgraded to a new slot count.
    Resize(usize),
    /// The import bus pushes items through the port.
    Import {
        /// Item id.
        item: &'static str,
        /// Amount offered.
        amount: i64,
    },
    /// The export bus pulls items through the port.
    Export {
        /// Item id.
        item: &'static str,
        /// Amount requested.
        amount: i64,
    },
    /// The chest is broken.
    BreakChest,
    /// The chest is placed again, contents intact.
    RestoreChest,
}

/// Builds the item key for `id`.
#[must_use]
pub fn item_key(id: &str) -> ItemKey {
    ItemKey::new(format!("minecraft:{id}"))
}

/// The default scenario.
#[must_use]
pub fn demo_script() -> Vec<Step> {
    vec![
        Step::Place {
            slot: 0,
            item: "cobblestone",
            count: 64,
        },
        Step::Place {
            slot: 4,
            item: "iron_ore",
            count: 12,
        },
        Step::Wait(10),
        Step::Import {
            item: "cobblestone",
            amount: 100,
        },
        Step::Export {
            item: "iron_ore",
            amount: 5,
        },
        Step::Wait(30),
        Step::Clear(0),
        Step::Resize(3),
        Step::Wait(60),
        Step::BreakChest,
        Step::Wait(10),
        Step::RestoreChest,
        Step::Wait(10),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// ChestSim
// ─────────────────────────────────────────────────────────────────────────────

/// A chest behind a scheduled port, with a cache listening to it.
#[derive(Debug)]
pub struct ChestSim {
    chest: Arc<BasicInventory>,
    cell: Arc<CapabilityCell>,
    cache: Arc<MonitorCache>,
    scheduler: PortScheduler,
    handle: PortHandle,
}

impl ChestSim {
    /// Creates a chest of `slots` slots holding up to `slot_limit` items each.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn new(config: &PortConfig, slots: usize, slot_limit: u32) -> Result<Self, ConfigError> {
        let chest = Arc::new(BasicInventory::new(slots, slot_limit).with_name("chest"));
        let cell = Arc::new(CapabilityCell::new(chest.clone()));
        let cache = Arc::new(MonitorCache::new(ListenerToken(1)));

        let mut port = config.build_port(cell.clone(), Facing::Up)?;
        port.add_listener(cache.clone(), ListenerToken(1));
        port.set_action_source(ActionSource::machine("chest-sim"));

        let mut scheduler = PortScheduler::new();
        let handle = scheduler.register(port, config.ticking_request()?);

        Ok(Self {
            chest,
            cell,
            cache,
            scheduler,
            handle,
        })
    }

    /// Applies one step.
    pub fn apply(&mut self, step: &Step) {
        tracing::info!(tick = self.scheduler.now(), ?step, "step");

        match *step {
            Step::Wait(ticks) => {
                self.scheduler.run(ticks);
            }
            Step::Place { slot, item, count } => {
                let stack = ItemStack::new(item_key(item), count);
                if let Err(error) = self.chest.set_stack(slot, Some(stack)) {
                    tracing::warn!(%error, "hopper missed");
                }
            }
            Step::Clear(slot) => {
                if let Err(error) = self.chest.set_stack(slot, None) {
                    tracing::warn!(%error, "hopper missed");
                }
            }
            Step::Resize(slots) => self.chest.resize(slots),
            Step::Import { item, amount } => {
                let request = StorageStack::new(item_key(item), amount);
                if let Some(port) = self.scheduler.get_mut(self.handle) {
                    let source = ActionSource::machine("import bus");
                    let leftover = port.inject_items(&request, Actionable::Modulate, &source);
                    tracing::info!(?leftover, "import finished");
                }
            }
            Step::Export { item, amount } => {
                let request = StorageStack::new(item_key(item), amount);
                if let Some(port) = self.scheduler.get_mut(self.handle) {
                    let source = ActionSource::machine("export bus");
                    let extracted = port.extract_items(&request, Actionable::Modulate, &source);
                    tracing::info!(?extracted, "export finished");
                }
            }
            Step::BreakChest => self.cell.clear(),
            Step::RestoreChest => self.cell.set(self.chest.clone()),
        }
    }

    /// Applies every step in order.
    pub fn run(&mut self, script: &[Step]) {
        for step in script {
            self.apply(step);
        }
    }

    /// Returns what the network believes the chest holds.
    #[must_use]
    pub fn network_view(&self) -> ResourceList {
        self.cache.snapshot()
    }

    /// Returns what the chest holds right now, if it is attached.
    #[must_use]
    pub fn live_view(&self) -> ResourceList {
        let mut list = ResourceList::new();
        if let Some(port) = self.scheduler.get(self.handle) {
            port.available_items(&mut list);
        }
        list
    }

    /// Returns the port's polling interval.
    #[must_use]
    pub fn interval(&self) -> Option<u64> {
        self.scheduler.interval_of(self.handle)
    }

    /// Returns the port's counters.
    #[must_use]
    pub fn stats(&self) -> Option<PortStats> {
        self.scheduler.get(self.handle).map(InventoryPort::stats)
    }
}
