//! The inventory adapter.

use std::sync::Arc;

use slotlink_inventory::{
    ExactComparison, Facing, InventoryError, InventoryProvider, ItemComparison, ItemStack,
    NullInventory, SlotInventory,
};
use slotlink_storage::{
    ActionSource, Actionable, ListenerToken, MeInventory, MeMonitor, MonitorId, MonitorReceiver,
    ResourceList, StorageChannel, StorageStack, TickRateModulation, TickingMonitor,
};

use crate::guard;
use crate::registry::ListenerRegistry;
use crate::snapshot::Snapshot;
use crate::stats::PortStats;

// ─────────────────────────────────────────────────────────────────────────────
// InventoryPort
// ─────────────────────────────────────────────────────────────────────────────

/// Exposes a [`SlotInventory`] as a monitored network storage.
///
/// # Inserting and Extracting
///
/// Both operations walk the slots in ascending order and let the inventory
/// decide what it accepts or hands out; the port never picks a "best" slot.
/// Results are clamped to what was asked for. Inventory failures, whether
/// returned as errors or raised as panics, are logged and counted instead
/// of propagated, and end the scan.
///
/// # Change Detection
///
/// [`on_tick`](TickingMonitor::on_tick) re-resolves the inventory from the
/// provider and compares every slot with the cached [`Snapshot`]. All
/// resulting deltas go to each listener as one batch.
///
/// A committed insert or extract runs a targeted pass that only looks at
/// slots whose old or new contents match the moved item; other slots wait
/// for the next full pass.
///
/// Every batch is tagged with the port's [`MonitorId`], so a receiver
/// listening to several ports can tell them apart.
///
/// # Threading
///
/// A port is driven from one place at a time: mutating entry points take
/// `&mut self`.
pub struct InventoryPort {
    id: MonitorId,
    provider: Arc<dyn InventoryProvider>,
    facing: Facing,
    inventory: Arc<dyn SlotInventory>,
    comparison: Arc<dyn ItemComparison>,
    channel: StorageChannel,
    snapshot: Snapshot,
    listeners: ListenerRegistry,
    source: Option<ActionSource>,
    stats: PortStats,
}

impl core::fmt::Debug for InventoryPort {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryPort")
            .field("id", &self.id)
            .field("inventory", &self.inventory.name())
            .field("facing", &self.facing)
            .field("channel", &self.channel)
            .field("cached_slots", &self.snapshot.len())
            .field("listeners", &self.listeners.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl InventoryPort {
    /// Creates a port for the inventory `provider` exposes on `facing`.
    ///
    /// Items are compared with [`ExactComparison`] and the port reports the
    /// [`StorageChannel::Items`] channel; see the `with_*` methods to change
    /// either. The snapshot starts empty and is filled by the first
    /// reconciliation. The port gets a fresh [`MonitorId`].
    #[must_use]
    pub fn new(provider: Arc<dyn InventoryProvider>, facing: Facing) -> Self {
        let inventory = provider
            .inventory(facing)
            .unwrap_or_else(NullInventory::shared);

        Self {
            id: MonitorId::next(),
            provider,
            facing,
            inventory,
            comparison: Arc::new(ExactComparison),
            channel: StorageChannel::Items,
            snapshot: Snapshot::new(),
            listeners: ListenerRegistry::new(),
            source: None,
            stats: PortStats::default(),
        }
    }

    /// Uses `comparison` to decide whether two stacks hold the same item.
    #[must_use]
    pub fn with_comparison(mut self, comparison: Arc<dyn ItemComparison>) -> Self {
        self.comparison = comparison;
        self
    }

    /// Sets the channel reported by [`MeInventory::channel`].
    #[must_use]
    pub fn with_channel(mut self, channel: StorageChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Replaces the generated [`MonitorId`] sent with every batch.
    #[must_use]
    pub fn with_id(mut self, id: MonitorId) -> Self {
        self.id = id;
        self
    }

    /// Returns the id sent with every batch.
    #[must_use]
    pub fn id(&self) -> MonitorId {
        self.id
    }

    /// Returns the inventory currently in use.
    #[must_use]
    pub fn inventory(&self) -> &Arc<dyn SlotInventory> {
        &self.inventory
    }

    /// Returns the facing this port resolves its inventory on.
    #[must_use]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Returns the cached slot contents.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the registered listeners.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Returns the running counters.
    #[must_use]
    pub fn stats(&self) -> PortStats {
        self.stats
    }

    /// Returns the most recently recorded action source.
    #[must_use]
    pub fn action_source(&self) -> Option<&ActionSource> {
        self.source.as_ref()
    }

    /// Compares the live inventory with the snapshot and notifies listeners.
    ///
    /// With `expected` set, only slots whose old or new contents are the
    /// same item as `expected` are examined. Without it every slot is.
    /// The inventory is not re-resolved; [`on_tick`](TickingMonitor::on_tick)
    /// does that before calling this with `None`.
    ///
    /// Returns [`TickRateModulation::Urgent`] if anything changed and
    /// [`TickRateModulation::Slower`] otherwise.
    pub fn reconcile(&mut self, expected: Option<&ItemStack>) -> TickRateModulation {
        let inventory = Arc::clone(&self.inventory);
        let slots = match guard::read(&*inventory, || inventory.slots()) {
            Ok(slots) => slots,
            Err(error) => {
                self.record_fault("reconciliation", None, &error, None);
                return TickRateModulation::Slower;
            }
        };
        let mut changes = Vec::new();

        self.snapshot.grow_to(slots);

        for slot in 0..slots {
            let current = match guard::read(&*inventory, || inventory.stack_in_slot(slot)) {
                Ok(current) => current.and_then(ItemStack::non_empty),
                Err(error) => {
                    // Unreadable; the cached entry stands until a later pass.
                    self.record_fault("reconciliation", Some(slot), &error, None);
                    continue;
                }
            };
            let cached = self.snapshot.stack(slot);

            if let Some(expected) = expected {
                let involved = self
                    .comparison
                    .is_same_slot_item(current.as_ref(), Some(expected))
                    || self.comparison.is_same_slot_item(cached, Some(expected));
                if !involved {
                    continue;
                }
            }

            let same_item = match (current.as_ref(), cached) {
                // Both empty: unchanged, no need to ask the comparison.
                (None, None) => continue,
                (Some(current), Some(cached)) => self.comparison.is_same_item(current, cached),
                _ => false,
            };

            match current {
                Some(current) if same_item => {
                    self.snapshot.resize_stack(slot, current, &mut changes);
                }
                current => {
                    tracing::trace!(slot, now = ?current, "slot occupant changed");
                    self.snapshot.replace(slot, current, &mut changes);
                }
            }
        }

        self.snapshot.shrink_to(slots, &mut changes);
        self.stats.reconciliations += 1;

        if changes.is_empty() {
            return TickRateModulation::Slower;
        }

        tracing::debug!(
            inventory = inventory.name(),
            monitor = %self.id,
            slots,
            deltas = changes.len(),
            targeted = expected.is_some(),
            "inventory changed"
        );

        self.stats.deltas_emitted += changes.len() as u64;
        let pruned = self.listeners.post(self.id, &changes, self.source.as_ref());
        self.stats.listeners_pruned += pruned as u64;

        TickRateModulation::Urgent
    }

    /// Logs and counts a failed inventory call.
    fn record_fault(
        &mut self,
        operation: &'static str,
        slot: Option<usize>,
        error: &InventoryError,
        source: Option<&ActionSource>,
    ) {
        tracing::error!(
            inventory = self.inventory.name(),
            operation,
            slot,
            %error,
            source = ?source,
            "inventory failed, please report to its provider"
        );
        self.stats.capability_faults += 1;
    }

    /// Checks an insert result against what was offered.
    ///
    /// Leftovers larger than the offer or of a different item cannot be
    /// explained by a well-behaved inventory; they are treated as "accepted
    /// nothing".
    fn sanitize_leftover(
        &mut self,
        slot: usize,
        offered: &ItemStack,
        leftover: Option<ItemStack>,
    ) -> Option<ItemStack> {
        let leftover = leftover.and_then(ItemStack::non_empty)?;
        if leftover.count() > offered.count() || !self.comparison.is_same_item(&leftover, offered) {
            tracing::warn!(
                inventory = self.inventory.name(),
                slot,
                offered = %offered,
                returned = %leftover,
                "inventory returned an impossible insert leftover; ignoring it"
            );
            self.stats.capability_faults += 1;
            return Some(offered.clone());
        }
        Some(leftover)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MeInventory
// ─────────────────────────────────────────────────────────────────────────────

impl MeInventory for InventoryPort {
    fn inject_items(
        &mut self,
        input: &StorageStack,
        mode: Actionable,
        source: &ActionSource,
    ) -> Option<StorageStack> {
        let original = input.to_item_stack()?;
        // Anything beyond what a single stack can describe is never offered.
        let overflow = input.amount() - i64::from(original.count());
        let simulate = mode.is_simulate();
        let inventory = Arc::clone(&self.inventory);

        let mut remaining = Some(original.clone());
        let mut accepted_any = false;

        let slots = guard::read(&*inventory, || inventory.slots()).unwrap_or_else(|error| {
            self.record_fault("insertion", None, &error, Some(source));
            0
        });

        for slot in 0..slots {
            let Some(offered) = remaining.take() else {
                break;
            };

            match guard::call(&*inventory, || {
                inventory.insert_item(slot, offered.clone(), simulate)
            }) {
                Ok(leftover) => {
                    let leftover = self.sanitize_leftover(slot, &offered, leftover);
                    accepted_any |= leftover.as_ref() != Some(&offered);
                    remaining = leftover;
                }
                Err(error) => {
                    self.record_fault("insertion", Some(slot), &error, Some(source));
                    remaining = Some(offered);
                    break;
                }
            }
        }

        if !accepted_any {
            // Target is full.
            return Some(input.clone());
        }

        if !simulate {
            self.reconcile(Some(&original));
        }

        let leftover = remaining.map_or(0, |stack| i64::from(stack.count())) + overflow;
        (leftover > 0).then(|| input.with_amount(leftover))
    }

    fn extract_items(
        &mut self,
        request: &StorageStack,
        mode: Actionable,
        source: &ActionSource,
    ) -> Option<StorageStack> {
        let requested = request.to_item_stack()?;
        let simulate = mode.is_simulate();
        let inventory = Arc::clone(&self.inventory);

        let mut remaining = requested.count();
        let mut gathered: Option<ItemStack> = None;

        let slots = guard::read(&*inventory, || inventory.slots()).unwrap_or_else(|error| {
            self.record_fault("extraction", None, &error, Some(source));
            0
        });

        'slots: for slot in 0..slots {
            let in_slot = match guard::read(&*inventory, || inventory.stack_in_slot(slot)) {
                Ok(Some(in_slot)) => in_slot,
                Ok(None) => continue,
                Err(error) => {
                    self.record_fault("extraction", Some(slot), &error, Some(source));
                    break;
                }
            };
            if !self.comparison.is_same_item(&in_slot, &requested) {
                continue;
            }

            let slot_target = remaining.min(in_slot.count());
            let mut slot_remaining = slot_target;

            // Inventories may hand out less than asked per call, so keep asking.
            while slot_remaining > 0 {
                let extracted = match guard::call(&*inventory, || {
                    inventory.extract_item(slot, slot_remaining, simulate)
                }) {
                    Ok(extracted) => extracted.and_then(ItemStack::non_empty),
                    Err(error) => {
                        self.record_fault("extraction", Some(slot), &error, Some(source));
                        break 'slots;
                    }
                };
                let Some(mut extracted) = extracted else {
                    break;
                };

                if extracted.count() > slot_remaining {
                    tracing::warn!(
                        inventory = inventory.name(),
                        slot,
                        requested = slot_remaining,
                        returned = extracted.count(),
                        "inventory returned more items than requested; truncating"
                    );
                    self.stats.over_delivery_clamps += 1;
                    extracted.set_count(slot_remaining);
                }

                slot_remaining -= extracted.count();
                match gathered.as_mut() {
                    Some(gathered) => gathered.grow(extracted.count()),
                    None => gathered = Some(extracted),
                }
            }

            remaining -= slot_target - slot_remaining;
            if remaining == 0 {
                break;
            }
        }

        let gathered = gathered?;
        if !simulate {
            self.reconcile(Some(&gathered));
        }
        StorageStack::from_item(&gathered)
    }

    fn available_items<'a>(&self, out: &'a mut ResourceList) -> &'a mut ResourceList {
        // Takes `&self`, so failures here are logged but not counted.
        let inventory = &*self.inventory;
        let listed = guard::read(inventory, || inventory.slots()).and_then(|slots| {
            for slot in 0..slots {
                let stack = guard::read(inventory, || inventory.stack_in_slot(slot))?;
                if let Some(stack) = stack.and_then(|stack| StorageStack::from_item(&stack)) {
                    out.add_storage(stack);
                }
            }
            Ok(())
        });

        if let Err(error) = listed {
            tracing::error!(
                inventory = inventory.name(),
                %error,
                "inventory failed while listing, please report to its provider"
            );
        }
        out
    }

    fn channel(&self) -> StorageChannel {
        self.channel
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MeMonitor / TickingMonitor
// ─────────────────────────────────────────────────────────────────────────────

impl MeMonitor for InventoryPort {
    fn add_listener(&mut self, receiver: Arc<dyn MonitorReceiver>, token: ListenerToken) {
        self.listeners.insert(receiver, token);
    }

    fn remove_listener(&mut self, receiver: &Arc<dyn MonitorReceiver>) {
        self.listeners.remove(receiver);
    }
}

impl TickingMonitor for InventoryPort {
    fn on_tick(&mut self) -> TickRateModulation {
        match self.provider.inventory(self.facing) {
            Some(inventory) => self.inventory = inventory,
            None => {
                if !self.snapshot.is_empty() {
                    tracing::debug!(facing = ?self.facing, "inventory capability vanished");
                }
                self.inventory = NullInventory::shared();
            }
        }

        self.reconcile(None)
    }

    fn set_action_source(&mut self, source: ActionSource) {
        self.source = Some(source);
    }
}
