//! Shared test utilities for `slotlink_port` integration tests.
//!
//! Scripted inventories that misbehave on request, a receiver that records
//! every batch, and small constructors. Import via `mod test_utils;`.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared test utilities: not all items used in every test binary"
)]

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use slotlink_inventory::{
    BasicInventory, CapabilityCell, Facing, InventoryError, ItemKey, ItemStack, SlotInventory,
};
use slotlink_port::InventoryPort;
use slotlink_storage::{
    ActionSource, ListenerToken, MeMonitor, MonitorId, MonitorReceiver, ResourceList,
    StorageStack,
};

// ═══════════════════════════════════════════════════════════════════════════════
// STACK HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

pub fn key(id: &str) -> ItemKey {
    ItemKey::new(format!("minecraft:{id}"))
}

pub fn item(id: &str, count: u32) -> ItemStack {
    ItemStack::new(key(id), count)
}

pub fn stored(id: &str, amount: i64) -> StorageStack {
    StorageStack::new(key(id), amount)
}

/// Sums a batch per item, dropping items that net to zero.
pub fn net(changes: &[StorageStack]) -> BTreeMap<ItemKey, i64> {
    let mut totals = BTreeMap::new();
    for change in changes {
        *totals.entry(change.key().clone()).or_insert(0) += change.amount();
    }
    totals.retain(|_, amount| *amount != 0);
    totals
}

/// Converts a list into a map, dropping zero entries.
pub fn totals(list: &ResourceList) -> BTreeMap<ItemKey, i64> {
    list.iter()
        .filter(|stack| stack.amount() != 0)
        .map(|stack| (stack.key().clone(), stack.amount()))
        .collect()
}

/// Sums the live contents of an inventory per item.
pub fn live_totals(inventory: &dyn SlotInventory) -> BTreeMap<ItemKey, i64> {
    let mut totals = BTreeMap::new();
    for slot in 0..inventory.slots() {
        if let Some(stack) = inventory.stack_in_slot(slot) {
            *totals.entry(stack.key().clone()).or_insert(0) += i64::from(stack.count());
        }
    }
    totals.retain(|_, amount| *amount != 0);
    totals
}

// ═══════════════════════════════════════════════════════════════════════════════
// PORT SETUP
// ═══════════════════════════════════════════════════════════════════════════════

/// A port over `inventory` plus the cell it resolves through.
pub fn port_over(inventory: Arc<dyn SlotInventory>) -> (InventoryPort, Arc<CapabilityCell>) {
    let cell = Arc::new(CapabilityCell::new(inventory));
    let port = InventoryPort::new(cell.clone(), Facing::North);
    (port, cell)
}

/// Registers a fresh recorder on `port`.
pub fn attach_recorder(port: &mut InventoryPort) -> Arc<RecordingReceiver> {
    let recorder = Arc::new(RecordingReceiver::new(ListenerToken(1)));
    port.add_listener(recorder.clone(), ListenerToken(1));
    recorder
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCRIPTED INVENTORIES
// ═══════════════════════════════════════════════════════════════════════════════

/// A [`BasicInventory`] that can be told to misbehave.
pub struct ScriptedInventory {
    pub inner: BasicInventory,
    /// Extra items added to every successful extract.
    pub over_deliver: AtomicU32,
    /// Index of the first `extract_item` call that fails.
    pub fail_extract_from: AtomicU32,
    pub fail_insert: AtomicBool,
    /// Number of `extract_item` calls seen.
    pub extract_calls: AtomicU32,
}

impl ScriptedInventory {
    pub fn new(slots: usize, limit: u32) -> Self {
        Self {
            inner: BasicInventory::new(slots, limit).with_name("ScriptedInventory"),
            over_deliver: AtomicU32::new(0),
            fail_extract_from: AtomicU32::new(u32::MAX),
            fail_insert: AtomicBool::new(false),
            extract_calls: AtomicU32::new(0),
        }
    }

    pub fn with_stack(self, slot: usize, stack: ItemStack) -> Self {
        self.inner.set_stack(slot, Some(stack)).unwrap();
        self
    }
}

impl SlotInventory for ScriptedInventory {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn slots(&self) -> usize {
        self.inner.slots()
    }

    fn stack_in_slot(&self, slot: usize) -> Option<ItemStack> {
        self.inner.stack_in_slot(slot)
    }

    fn insert_item(
        &self,
        slot: usize,
        stack: ItemStack,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(InventoryError::fault(self.name(), "insert exploded"));
        }
        self.inner.insert_item(slot, stack, simulate)
    }

    fn extract_item(
        &self,
        slot: usize,
        amount: u32,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        let call = self.extract_calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_extract_from.load(Ordering::SeqCst) {
            return Err(InventoryError::fault(self.name(), "extract exploded"));
        }
        let extra = self.over_deliver.load(Ordering::SeqCst);
        Ok(self
            .inner
            .extract_item(slot, amount, simulate)?
            .map(|mut stack| {
                stack.grow(extra);
                stack
            }))
    }
}

/// Hands out at most `per_call` items per extract, like a throttled machine.
pub struct TricklingInventory {
    pub inner: BasicInventory,
    pub per_call: u32,
}

impl SlotInventory for TricklingInventory {
    fn slots(&self) -> usize {
        self.inner.slots()
    }

    fn stack_in_slot(&self, slot: usize) -> Option<ItemStack> {
        self.inner.stack_in_slot(slot)
    }

    fn insert_item(
        &self,
        slot: usize,
        stack: ItemStack,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        self.inner.insert_item(slot, stack, simulate)
    }

    fn extract_item(
        &self,
        slot: usize,
        amount: u32,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        self.inner
            .extract_item(slot, amount.min(self.per_call), simulate)
    }
}

/// Claims to accept inserts while returning more than it was given.
pub struct InflatingInventory {
    pub slots: usize,
}

impl SlotInventory for InflatingInventory {
    fn slots(&self) -> usize {
        self.slots
    }

    fn stack_in_slot(&self, _slot: usize) -> Option<ItemStack> {
        None
    }

    fn insert_item(
        &self,
        _slot: usize,
        mut stack: ItemStack,
        _simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        stack.grow(1);
        Ok(Some(stack))
    }

    fn extract_item(
        &self,
        _slot: usize,
        _amount: u32,
        _simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        Ok(None)
    }
}

/// A [`BasicInventory`] whose methods can be told to panic.
pub struct PanickingInventory {
    pub inner: BasicInventory,
    pub panic_insert: AtomicBool,
    /// Index of the first `extract_item` call that panics.
    pub panic_extract_from: AtomicU32,
    /// Slot whose `stack_in_slot` panics.
    pub panic_read_slot: AtomicU32,
    pub extract_calls: AtomicU32,
}

impl PanickingInventory {
    pub fn new(slots: usize, limit: u32) -> Self {
        Self {
            inner: BasicInventory::new(slots, limit).with_name("PanickingInventory"),
            panic_insert: AtomicBool::new(false),
            panic_extract_from: AtomicU32::new(u32::MAX),
            panic_read_slot: AtomicU32::new(u32::MAX),
            extract_calls: AtomicU32::new(0),
        }
    }

    pub fn with_stack(self, slot: usize, stack: ItemStack) -> Self {
        self.inner.set_stack(slot, Some(stack)).unwrap();
        self
    }
}

impl SlotInventory for PanickingInventory {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn slots(&self) -> usize {
        self.inner.slots()
    }

    fn stack_in_slot(&self, slot: usize) -> Option<ItemStack> {
        if slot as u32 == self.panic_read_slot.load(Ordering::SeqCst) {
            panic!("slot {slot} is unreadable");
        }
        self.inner.stack_in_slot(slot)
    }

    fn insert_item(
        &self,
        slot: usize,
        stack: ItemStack,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        if self.panic_insert.load(Ordering::SeqCst) {
            panic!("insert into slot {slot} blew up");
        }
        self.inner.insert_item(slot, stack, simulate)
    }

    fn extract_item(
        &self,
        slot: usize,
        amount: u32,
        simulate: bool,
    ) -> Result<Option<ItemStack>, InventoryError> {
        let call = self.extract_calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.panic_extract_from.load(Ordering::SeqCst) {
            panic!("extract from slot {slot} blew up");
        }
        self.inner.extract_item(slot, amount, simulate)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDING RECEIVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Records every batch it receives.
pub struct RecordingReceiver {
    token: ListenerToken,
    valid: AtomicBool,
    batches: Mutex<Vec<Vec<StorageStack>>>,
    sources: Mutex<Vec<Option<ActionSource>>>,
    monitors: Mutex<Vec<MonitorId>>,
}

impl RecordingReceiver {
    pub fn new(token: ListenerToken) -> Self {
        Self {
            token,
            valid: AtomicBool::new(true),
            batches: Mutex::new(Vec::new()),
            sources: Mutex::new(Vec::new()),
            monitors: Mutex::new(Vec::new()),
        }
    }

    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::SeqCst);
    }

    pub fn batches(&self) -> Vec<Vec<StorageStack>> {
        self.batches.lock().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    pub fn last_batch(&self) -> Option<Vec<StorageStack>> {
        self.batches.lock().last().cloned()
    }

    pub fn sources(&self) -> Vec<Option<ActionSource>> {
        self.sources.lock().clone()
    }

    pub fn monitors(&self) -> Vec<MonitorId> {
        self.monitors.lock().clone()
    }
}

impl MonitorReceiver for RecordingReceiver {
    fn is_valid(&self, token: &ListenerToken) -> bool {
        self.valid.load(Ordering::SeqCst) && *token == self.token
    }

    fn post_change(
        &self,
        monitor: MonitorId,
        changes: &[StorageStack],
        source: Option<&ActionSource>,
    ) {
        self.batches.lock().push(changes.to_vec());
        self.sources.lock().push(source.cloned());
        self.monitors.lock().push(monitor);
    }
}
