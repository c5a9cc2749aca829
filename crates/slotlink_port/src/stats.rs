//! Counters for reconciliation work and misbehaving inventories.

/// Running totals kept by an [`InventoryPort`](crate::InventoryPort).
///
/// None of these events are errors from the network's point of view; the
/// counters exist so an operator can spot a container that keeps breaking
/// its contract.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PortStats {
    /// Reconciliation passes run, full and targeted.
    pub reconciliations: u64,
    /// Deltas sent to listeners.
    pub deltas_emitted: u64,
    /// Listeners dropped because they reported themselves invalid.
    pub listeners_pruned: u64,
    /// Times an inventory handed out more than requested and was truncated.
    pub over_delivery_clamps: u64,
    /// Times an inventory reported a failure or an impossible insert result.
    pub capability_faults: u64,
}
