//! Port configuration.

use std::sync::Arc;

use slotlink_inventory::{ExactComparison, Facing, InventoryProvider, ItemComparison};
use slotlink_port::InventoryPort;
use slotlink_storage::StorageChannel;

use crate::error::ConfigError;

/// Default fastest polling interval, in ticks.
pub const DEFAULT_MIN_TICK_INTERVAL: u64 = 5;

/// Default slowest polling interval, in ticks.
pub const DEFAULT_MAX_TICK_INTERVAL: u64 = 120;

// ─────────────────────────────────────────────────────────────────────────────
// TickingRequest
// ─────────────────────────────────────────────────────────────────────────────

/// The polling interval range a monitor is scheduled within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickingRequest {
    /// Fastest rate: ticks between polls after an urgent answer.
    pub min: u64,
    /// Slowest rate: ticks between polls when idle.
    pub max: u64,
}

impl TickingRequest {
    /// Creates a request, checking that `1 <= min <= max`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] if `min` is zero and
    /// [`ConfigError::InvalidTickRange`] if `min > max`.
    pub fn new(min: u64, max: u64) -> Result<Self, ConfigError> {
        if min == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if min > max {
            return Err(ConfigError::InvalidTickRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for TickingRequest {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_TICK_INTERVAL,
            max: DEFAULT_MAX_TICK_INTERVAL,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PortConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for building and scheduling an [`InventoryPort`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use slotlink_core::PortConfig;
/// use slotlink_inventory::{BasicInventory, CapabilityCell, Facing};
/// use slotlink_storage::{MeInventory, StorageChannel};
///
/// let config = PortConfig::new()
///     .with_tick_interval(2, 40)
///     .with_channel(StorageChannel::Items);
///
/// let cell = Arc::new(CapabilityCell::new(Arc::new(BasicInventory::new(27, 64))));
/// let port = config.build_port(cell, Facing::West).unwrap();
/// assert_eq!(port.channel(), StorageChannel::Items);
/// assert_eq!(config.ticking_request().unwrap().max, 40);
/// ```
#[derive(Clone)]
pub struct PortConfig {
    /// Fastest polling interval, in ticks.
    pub min_tick_interval: u64,
    /// Slowest polling interval, in ticks.
    pub max_tick_interval: u64,
    /// Channel the port reports.
    pub channel: StorageChannel,
    /// Item equivalence used for matching and change detection.
    pub comparison: Arc<dyn ItemComparison>,
}

impl core::fmt::Debug for PortConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PortConfig")
            .field("min_tick_interval", &self.min_tick_interval)
            .field("max_tick_interval", &self.max_tick_interval)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            min_tick_interval: DEFAULT_MIN_TICK_INTERVAL,
            max_tick_interval: DEFAULT_MAX_TICK_INTERVAL,
            channel: StorageChannel::Items,
            comparison: Arc::new(ExactComparison),
        }
    }
}

impl PortConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the polling interval range.
    #[must_use]
    pub fn with_tick_interval(mut self, min: u64, max: u64) -> Self {
        self.min_tick_interval = min;
        self.max_tick_interval = max;
        self
    }

    /// Sets the reported channel.
    #[must_use]
    pub fn with_channel(mut self, channel: StorageChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Sets the item equivalence.
    #[must_use]
    pub fn with_comparison(mut self, comparison: Arc<dyn ItemComparison>) -> Self {
        self.comparison = comparison;
        self
    }

    /// Checks the interval range.
    ///
    /// # Errors
    ///
    /// See [`TickingRequest::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ticking_request().map(drop)
    }

    /// Returns the interval range to schedule the port with.
    ///
    /// # Errors
    ///
    /// See [`TickingRequest::new`].
    pub fn ticking_request(&self) -> Result<TickingRequest, ConfigError> {
        TickingRequest::new(self.min_tick_interval, self.max_tick_interval)
    }

    /// Validates the config and builds a port over `provider` on `facing`.
    ///
    /// # Errors
    ///
    /// See [`TickingRequest::new`].
    pub fn build_port(
        &self,
        provider: Arc<dyn InventoryProvider>,
        facing: Facing,
    ) -> Result<InventoryPort, ConfigError> {
        self.validate()?;
        Ok(InventoryPort::new(provider, facing)
            .with_channel(self.channel)
            .with_comparison(Arc::clone(&self.comparison)))
    }
}
