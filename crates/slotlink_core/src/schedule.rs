//! Tick-driven polling of monitors.
//!
//! [`PortScheduler`] owns a set of [`TickingMonitor`]s and polls each one
//! at its own interval. A monitor's answer moves its interval within the
//! [`TickingRequest`] it was registered with:
//!
//! | Answer | Next interval |
//! |--------|---------------|
//! | `Urgent` | `min` |
//! | `Faster` | half the current, at least `min` |
//! | `Same` | unchanged |
//! | `Slower` | current + 1, at most `max` |
//! | `Idle` | `max` |
//! | `Sleep` | not polled again until [`wake`](PortScheduler::wake) |

use core::fmt;

use indexmap::IndexMap;
use slotlink_port::InventoryPort;
use slotlink_storage::{TickRateModulation, TickingMonitor};

use crate::config::TickingRequest;
use crate::error::ScheduleError;

/// Identifies a monitor registered with a [`PortScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortHandle(u64);

impl fmt::Display for PortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port#{}", self.0)
    }
}

struct Entry<M> {
    monitor: M,
    request: TickingRequest,
    interval: u64,
    /// Tick of the next poll; `None` while asleep.
    due: Option<u64>,
}

impl<M> Entry<M> {
    fn apply(&mut self, modulation: TickRateModulation, now: u64) {
        let TickingRequest { min, max } = self.request;
        self.interval = match modulation {
            TickRateModulation::Urgent => min,
            TickRateModulation::Faster => (self.interval / 2).max(min),
            TickRateModulation::Same | TickRateModulation::Sleep => self.interval,
            TickRateModulation::Slower => (self.interval + 1).min(max),
            TickRateModulation::Idle => max,
        };
        self.due = (modulation != TickRateModulation::Sleep).then(|| now + self.interval);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PortScheduler
// ─────────────────────────────────────────────────────────────────────────────

/// Polls registered monitors as ticks advance.
///
/// Monitors due on the same tick are polled in registration order. A newly
/// registered or woken monitor is polled on the next tick and starts at its
/// fastest interval.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use slotlink_core::{PortConfig, PortScheduler};
/// use slotlink_inventory::{BasicInventory, CapabilityCell, Facing};
///
/// let config = PortConfig::new().with_tick_interval(1, 8);
/// let cell = Arc::new(CapabilityCell::new(Arc::new(BasicInventory::new(9, 64))));
///
/// let mut scheduler = PortScheduler::new();
/// let handle = scheduler.register(
///     config.build_port(cell, Facing::Up).unwrap(),
///     config.ticking_request().unwrap(),
/// );
///
/// // Nothing changes, so the port backs off one tick per poll.
/// scheduler.run(10);
/// assert!(scheduler.interval_of(handle).unwrap() > 1);
/// ```
pub struct PortScheduler<M = InventoryPort> {
    now: u64,
    next_handle: u64,
    entries: IndexMap<PortHandle, Entry<M>>,
}

impl<M> fmt::Debug for PortScheduler<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortScheduler")
            .field("now", &self.now)
            .field("monitors", &self.entries.len())
            .field("sleeping", &self.sleeping())
            .finish()
    }
}

impl<M> PortScheduler<M> {
    fn sleeping(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.due.is_none())
            .count()
    }
}

impl<M> Default for PortScheduler<M> {
    fn default() -> Self {
        Self {
            now: 0,
            next_handle: 0,
            entries: IndexMap::new(),
        }
    }
}

impl<M: TickingMonitor> PortScheduler<M> {
    /// Creates an empty scheduler at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current tick.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Returns the number of registered monitors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Takes ownership of `monitor` and schedules it for the next tick.
    pub fn register(&mut self, monitor: M, request: TickingRequest) -> PortHandle {
        let handle = PortHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(
            handle,
            Entry {
                monitor,
                request,
                interval: request.min,
                due: Some(self.now + 1),
            },
        );
        tracing::debug!(%handle, min = request.min, max = request.max, "monitor registered");
        handle
    }

    /// Removes a monitor and hands it back.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownPort`] if `handle` is not registered.
    pub fn unregister(&mut self, handle: PortHandle) -> Result<M, ScheduleError> {
        let entry = self
            .entries
            .shift_remove(&handle)
            .ok_or(ScheduleError::UnknownPort(handle))?;
        tracing::debug!(%handle, "monitor unregistered");
        Ok(entry.monitor)
    }

    /// Schedules a monitor for the next tick at its fastest interval.
    ///
    /// Works for sleeping and awake monitors alike.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownPort`] if `handle` is not registered.
    pub fn wake(&mut self, handle: PortHandle) -> Result<(), ScheduleError> {
        let entry = self
            .entries
            .get_mut(&handle)
            .ok_or(ScheduleError::UnknownPort(handle))?;
        if entry.due.is_none() {
            tracing::debug!(%handle, "waking sleeping monitor");
        }
        entry.interval = entry.request.min;
        entry.due = Some(self.now + 1);
        Ok(())
    }

    /// Returns the current polling interval of a monitor.
    #[must_use]
    pub fn interval_of(&self, handle: PortHandle) -> Option<u64> {
        self.entries.get(&handle).map(|entry| entry.interval)
    }

    /// Returns `true` if the monitor answered `Sleep` and was not woken since.
    #[must_use]
    pub fn is_sleeping(&self, handle: PortHandle) -> Option<bool> {
        self.entries.get(&handle).map(|entry| entry.due.is_none())
    }

    /// Returns a registered monitor.
    #[must_use]
    pub fn get(&self, handle: PortHandle) -> Option<&M> {
        self.entries.get(&handle).map(|entry| &entry.monitor)
    }

    /// Returns a registered monitor for direct use between ticks.
    pub fn get_mut(&mut self, handle: PortHandle) -> Option<&mut M> {
        self.entries.get_mut(&handle).map(|entry| &mut entry.monitor)
    }

    /// Advances one tick and polls every monitor that is due.
    ///
    /// Returns the number of monitors polled.
    pub fn tick(&mut self) -> usize {
        self.now += 1;
        let now = self.now;
        let mut polled = 0;

        for (handle, entry) in &mut self.entries {
            if entry.due.is_none_or(|due| due > now) {
                continue;
            }
            let modulation = entry.monitor.on_tick();
            entry.apply(modulation, now);
            polled += 1;

            tracing::trace!(%handle, ?modulation, interval = entry.interval, "monitor polled");
            if modulation == TickRateModulation::Sleep {
                tracing::debug!(%handle, "monitor went to sleep");
            }
        }

        polled
    }

    /// Runs `ticks` ticks. Returns the total number of polls.
    pub fn run(&mut self, ticks: u64) -> usize {
        (0..ticks).map(|_| self.tick()).sum()
    }
}
