//! Error types for port configuration and scheduling.

use thiserror::Error;

use crate::schedule::PortHandle;

/// Errors raised while validating a [`PortConfig`](crate::PortConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A tick interval of zero would poll the port forever within one tick.
    #[error("tick interval must be at least 1")]
    ZeroInterval,

    /// The fastest polling rate is slower than the slowest one.
    #[error("min tick interval {min} exceeds max tick interval {max}")]
    InvalidTickRange {
        /// Requested minimum interval.
        min: u64,
        /// Requested maximum interval.
        max: u64,
    },
}

/// Errors raised by the [`PortScheduler`](crate::PortScheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The handle was never issued or its monitor was unregistered.
    #[error("no port registered under {0}")]
    UnknownPort(PortHandle),
}
