//! Provenance and transaction modes.

use core::fmt;
use std::sync::Arc;

/// Whether an operation commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actionable {
    /// Report the outcome without changing anything.
    Simulate,
    /// Perform the operation.
    Modulate,
}

impl Actionable {
    /// Returns `true` for [`Simulate`](Self::Simulate).
    #[must_use]
    pub fn is_simulate(self) -> bool {
        matches!(self, Self::Simulate)
    }
}

/// Who caused a change.
///
/// Opaque to the adapter; it is only stored and handed to listeners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ActionSource {
    /// Origin not known.
    #[default]
    Unknown,
    /// A machine or automation part.
    Machine {
        /// Diagnostic name of the machine.
        name: Arc<str>,
    },
    /// A player.
    Player {
        /// The player's name.
        name: Arc<str>,
    },
}

impl ActionSource {
    /// Creates a [`Machine`](Self::Machine) source.
    pub fn machine(name: impl Into<Arc<str>>) -> Self {
        Self::Machine { name: name.into() }
    }

    /// Creates a [`Player`](Self::Player) source.
    pub fn player(name: impl Into<Arc<str>>) -> Self {
        Self::Player { name: name.into() }
    }
}

impl fmt::Display for ActionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Machine { name } => write!(f, "machine:{name}"),
            Self::Player { name } => write!(f, "player:{name}"),
        }
    }
}
