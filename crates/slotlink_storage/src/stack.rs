//! Summarized stacks and storage channels.

use core::fmt;

use slotlink_inventory::{ItemKey, ItemStack};

/// The kind of resource a storage handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageChannel {
    /// Discrete items.
    #[default]
    Items,
    /// Fluids, measured in millibuckets.
    Fluids,
}

impl fmt::Display for StorageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items => f.write_str("items"),
            Self::Fluids => f.write_str("fluids"),
        }
    }
}

/// A network-facing quantity of one item.
///
/// Unlike [`ItemStack`], the amount is a wide signed integer: the network
/// aggregates many slots, and change notifications carry negative amounts
/// for items that disappeared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageStack {
    key: ItemKey,
    amount: i64,
}

impl StorageStack {
    /// Creates a stack of `amount` items.
    #[must_use]
    pub fn new(key: ItemKey, amount: i64) -> Self {
        Self { key, amount }
    }

    /// Summarizes a slot's contents; `None` for an empty slot.
    #[must_use]
    pub fn from_item(stack: &ItemStack) -> Option<Self> {
        if stack.is_empty() {
            return None;
        }
        Some(Self::new(stack.key().clone(), i64::from(stack.count())))
    }

    /// Converts back into a slot stack, clamping to the slot count range.
    ///
    /// Returns `None` if the amount is zero or negative.
    #[must_use]
    pub fn to_item_stack(&self) -> Option<ItemStack> {
        let count = u32::try_from(self.amount.max(0)).unwrap_or(u32::MAX);
        ItemStack::new(self.key.clone(), count).non_empty()
    }

    /// Returns the item identity.
    #[must_use]
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Returns the (possibly negative) amount.
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns a copy with a different amount.
    #[must_use]
    pub fn with_amount(&self, amount: i64) -> Self {
        Self::new(self.key.clone(), amount)
    }

    /// Returns a copy with the amount negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        self.with_amount(-self.amount)
    }
}

impl fmt::Display for StorageStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} {}", self.amount, self.key)
    }
}
