//! "Same item" predicates.
//!
//! Whether two stacks hold the same item is decided outside the adapter. The
//! predicate must ignore counts and must be injective over whatever it does
//! compare: two stacks it calls equal are interchangeable as far as the
//! network is concerned.

use crate::stack::ItemStack;

/// Decides whether two stacks hold the same item, ignoring counts.
pub trait ItemComparison: Send + Sync + 'static {
    /// Returns `true` if `a` and `b` hold the same item.
    fn is_same_item(&self, a: &ItemStack, b: &ItemStack) -> bool;

    /// Like [`is_same_item`](Self::is_same_item), for possibly empty slots.
    ///
    /// An empty slot never matches anything, including another empty slot.
    fn is_same_slot_item(&self, a: Option<&ItemStack>, b: Option<&ItemStack>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.is_same_item(a, b),
            _ => false,
        }
    }
}

/// Compares the full [`ItemKey`](crate::ItemKey): id and tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactComparison;

impl ItemComparison for ExactComparison {
    fn is_same_item(&self, a: &ItemStack, b: &ItemStack) -> bool {
        a.key() == b.key()
    }
}

/// Compares only the registry id, ignoring tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItemIdComparison;

impl ItemComparison for ItemIdComparison {
    fn is_same_item(&self, a: &ItemStack, b: &ItemStack) -> bool {
        a.key().id() == b.key().id()
    }
}
