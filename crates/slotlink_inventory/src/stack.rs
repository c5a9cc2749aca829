//! Item identity and raw slot contents.

use core::fmt;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// ItemKey
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a stackable item, excluding quantity.
///
/// An item is identified by its registry id (e.g. `"minecraft:iron_ingot"`)
/// and an optional opaque tag that distinguishes otherwise identical items
/// (damage, enchantments, custom data). Both parts are reference counted so
/// cloning a key is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    id: Arc<str>,
    tag: Option<Arc<str>>,
}

impl ItemKey {
    /// Creates an untagged key.
    #[must_use]
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            tag: None,
        }
    }

    /// Returns this key with the given tag attached.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Arc<str>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns the registry id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}{{{}}}", self.id, tag),
            None => f.write_str(&self.id),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ItemStack
// ─────────────────────────────────────────────────────────────────────────────

/// The raw contents of one inventory slot.
///
/// Empty slots are represented as `Option::<ItemStack>::None` throughout the
/// capability API. A stack with a count of zero is treated as empty by
/// [`ItemStack::non_empty`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemStack {
    key: ItemKey,
    count: u32,
}

impl ItemStack {
    /// Creates a stack of `count` items.
    #[must_use]
    pub fn new(key: ItemKey, count: u32) -> Self {
        Self { key, count }
    }

    /// Returns the item identity.
    #[must_use]
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Returns the number of items in the stack.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns `true` if the stack holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `None` for an empty stack, `Some(self)` otherwise.
    #[must_use]
    pub fn non_empty(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    /// Returns a copy of this stack with a different count.
    #[must_use]
    pub fn with_count(&self, count: u32) -> Self {
        Self {
            key: self.key.clone(),
            count,
        }
    }

    /// Sets the count.
    pub fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    /// Adds `amount` items, saturating at `u32::MAX`.
    pub fn grow(&mut self, amount: u32) {
        self.count = self.count.saturating_add(amount);
    }

    /// Splits off up to `amount` items into a new stack.
    ///
    /// Returns `None` if nothing could be split off.
    pub fn split(&mut self, amount: u32) -> Option<Self> {
        let taken = amount.min(self.count);
        self.count -= taken;
        self.with_count(taken).non_empty()
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.count, self.key)
    }
}
