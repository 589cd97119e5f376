//! Pluggable position-map backends for the handle-indexed heap
//!
//! [`IndexedBinaryHeap`](crate::indexed_binary::IndexedBinaryHeap) hands out
//! handles that must survive any number of sift swaps. Each handle wraps a key
//! into a position map, and the map is rewritten on every swap so that
//! `position(key_at(i)) == i` always holds.
//!
//! - [`HashPositions`]: Default, `FxHashMap` keyed by a counter that never repeats
//! - [`SlotMapPositions`]: Arena-based storage using `slotmap` generational keys
//!
//! # Example
//!
//! ```rust,ignore
//! // Using the default HashPositions
//! let mut heap: IndexedBinaryHeap<i32> = IndexedBinaryHeap::new();
//!
//! // Using SlotMapPositions (requires feature flag)
//! #[cfg(feature = "arena-storage")]
//! let mut heap = IndexedBinaryHeap::with_storage(Order::forward(), SlotMapPositions::default());
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[cfg(feature = "arena-storage")]
use slotmap::{new_key_type, SlotMap};

/// Trait for position-map backends
///
/// A backend maps opaque keys to array positions. Keys handed out by
/// [`insert`](PositionStore::insert) must never resolve again once removed,
/// so a stale handle can always be told apart from a live one.
pub trait PositionStore: Default {
    /// Key type embedded in handles
    type Key: Copy + Eq + Hash + fmt::Debug;

    /// Records a new element at `position`, returning its key
    fn insert(&mut self, position: usize) -> Self::Key;

    /// Current position of `key`, or `None` if the key is dead
    fn get(&self, key: Self::Key) -> Option<usize>;

    /// Moves a live key to `position`
    fn set(&mut self, key: Self::Key, position: usize);

    /// Forgets `key`, returning its last position
    fn remove(&mut self, key: Self::Key) -> Option<usize>;

    /// Forgets every key
    fn clear(&mut self);

    /// Number of live keys
    fn len(&self) -> usize;

    /// Returns true if no key is live
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// HashPositions - Default implementation
// ============================================================================

/// Hash-map position storage (default)
///
/// Keys are drawn from a 64-bit counter that only moves forward, so a key is
/// never handed out twice for the lifetime of the store, even across
/// [`clear`](PositionStore::clear).
#[derive(Debug, Default)]
pub struct HashPositions {
    positions: FxHashMap<u64, usize>,
    next_key: u64,
}

/// Key type for [`HashPositions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashKey(u64);

impl PositionStore for HashPositions {
    type Key = HashKey;

    fn insert(&mut self, position: usize) -> Self::Key {
        let key = self.next_key;
        self.next_key += 1;
        self.positions.insert(key, position);
        HashKey(key)
    }

    #[inline]
    fn get(&self, key: Self::Key) -> Option<usize> {
        self.positions.get(&key.0).copied()
    }

    #[inline]
    fn set(&mut self, key: Self::Key, position: usize) {
        if let Some(slot) = self.positions.get_mut(&key.0) {
            *slot = position;
        }
    }

    fn remove(&mut self, key: Self::Key) -> Option<usize> {
        self.positions.remove(&key.0)
    }

    fn clear(&mut self) {
        self.positions.clear();
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}

// ============================================================================
// SlotMapPositions - Arena-based implementation
// ============================================================================

#[cfg(feature = "arena-storage")]
new_key_type! {
    /// SlotMap key type for arena position storage
    pub struct SlotPositionKey;
}

/// SlotMap-based arena storage
///
/// Slots are reused after removal, but each reuse bumps the slot's
/// generation, so keys from a previous occupant no longer resolve.
///
/// # Feature Flag
/// Requires the `arena-storage` feature to be enabled.
#[cfg(feature = "arena-storage")]
#[derive(Debug, Clone)]
pub struct SlotMapPositions {
    positions: SlotMap<SlotPositionKey, usize>,
}

#[cfg(feature = "arena-storage")]
impl Default for SlotMapPositions {
    fn default() -> Self {
        Self {
            positions: SlotMap::with_key(),
        }
    }
}

#[cfg(feature = "arena-storage")]
impl PositionStore for SlotMapPositions {
    type Key = SlotPositionKey;

    fn insert(&mut self, position: usize) -> Self::Key {
        self.positions.insert(position)
    }

    #[inline]
    fn get(&self, key: Self::Key) -> Option<usize> {
        self.positions.get(key).copied()
    }

    #[inline]
    fn set(&mut self, key: Self::Key, position: usize) {
        if let Some(slot) = self.positions.get_mut(key) {
            *slot = position;
        }
    }

    fn remove(&mut self, key: Self::Key) -> Option<usize> {
        self.positions.remove(key)
    }

    fn clear(&mut self) {
        // SlotMap::clear bumps generations, so old keys stay dead
        self.positions.clear();
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}
