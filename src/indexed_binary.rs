//! Handle-indexed Binary Heap implementation
//!
//! An array-backed binary heap that hands back a stable handle for every
//! inserted value. Handles survive any number of sift swaps: nodes live in a
//! dense array, and a separate position map (see [`storage`](crate::storage))
//! records where each handle's node currently sits. Every swap rewrites both
//! map entries, so `position(key_at(i)) == i` holds after every operation.
//!
//! Through a handle a caller can read, replace or delete a value in place.
//! A replaced value is re-sifted in exactly one direction: up if it now
//! precedes its parent, down otherwise.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity         |
//! |---------------|--------------------|
//! | `push`        | O(log n) amortized |
//! | `pop`         | O(log n)           |
//! | `top`         | O(1)               |
//! | `update`      | O(log n)           |
//! | `delete`      | O(log n)           |
//! | `value_of`    | O(1)               |
//! | `contains`    | O(1)               |
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_heaps::indexed_binary::IndexedBinaryHeap;
//! use rust_ordered_heaps::ordering::Order;
//!
//! let mut heap = IndexedBinaryHeap::with_order(Order::reverse());
//! let h1 = heap.push(5);
//! let h2 = heap.push(3);
//! let _h3 = heap.push(8);
//!
//! heap.update(&h2, 100).unwrap();
//! assert_eq!(heap.top(), Ok(&100));
//!
//! heap.delete(&h1).unwrap();
//! assert!(!heap.contains(&h1));
//! assert!(heap.value_of(&h1).is_err());
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::ordering::{Compare, Order};
use crate::sift::{left, parent};
use crate::storage::{HashKey, HashPositions, PositionStore};
use crate::traits::{Handle, HandleHeap, Heap, HeapError};

/// Source of per-heap identities, so handles from one heap are rejected by another
static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

fn next_heap_id() -> u64 {
    NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Handle to an element of an [`IndexedBinaryHeap`]
///
/// Carries the identity of the issuing heap along with the position-map key.
/// Handles are plain values: holding one does not keep anything alive, and a
/// handle whose element has been popped or deleted is simply rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexedHandle<K = HashKey> {
    heap: u64,
    key: K,
}

impl<K: Copy + Eq + std::hash::Hash + std::fmt::Debug> Handle for IndexedHandle<K> {}

#[derive(Debug)]
struct Node<T, K> {
    value: T,
    key: K,
}

/// A binary heap with stable per-element handles
///
/// `C` is the ordering (the top is the element that precedes all others) and
/// `S` is the position-map backend.
#[derive(Debug)]
pub struct IndexedBinaryHeap<T, C = Order, S: PositionStore = HashPositions> {
    nodes: Vec<Node<T, S::Key>>,
    positions: S,
    order: C,
    id: u64,
}

impl<T: Ord> IndexedBinaryHeap<T> {
    /// Creates an empty min-heap
    pub fn new() -> Self {
        Self::with_order(Order::forward())
    }

    /// Creates an empty min-heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, Order::forward())
    }

    /// Builds a min-heap from `values` in O(n)
    ///
    /// Returns the heap together with one handle per value, in input order.
    pub fn from_vec(values: Vec<T>) -> (Self, Vec<IndexedHandle>) {
        Self::from_vec_with_order(values, Order::forward())
    }
}

impl<T, C: Compare<T>> IndexedBinaryHeap<T, C> {
    /// Creates an empty heap ordered by `order`
    pub fn with_order(order: C) -> Self {
        Self::with_storage(order, HashPositions::default())
    }

    /// Creates an empty heap ordered by `order` with room for `capacity` elements
    pub fn with_capacity_and_order(capacity: usize, order: C) -> Self {
        let mut heap = Self::with_order(order);
        heap.nodes.reserve(capacity);
        heap
    }

    /// Builds a heap from `values` in O(n)
    ///
    /// Returns the heap together with one handle per value, in input order.
    pub fn from_vec_with_order(values: Vec<T>, order: C) -> (Self, Vec<IndexedHandle>) {
        Self::from_vec_with_storage(values, order, HashPositions::default())
    }
}

impl<T, C: Compare<T>, S: PositionStore> IndexedBinaryHeap<T, C, S> {
    /// Creates an empty heap ordered by `order` that tracks positions in `storage`
    ///
    /// Any keys already held by `storage` are discarded.
    pub fn with_storage(order: C, mut storage: S) -> Self {
        storage.clear();
        Self {
            nodes: Vec::new(),
            positions: storage,
            order,
            id: next_heap_id(),
        }
    }

    /// Builds a heap from `values` in O(n), tracking positions in `storage`
    ///
    /// Returns the heap together with one handle per value, in input order.
    pub fn from_vec_with_storage(
        values: Vec<T>,
        order: C,
        storage: S,
    ) -> (Self, Vec<IndexedHandle<S::Key>>) {
        let mut heap = Self::with_storage(order, storage);
        heap.nodes.reserve(values.len());
        let mut handles = Vec::with_capacity(values.len());
        for value in values {
            let key = heap.positions.insert(heap.nodes.len());
            heap.nodes.push(Node { value, key });
            handles.push(heap.handle_for(key));
        }
        for i in (0..heap.nodes.len() / 2).rev() {
            heap.sift_down(i);
        }
        (heap, handles)
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the top element without removing it
    pub fn top(&self) -> Result<&T, HeapError> {
        self.nodes
            .first()
            .map(|node| &node.value)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Returns the top element, or `None` when empty
    pub fn peek(&self) -> Option<&T> {
        self.nodes.first().map(|node| &node.value)
    }

    /// Returns the top element together with its handle
    pub fn top_with_handle(&self) -> Result<(&T, IndexedHandle<S::Key>), HeapError> {
        let node = self.nodes.first().ok_or(HeapError::EmptyHeap)?;
        Ok((&node.value, self.handle_for(node.key)))
    }

    /// Inserts an element, returning a handle to it
    pub fn push(&mut self, value: T) -> IndexedHandle<S::Key> {
        let index = self.nodes.len();
        let key = self.positions.insert(index);
        self.nodes.push(Node { value, key });
        self.sift_up(index);
        self.handle_for(key)
    }

    /// Removes and returns the top element
    pub fn pop(&mut self) -> Result<T, HeapError> {
        if self.nodes.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        Ok(self.remove_at(0).value)
    }

    /// Removes the top element, returning it with its (now dead) handle
    pub fn pop_with_handle(&mut self) -> Result<(T, IndexedHandle<S::Key>), HeapError> {
        if self.nodes.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        let node = self.remove_at(0);
        Ok((node.value, self.handle_for(node.key)))
    }

    /// Replaces the value behind `handle` and re-sifts it
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is dead or was issued
    /// by another heap. The heap is left untouched in that case.
    pub fn update(&mut self, handle: &IndexedHandle<S::Key>, value: T) -> Result<(), HeapError> {
        let index = self.resolve(handle)?;
        self.nodes[index].value = value;
        self.restore(index);
        Ok(())
    }

    /// Mutates the value behind `handle` in place and re-sifts it
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is dead or foreign.
    pub fn update_with<F>(&mut self, handle: &IndexedHandle<S::Key>, f: F) -> Result<(), HeapError>
    where
        F: FnOnce(&mut T),
    {
        let index = self.resolve(handle)?;
        f(&mut self.nodes[index].value);
        self.restore(index);
        Ok(())
    }

    /// Removes the element behind `handle` and returns it
    ///
    /// The handle is dead afterwards.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is dead or foreign.
    pub fn delete(&mut self, handle: &IndexedHandle<S::Key>) -> Result<T, HeapError> {
        let index = self.resolve(handle)?;
        Ok(self.remove_at(index).value)
    }

    /// Returns the value behind `handle`
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is dead or foreign.
    pub fn value_of(&self, handle: &IndexedHandle<S::Key>) -> Result<&T, HeapError> {
        let index = self.resolve(handle)?;
        Ok(&self.nodes[index].value)
    }

    /// Returns true if `handle` refers to a live element of this heap
    pub fn contains(&self, handle: &IndexedHandle<S::Key>) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Pops every element, returning them in pop order
    pub fn extract_all(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.nodes.len());
        while let Ok(value) = self.pop() {
            out.push(value);
        }
        out
    }

    /// Removes every element, invalidating all outstanding handles
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.positions.clear();
    }

    /// Iterates over the values in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.nodes.iter().map(|node| &node.value)
    }

    /// Iterates over `(handle, value)` pairs in arbitrary order
    pub fn iter_with_handles(&self) -> impl Iterator<Item = (IndexedHandle<S::Key>, &T)> + '_ {
        self.nodes
            .iter()
            .map(move |node| (self.handle_for(node.key), &node.value))
    }

    /// The ordering this heap was built with
    pub fn order(&self) -> &C {
        &self.order
    }

    /// Returns true if the heap invariant holds and the position map agrees
    /// with the node array
    pub fn is_valid(&self) -> bool {
        let ordered = (1..self.nodes.len())
            .all(|i| !self.order.less(&self.nodes[i].value, &self.nodes[parent(i)].value));
        let mapped = self.positions.len() == self.nodes.len()
            && self
                .nodes
                .iter()
                .enumerate()
                .all(|(i, node)| self.positions.get(node.key) == Some(i));
        ordered && mapped
    }

    fn handle_for(&self, key: S::Key) -> IndexedHandle<S::Key> {
        IndexedHandle { heap: self.id, key }
    }

    fn resolve(&self, handle: &IndexedHandle<S::Key>) -> Result<usize, HeapError> {
        if handle.heap != self.id {
            return Err(HeapError::InvalidHandle);
        }
        let index = self
            .positions
            .get(handle.key)
            .ok_or(HeapError::InvalidHandle)?;
        debug_assert!(self.nodes[index].key == handle.key);
        Ok(index)
    }

    /// Swaps two nodes and rewrites both position-map entries
    fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
        self.positions.set(self.nodes[i].key, i);
        self.positions.set(self.nodes[j].key, j);
    }

    #[inline]
    fn less(&self, i: usize, j: usize) -> bool {
        self.order.less(&self.nodes[i].value, &self.nodes[j].value)
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let p = parent(index);
            if self.less(index, p) {
                self.swap(index, p);
                index = p;
            } else {
                break;
            }
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.nodes.len();
        loop {
            let l = left(index);
            if l >= len {
                break;
            }
            let r = l + 1;
            let mut best = l;
            if r < len && self.less(r, l) {
                best = r;
            }

            if self.less(best, index) {
                self.swap(index, best);
                index = best;
            } else {
                break;
            }
        }
        index
    }

    /// Re-sifts a node whose value just changed, in whichever single
    /// direction the invariant needs
    fn restore(&mut self, index: usize) {
        if index > 0 && self.less(index, parent(index)) {
            self.sift_up(index);
        } else {
            self.sift_down(index);
        }
    }

    /// Detaches the node at `index`, fills the hole with the last node and
    /// repairs the invariant there
    fn remove_at(&mut self, index: usize) -> Node<T, S::Key> {
        let node = self.nodes.swap_remove(index);
        self.positions.remove(node.key);
        if index < self.nodes.len() {
            self.positions.set(self.nodes[index].key, index);
            self.restore(index);
        }
        node
    }
}

impl<T, C: Compare<T>, S: PositionStore> Heap<T> for IndexedBinaryHeap<T, C, S> {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, value: T) {
        IndexedBinaryHeap::push(self, value);
    }

    fn top(&self) -> Result<&T, HeapError> {
        IndexedBinaryHeap::top(self)
    }

    fn pop(&mut self) -> Result<T, HeapError> {
        IndexedBinaryHeap::pop(self)
    }
}

impl<T, C: Compare<T>, S: PositionStore> HandleHeap<T> for IndexedBinaryHeap<T, C, S> {
    type Handle = IndexedHandle<S::Key>;

    fn push_with_handle(&mut self, value: T) -> Self::Handle {
        IndexedBinaryHeap::push(self, value)
    }

    fn update(&mut self, handle: &Self::Handle, value: T) -> Result<(), HeapError> {
        IndexedBinaryHeap::update(self, handle, value)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<T, HeapError> {
        IndexedBinaryHeap::delete(self, handle)
    }

    fn value_of(&self, handle: &Self::Handle) -> Result<&T, HeapError> {
        IndexedBinaryHeap::value_of(self, handle)
    }

    fn contains(&self, handle: &Self::Handle) -> bool {
        IndexedBinaryHeap::contains(self, handle)
    }

    fn top_with_handle(&self) -> Result<(&T, Self::Handle), HeapError> {
        IndexedBinaryHeap::top_with_handle(self)
    }
}

impl<T, C: Compare<T> + Default, S: PositionStore> Default for IndexedBinaryHeap<T, C, S> {
    fn default() -> Self {
        Self::with_storage(C::default(), S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = IndexedBinaryHeap::new();
        assert_eq!(heap.top(), Err(HeapError::EmptyHeap));
        assert_eq!(heap.pop(), Err(HeapError::EmptyHeap));

        let h5 = heap.push(5);
        let h1 = heap.push(1);
        let h3 = heap.push(3);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.top(), Ok(&1));
        assert_eq!(heap.top_with_handle(), Ok((&1, h1)));
        assert_eq!(heap.value_of(&h5), Ok(&5));
        assert_eq!(heap.value_of(&h3), Ok(&3));
        assert!(heap.is_valid());

        assert_eq!(heap.extract_all(), vec![1, 3, 5]);
        assert!(!heap.contains(&h1));
        assert!(!heap.contains(&h5));
    }

    #[test]
    fn test_update_then_delete() {
        let mut heap = IndexedBinaryHeap::with_order(Order::reverse());
        let h1 = heap.push(5);
        let h2 = heap.push(3);
        let h3 = heap.push(8);

        heap.update(&h2, 100).unwrap();
        assert_eq!(heap.top(), Ok(&100));
        assert!(heap.is_valid());

        heap.delete(&h1).unwrap();
        assert!(!heap.contains(&h1));
        assert_eq!(heap.delete(&h1), Err(HeapError::InvalidHandle));
        assert_eq!(heap.update(&h1, 1), Err(HeapError::InvalidHandle));
        assert_eq!(heap.value_of(&h3), Ok(&8));
        assert_eq!(heap.extract_all(), vec![100, 8]);
    }

    #[test]
    fn test_update_moves_down() {
        let mut heap = IndexedBinaryHeap::new();
        let handles: Vec<_> = (0..10).map(|i| heap.push(i)).collect();

        // The root sinks to the bottom
        heap.update(&handles[0], 50).unwrap();
        assert!(heap.is_valid());
        assert_eq!(heap.top(), Ok(&1));
        assert_eq!(heap.value_of(&handles[0]), Ok(&50));

        // A leaf rises to the root
        heap.update(&handles[9], -1).unwrap();
        assert!(heap.is_valid());
        assert_eq!(heap.top_with_handle(), Ok((&-1, handles[9])));
    }

    #[test]
    fn test_update_with() {
        let mut heap = IndexedBinaryHeap::with_order(Order::by_key(|t: &(char, i32)| t.1));
        let a = heap.push(('a', 10));
        let _b = heap.push(('b', 20));

        heap.update_with(&a, |t| t.1 = 30).unwrap();
        assert_eq!(heap.top().map(|t| t.0), Ok('b'));
        assert_eq!(heap.value_of(&a), Ok(&('a', 30)));
        assert!(heap.is_valid());
    }

    #[test]
    fn test_delete_interior_node() {
        let mut heap = IndexedBinaryHeap::new();
        let handles: Vec<_> = [7, 2, 9, 4, 1, 8, 3].iter().map(|&v| heap.push(v)).collect();

        assert_eq!(heap.delete(&handles[3]), Ok(4));
        assert!(heap.is_valid());
        assert_eq!(heap.len(), 6);

        // Deleting the last slot needs no repair at all
        let (last_value, last_handle) = heap
            .iter_with_handles()
            .last()
            .map(|(h, v)| (*v, h))
            .unwrap();
        assert_eq!(heap.delete(&last_handle), Ok(last_value));
        assert!(heap.is_valid());

        for (i, h) in handles.iter().enumerate() {
            if i != 3 && *h != last_handle {
                assert!(heap.contains(h));
            }
        }
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut a = IndexedBinaryHeap::new();
        let mut b = IndexedBinaryHeap::new();
        let ha = a.push(1);
        let _hb = b.push(1);

        assert!(!b.contains(&ha));
        assert_eq!(b.value_of(&ha), Err(HeapError::InvalidHandle));
        assert_eq!(b.update(&ha, 0), Err(HeapError::InvalidHandle));
        assert_eq!(b.delete(&ha), Err(HeapError::InvalidHandle));
        assert_eq!(b.len(), 1);
        assert!(a.contains(&ha));
    }

    #[test]
    fn test_pop_invalidates_handle() {
        let mut heap = IndexedBinaryHeap::new();
        let h = heap.push(1);
        let other = heap.push(2);

        let (value, popped) = heap.pop_with_handle().unwrap();
        assert_eq!(value, 1);
        assert_eq!(popped, h);
        assert!(!heap.contains(&h));
        assert!(heap.contains(&other));
    }

    #[test]
    fn test_clear_invalidates_all_handles() {
        let mut heap = IndexedBinaryHeap::new();
        let handles: Vec<_> = (0..5).map(|i| heap.push(i)).collect();
        heap.clear();
        assert!(heap.is_empty());
        assert!(handles.iter().all(|h| !heap.contains(h)));

        let fresh = heap.push(0);
        assert!(heap.contains(&fresh));
        assert!(!heap.contains(&handles[0]));
    }

    #[test]
    fn test_from_vec_with_order() {
        let values = vec![9, 3, 7, 1, 5];
        let (mut heap, handles) =
            IndexedBinaryHeap::from_vec_with_order(values.clone(), Order::reverse());
        assert!(heap.is_valid());
        for (h, v) in handles.iter().zip(&values) {
            assert_eq!(heap.value_of(h), Ok(v));
        }
        assert_eq!(heap.extract_all(), vec![9, 7, 5, 3, 1]);
    }

    #[test]
    fn test_from_vec_natural_order() {
        let (mut heap, handles) = IndexedBinaryHeap::from_vec(vec![4, 8, 2, 6]);
        assert!(heap.is_valid());
        assert_eq!(heap.top_with_handle(), Ok((&2, handles[2])));
        heap.update(&handles[1], 0).unwrap();
        assert_eq!(heap.extract_all(), vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_with_storage_discards_stale_keys() {
        let mut storage = HashPositions::default();
        let stale = storage.insert(0);
        storage.insert(1);

        let mut heap = IndexedBinaryHeap::with_storage(Order::forward(), storage);
        let h = heap.push(5);
        assert_eq!(heap.value_of(&h), Ok(&5));
        assert!(heap.is_valid());
        assert_eq!(heap.len(), 1);

        // a key minted before the heap existed never resolves
        let forged = IndexedHandle {
            heap: heap.id,
            key: stale,
        };
        assert!(!heap.contains(&forged));
    }

    #[cfg(feature = "arena-storage")]
    #[test]
    fn test_slotmap_backend() {
        use crate::storage::SlotMapPositions;

        let mut heap =
            IndexedBinaryHeap::with_storage(Order::forward(), SlotMapPositions::default());
        let a = heap.push(4);
        let b = heap.push(2);
        heap.update(&a, 1).unwrap();
        assert_eq!(heap.top_with_handle(), Ok((&1, a)));
        assert_eq!(heap.pop(), Ok(1));
        assert!(!heap.contains(&a));
        assert!(heap.contains(&b));
        assert!(heap.is_valid());
    }
}
