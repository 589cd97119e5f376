//! Plain Binary Heap implementation
//!
//! An array-backed binary heap ordered by a [`Compare`] strategy. Values are
//! opaque once inserted: there are no handles, only `push`, `pop` and `top`.
//! For in-place updates of stored values use
//! [`IndexedBinaryHeap`](crate::indexed_binary::IndexedBinaryHeap).
//!
//! # Time Complexity
//!
//! | Operation     | Complexity         |
//! |---------------|--------------------|
//! | `push`        | O(log n) amortized |
//! | `pop`         | O(log n)           |
//! | `top`         | O(1)               |
//! | `from_vec`    | O(n)               |
//! | `merge`       | O(n + m)           |
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_heaps::binary::BinaryHeap;
//! use rust_ordered_heaps::ordering::Order;
//!
//! let mut heap = BinaryHeap::with_order(Order::reverse());
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//!
//! assert_eq!(heap.top(), Ok(&3));
//! assert_eq!(heap.extract_all(), vec![3, 2, 1]);
//! assert!(heap.pop().is_err());
//! ```

use crate::ordering::{Compare, Order};
use crate::sift;
use crate::traits::{Heap, HeapError, MergeableHeap};

/// An array-backed binary heap
///
/// The top is the element that precedes all others under `C`: with the
/// default [`Order::forward`] this is a min-heap.
#[derive(Debug, Clone)]
pub struct BinaryHeap<T, C = Order> {
    data: Vec<T>,
    order: C,
}

impl<T: Ord> BinaryHeap<T> {
    /// Creates an empty min-heap
    pub fn new() -> Self {
        Self::with_order(Order::forward())
    }

    /// Creates an empty min-heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, Order::forward())
    }

    /// Builds a min-heap from `data` in O(n)
    pub fn from_vec(data: Vec<T>) -> Self {
        Self::from_vec_with_order(data, Order::forward())
    }
}

impl<T, C: Compare<T>> BinaryHeap<T, C> {
    /// Creates an empty heap ordered by `order`
    pub fn with_order(order: C) -> Self {
        Self {
            data: Vec::new(),
            order,
        }
    }

    /// Creates an empty heap ordered by `order` with room for `capacity` elements
    pub fn with_capacity_and_order(capacity: usize, order: C) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            order,
        }
    }

    /// Builds a heap from `data` by bottom-up heapification in O(n)
    pub fn from_vec_with_order(mut data: Vec<T>, order: C) -> Self {
        sift::heapify(&mut data, &order);
        Self { data, order }
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the top element without removing it
    pub fn top(&self) -> Result<&T, HeapError> {
        self.data.first().ok_or(HeapError::EmptyHeap)
    }

    /// Returns the top element, or `None` when empty
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Inserts an element
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        let last = self.data.len() - 1;
        sift::sift_up(&mut self.data, last, &self.order);
    }

    /// Removes and returns the top element
    pub fn pop(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyHeap);
        }

        let top = self.data.swap_remove(0);
        if !self.data.is_empty() {
            sift::sift_down(&mut self.data, 0, &self.order);
        }
        Ok(top)
    }

    /// Pushes `value` and pops the top in a single sift
    ///
    /// Returns `value` itself when it would become the new top, leaving the
    /// heap untouched.
    pub fn push_pop(&mut self, mut value: T) -> T {
        match self.data.first_mut() {
            Some(top) if self.order.less(top, &value) => {
                std::mem::swap(top, &mut value);
                sift::sift_down(&mut self.data, 0, &self.order);
                value
            }
            _ => value,
        }
    }

    /// Pops the top and pushes `value` in a single sift
    ///
    /// Unlike [`push_pop`](Self::push_pop) the current top is always removed,
    /// even if `value` precedes it.
    pub fn replace_top(&mut self, mut value: T) -> Result<T, HeapError> {
        let top = self.data.first_mut().ok_or(HeapError::EmptyHeap)?;
        std::mem::swap(top, &mut value);
        sift::sift_down(&mut self.data, 0, &self.order);
        Ok(value)
    }

    /// Pops every element, returning them in pop order
    pub fn extract_all(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Ok(value) = self.pop() {
            out.push(value);
        }
        out
    }

    /// Pops every element, returning them in the opposite of pop order
    pub fn extract_all_reversed(&mut self) -> Vec<T> {
        let mut out = self.extract_all();
        out.reverse();
        out
    }

    /// Consumes the heap, returning its elements in pop order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.extract_all()
    }

    /// Consumes the heap, returning the backing buffer in heap order
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// The backing buffer in heap order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterates over the elements in arbitrary order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The ordering this heap was built with
    pub fn order(&self) -> &C {
        &self.order
    }

    /// Returns true if the backing buffer satisfies the heap invariant
    pub fn is_valid(&self) -> bool {
        sift::is_heap(&self.data, &self.order)
    }
}

impl<T, C: Compare<T>> Heap<T> for BinaryHeap<T, C> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, value: T) {
        BinaryHeap::push(self, value)
    }

    fn top(&self) -> Result<&T, HeapError> {
        BinaryHeap::top(self)
    }

    fn pop(&mut self) -> Result<T, HeapError> {
        BinaryHeap::pop(self)
    }
}

impl<T, C: Compare<T>> MergeableHeap<T> for BinaryHeap<T, C> {
    fn merge(&mut self, other: Self) {
        // `other` may have been built under a different order value, so its
        // layout is never reused: small merges sift in, large ones rebuild
        if other.data.len() * 2 < self.data.len() {
            for value in other.data {
                self.push(value);
            }
            return;
        }
        self.data.extend(other.data);
        sift::heapify(&mut self.data, &self.order);
    }
}

impl<T, C: Compare<T> + Default> Default for BinaryHeap<T, C> {
    fn default() -> Self {
        Self::with_order(C::default())
    }
}

impl<T, C: Compare<T>> Extend<T> for BinaryHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinaryHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Ord> From<Vec<T>> for BinaryHeap<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T, C> IntoIterator for BinaryHeap<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Iterates over the elements in arbitrary (heap) order
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a BinaryHeap<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
