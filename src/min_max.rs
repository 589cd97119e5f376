//! Min-Max Heap implementation
//!
//! A single array-backed heap with O(1) access to both extremes. Tree levels
//! alternate between "min levels" (the root's level, and every second level
//! below it) and "max levels":
//!
//! - a node on a min level precedes-or-ties every one of its descendants,
//! - a node on a max level is preceded-or-tied by none of its descendants.
//!
//! The root is therefore the minimum, and the maximum is whichever of the
//! root's children comes last (or the root itself when the heap holds fewer
//! than two elements).
//!
//! # Time Complexity
//!
//! | Operation     | Complexity         |
//! |---------------|--------------------|
//! | `push`        | O(log n) amortized |
//! | `pop_min`     | O(log n)           |
//! | `pop_max`     | O(log n)           |
//! | `minimum`     | O(1)               |
//! | `maximum`     | O(1)               |
//! | `from_vec`    | O(n)               |
//!
//! # References
//!
//! - Atkinson, M. D., Sack, J.-R., Santoro, N., & Strothotte, T. (1986).
//!   "Min-max heaps and generalized priority queues."
//!   *Communications of the ACM*, 29(10), 996-1000.
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_heaps::min_max::MinMaxHeap;
//!
//! let mut heap = MinMaxHeap::from_vec(vec![10, 4, 6, 1, 16, 2, 20, 17, 13, 5]);
//! assert_eq!(heap.minimum(), Ok(&1));
//! assert_eq!(heap.maximum(), Ok(&20));
//!
//! assert_eq!(heap.pop_min(), Ok(1));
//! assert_eq!(heap.pop_max(), Ok(20));
//! assert_eq!(heap.len(), 8);
//! assert!(heap.is_valid());
//! ```

use crate::ordering::{Compare, Order};
use crate::sift::{left, parent};
use crate::traits::{Heap, HeapError, MergeableHeap};

/// Returns true if `index` sits on a min level (levels 0, 2, 4, ...)
#[inline]
fn is_min_level(index: usize) -> bool {
    // level = floor(log2(index + 1))
    (usize::BITS - 1 - (index + 1).leading_zeros()) % 2 == 0
}

/// Returns true if `data[a]` is strictly more extreme than `data[b]`:
/// smaller on a min level, larger on a max level
#[inline]
fn beats<T, C: Compare<T>>(data: &[T], a: usize, b: usize, min: bool, cmp: &C) -> bool {
    if min {
        cmp.less(&data[a], &data[b])
    } else {
        cmp.less(&data[b], &data[a])
    }
}

/// Moves a freshly appended element toward the root
fn bubble_up<T, C: Compare<T>>(data: &mut [T], mut index: usize, cmp: &C) {
    if index == 0 {
        return;
    }

    // Against the parent first, on the parent's terms. Whichever side of the
    // parent the element falls on decides which chain of grandparents it
    // climbs.
    let mut min = is_min_level(index);
    let p = parent(index);
    if beats(data, index, p, !min, cmp) {
        data.swap(index, p);
        index = p;
        min = !min;
    }

    while index > 2 {
        let g = parent(parent(index));
        if beats(data, index, g, min, cmp) {
            data.swap(index, g);
            index = g;
        } else {
            break;
        }
    }
}

/// Moves the element at `index` toward the leaves, looking two levels down
fn trickle_down<T, C: Compare<T>>(data: &mut [T], mut index: usize, cmp: &C) {
    let len = data.len();
    let min = is_min_level(index);

    loop {
        let first_child = left(index);
        if first_child >= len {
            break;
        }
        let first_grandchild = left(first_child);

        // Most extreme among the (up to) two children and four grandchildren
        let mut m = first_child;
        let candidates = [
            first_child + 1,
            first_grandchild,
            first_grandchild + 1,
            first_grandchild + 2,
            first_grandchild + 3,
        ];
        for c in candidates.into_iter().take_while(|&c| c < len) {
            if beats(data, c, m, min, cmp) {
                m = c;
            }
        }

        if !beats(data, m, index, min, cmp) {
            break;
        }
        data.swap(index, m);

        if m < first_grandchild {
            // A child has no grandchildren of its own past this point
            break;
        }

        // The element now sits on a grandchild of `index`, which shares its
        // level type; its new parent is of the opposite type.
        let p = parent(m);
        if beats(data, p, m, min, cmp) {
            data.swap(m, p);
        }
        index = m;
    }
}

/// Rebuilds `data` as a min-max heap in O(n)
fn build<T, C: Compare<T>>(data: &mut [T], cmp: &C) {
    for i in (0..data.len() / 2).rev() {
        trickle_down(data, i, cmp);
    }
}

/// Returns true if `data` satisfies the min-max heap invariant under `cmp`
///
/// Every node is checked against its parent (with the parent's level type)
/// and its grandparent (with its own level type). By transitivity this covers
/// every ancestor-descendant pair. Empty and single-element slices are valid.
pub fn is_min_max_heap<T, C: Compare<T>>(data: &[T], cmp: &C) -> bool {
    (1..data.len()).all(|i| {
        let p = parent(i);
        if beats(data, i, p, is_min_level(p), cmp) {
            return false;
        }
        if i > 2 {
            let g = parent(p);
            if beats(data, i, g, is_min_level(g), cmp) {
                return false;
            }
        }
        true
    })
}

/// A double-ended priority queue backed by a single array
#[derive(Debug, Clone)]
pub struct MinMaxHeap<T, C = Order> {
    data: Vec<T>,
    order: C,
}

impl<T: Ord> MinMaxHeap<T> {
    /// Creates an empty heap under natural order
    pub fn new() -> Self {
        Self::with_order(Order::forward())
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, Order::forward())
    }

    /// Builds a heap from `data` in O(n)
    pub fn from_vec(data: Vec<T>) -> Self {
        Self::from_vec_with_order(data, Order::forward())
    }
}

impl<T, C: Compare<T>> MinMaxHeap<T, C> {
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

    /// Builds a heap from `data` in O(n)
    pub fn from_vec_with_order(mut data: Vec<T>, order: C) -> Self {
        build(&mut data, &order);
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

    /// Returns the least element
    pub fn minimum(&self) -> Result<&T, HeapError> {
        self.peek_min().ok_or(HeapError::EmptyHeap)
    }

    /// Returns the greatest element
    pub fn maximum(&self) -> Result<&T, HeapError> {
        self.peek_max().ok_or(HeapError::EmptyHeap)
    }

    /// Returns the least element, or `None` when empty
    pub fn peek_min(&self) -> Option<&T> {
        self.data.first()
    }

    /// Returns the greatest element, or `None` when empty
    pub fn peek_max(&self) -> Option<&T> {
        self.max_index().map(|i| &self.data[i])
    }

    /// Same as [`minimum`](Self::minimum)
    pub fn top(&self) -> Result<&T, HeapError> {
        self.minimum()
    }

    /// Inserts an element
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        let last = self.data.len() - 1;
        bubble_up(&mut self.data, last, &self.order);
    }

    /// Same as [`pop_min`](Self::pop_min)
    pub fn pop(&mut self) -> Result<T, HeapError> {
        self.pop_min()
    }

    /// Removes and returns the least element
    pub fn pop_min(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        Ok(self.remove_at(0))
    }

    /// Removes and returns the greatest element
    ///
    /// On a single-element heap this is the same as [`pop_min`](Self::pop_min).
    pub fn pop_max(&mut self) -> Result<T, HeapError> {
        let index = self.max_index().ok_or(HeapError::EmptyHeap)?;
        Ok(self.remove_at(index))
    }

    /// Pushes `value` and pops the least element in a single sift
    pub fn push_pop_min(&mut self, mut value: T) -> T {
        match self.data.first_mut() {
            Some(min) if self.order.less(min, &value) => {
                std::mem::swap(min, &mut value);
                trickle_down(&mut self.data, 0, &self.order);
                value
            }
            _ => value,
        }
    }

    /// Pushes `value` and pops the greatest element in a single sift
    pub fn push_pop_max(&mut self, mut value: T) -> T {
        let index = match self.max_index() {
            Some(index) if self.order.less(&value, &self.data[index]) => index,
            _ => return value,
        };
        std::mem::swap(&mut self.data[index], &mut value);
        // The replacement may undercut the root; if so they trade places and
        // the old minimum trickles down the max level instead.
        if index > 0 && self.order.less(&self.data[index], &self.data[0]) {
            self.data.swap(index, 0);
        }
        trickle_down(&mut self.data, index, &self.order);
        value
    }

    /// Pops up to `k` least elements, in ascending order
    pub fn k_smallest(&mut self, k: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(k.min(self.data.len()));
        while out.len() < k {
            match self.pop_min() {
                Ok(value) => out.push(value),
                Err(_) => break,
            }
        }
        out
    }

    /// Pops up to `k` greatest elements, in descending order
    pub fn k_largest(&mut self, k: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(k.min(self.data.len()));
        while out.len() < k {
            match self.pop_max() {
                Ok(value) => out.push(value),
                Err(_) => break,
            }
        }
        out
    }

    /// Empties the heap, returning every element in ascending order
    pub fn drain_sorted(&mut self) -> Vec<T> {
        self.k_smallest(self.data.len())
    }

    /// Empties the heap, returning every element in descending order
    pub fn drain_sorted_desc(&mut self) -> Vec<T> {
        self.k_largest(self.data.len())
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

    /// Returns true if the backing buffer satisfies the min-max invariant
    pub fn is_valid(&self) -> bool {
        is_min_max_heap(&self.data, &self.order)
    }

    fn max_index(&self) -> Option<usize> {
        match self.data.len() {
            0 => None,
            1 => Some(0),
            2 => Some(1),
            _ if self.order.less(&self.data[1], &self.data[2]) => Some(2),
            _ => Some(1),
        }
    }

    /// Detaches the element at `index`, fills the hole with the last element
    /// and trickles it down
    fn remove_at(&mut self, index: usize) -> T {
        let value = self.data.swap_remove(index);
        if index < self.data.len() {
            trickle_down(&mut self.data, index, &self.order);
        }
        value
    }
}

impl<T, C: Compare<T>> Heap<T> for MinMaxHeap<T, C> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, value: T) {
        MinMaxHeap::push(self, value)
    }

    fn top(&self) -> Result<&T, HeapError> {
        self.minimum()
    }

    fn pop(&mut self) -> Result<T, HeapError> {
        self.pop_min()
    }
}

impl<T, C: Compare<T>> MergeableHeap<T> for MinMaxHeap<T, C> {
    fn merge(&mut self, other: Self) {
        self.data.extend(other.data);
        build(&mut self.data, &self.order);
    }
}

impl<T, C: Compare<T> + Default> Default for MinMaxHeap<T, C> {
    fn default() -> Self {
        Self::with_order(C::default())
    }
}

impl<T, C: Compare<T>> Extend<T> for MinMaxHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for MinMaxHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Ord> From<Vec<T>> for MinMaxHeap<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T, C> IntoIterator for MinMaxHeap<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
