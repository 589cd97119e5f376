//! Top-k selection on top of a bounded binary heap
//!
//! [`n_smallest`] and [`n_largest`] keep the best `n` items seen so far in a
//! [`BoundedHeap`]: a [`BinaryHeap`] ordered the *opposite* way, so that its
//! top is the worst item currently kept. Each further item is compared with
//! that top once, and replaces it only when strictly better.
//!
//! # Time Complexity
//!
//! O(n) to build the initial heap plus O((len - n) log n) for the rest of the
//! input, instead of O(len log len) for a full sort. When the input holds no
//! more than `n` items it is simply sorted.
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_heaps::ordering::Order;
//! use rust_ordered_heaps::top_k::{n_largest, n_smallest, n_smallest_by_key};
//!
//! assert_eq!(n_largest(3, [1, 5, 2, 9, 3], Order::forward()), vec![9, 5, 3]);
//! assert_eq!(n_smallest(0, [1, 5, 2, 9, 3], Order::forward()), Vec::<i32>::new());
//!
//! let words = ["pear", "fig", "banana", "kiwi"];
//! assert_eq!(n_smallest_by_key(2, words, |w: &&str| w.len()), vec!["fig", "pear"]);
//! ```

use crate::binary::BinaryHeap;
use crate::ordering::{ByKey, Compare, Reversed};

/// A heap that keeps at most `capacity` items, discarding the worst
///
/// "Worst" is relative to the order the heap was created with: under
/// `Order::forward()` a `BoundedHeap` keeps the smallest items.
#[derive(Debug, Clone)]
pub struct BoundedHeap<T, C> {
    heap: BinaryHeap<T, Reversed<C>>,
    capacity: usize,
}

impl<T, C: Compare<T>> BoundedHeap<T, C> {
    /// Creates an empty bounded heap keeping the `capacity` best items under `order`
    ///
    /// `capacity` is a retention limit only; storage grows as items are kept.
    pub fn new(capacity: usize, order: C) -> Self {
        Self {
            heap: BinaryHeap::with_order(Reversed(order)),
            capacity,
        }
    }

    /// Builds a full bounded heap from `values` in O(n); the capacity is
    /// `values.len()`
    pub fn from_vec(values: Vec<T>, order: C) -> Self {
        let capacity = values.len();
        Self {
            heap: BinaryHeap::from_vec_with_order(values, Reversed(order)),
            capacity,
        }
    }

    /// Offers `value` to the heap
    ///
    /// Returns whatever did not make the cut: `None` if there was room,
    /// the evicted worst item if `value` was strictly better than it, or
    /// `value` itself otherwise.
    pub fn offer(&mut self, value: T) -> Option<T> {
        if self.heap.len() < self.capacity {
            self.heap.push(value);
            return None;
        }
        match self.heap.peek() {
            Some(worst) if self.heap.order().0.less(&value, worst) => {
                self.heap.replace_top(value).ok()
            }
            _ => Some(value),
        }
    }

    /// The worst item currently kept
    pub fn worst(&self) -> Option<&T> {
        self.heap.peek()
    }

    /// Number of items currently kept
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is kept
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true once `capacity` items are kept
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Maximum number of items kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over the kept items in arbitrary order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Consumes the heap, returning the kept items best-first
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        // Pops come out worst-first
        self.heap.extract_all_reversed()
    }
}

impl<T, C: Compare<T>> Extend<T> for BoundedHeap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.offer(value);
        }
    }
}

/// Returns the `n` items that come first under `order`, sorted under `order`
///
/// Returns an empty vector when `n == 0`, and the whole input sorted when it
/// holds no more than `n` items.
pub fn n_smallest<T, C, I>(n: usize, iter: I, order: C) -> Vec<T>
where
    C: Compare<T>,
    I: IntoIterator<Item = T>,
{
    if n == 0 {
        return Vec::new();
    }

    let mut iter = iter.into_iter();
    let mut seed: Vec<T> = iter.by_ref().take(n).collect();
    let mut rest = iter.peekable();
    if rest.peek().is_none() {
        seed.sort_by(|a, b| order.compare(a, b));
        return seed;
    }

    let mut kept = BoundedHeap::from_vec(seed, order);
    for value in rest {
        kept.offer(value);
    }
    kept.into_sorted_vec()
}

/// Returns the `n` items that come last under `order`, last-first
///
/// Same edge cases as [`n_smallest`].
pub fn n_largest<T, C, I>(n: usize, iter: I, order: C) -> Vec<T>
where
    C: Compare<T>,
    I: IntoIterator<Item = T>,
{
    n_smallest(n, iter, Reversed(order))
}

/// [`n_smallest`] ordered by the key `key` extracts
pub fn n_smallest_by_key<T, K, F, I>(n: usize, iter: I, key: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
    I: IntoIterator<Item = T>,
{
    n_smallest(n, iter, ByKey(key))
}

/// [`n_largest`] ordered by the key `key` extracts
pub fn n_largest_by_key<T, K, F, I>(n: usize, iter: I, key: F) -> Vec<T>
where
    F: Fn(&T) -> K,
    K: Ord,
    I: IntoIterator<Item = T>,
{
    n_largest(n, iter, ByKey(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::Order;

    const INPUT: [i32; 5] = [1, 5, 2, 9, 3];

    #[test]
    fn test_n_largest_example() {
        assert_eq!(n_largest(3, INPUT, Order::forward()), vec![9, 5, 3]);
    }

    #[test]
    fn test_zero_is_empty() {
        assert!(n_smallest(0, INPUT, Order::forward()).is_empty());
        assert!(n_largest(0, INPUT, Order::forward()).is_empty());
    }

    #[test]
    fn test_n_at_least_len_sorts_everything() {
        assert_eq!(n_smallest(5, INPUT, Order::forward()), vec![1, 2, 3, 5, 9]);
        assert_eq!(n_smallest(50, INPUT, Order::forward()), vec![1, 2, 3, 5, 9]);
        assert_eq!(n_largest(7, INPUT, Order::forward()), vec![9, 5, 3, 2, 1]);
        assert!(n_largest(3, Vec::<i32>::new(), Order::forward()).is_empty());
    }

    #[test]
    fn test_reverse_order_flips_meaning() {
        // "smallest" under a reversed order are the largest values
        assert_eq!(n_smallest(2, INPUT, Order::reverse()), vec![9, 5]);
        assert_eq!(n_largest(2, INPUT, Order::reverse()), vec![1, 2]);
    }

    #[test]
    fn test_by_key() {
        let people = [("ann", 31), ("bob", 25), ("cy", 47), ("di", 19)];
        let youngest = n_smallest_by_key(2, people, |p: &(&str, u32)| p.1);
        assert_eq!(youngest, vec![("di", 19), ("bob", 25)]);
        let oldest = n_largest_by_key(1, people, |p: &(&str, u32)| p.1);
        assert_eq!(oldest, vec![("cy", 47)]);
    }

    #[test]
    fn test_duplicates() {
        let input = [4, 4, 1, 4, 1, 7];
        assert_eq!(n_smallest(3, input, Order::forward()), vec![1, 1, 4]);
        assert_eq!(n_largest(3, input, Order::forward()), vec![7, 4, 4]);
    }

    #[test]
    fn test_bounded_heap_offer() {
        let mut kept = BoundedHeap::new(2, Order::forward());
        assert_eq!(kept.offer(5), None);
        assert_eq!(kept.offer(3), None);
        assert!(kept.is_full());
        assert_eq!(kept.worst(), Some(&5));

        // not strictly better than the worst: rejected
        assert_eq!(kept.offer(5), Some(5));
        assert_eq!(kept.offer(8), Some(8));
        // better: evicts the worst
        assert_eq!(kept.offer(1), Some(5));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.into_sorted_vec(), vec![1, 3]);
    }

    #[test]
    fn test_bounded_heap_zero_capacity() {
        let mut kept = BoundedHeap::new(0, Order::forward());
        assert_eq!(kept.offer(1), Some(1));
        assert!(kept.is_empty());
        assert_eq!(kept.capacity(), 0);
    }

    #[test]
    fn test_bounded_heap_huge_capacity_allocates_lazily() {
        let mut kept = BoundedHeap::new(usize::MAX, Order::forward());
        assert_eq!(kept.offer(3), None);
        assert_eq!(kept.offer(1), None);
        assert_eq!(kept.offer(2), None);
        assert!(!kept.is_full());
        assert_eq!(kept.worst(), Some(&3));
        assert_eq!(kept.into_sorted_vec(), vec![1, 2, 3]);

        let mut kept = BoundedHeap::new(1 << 40, Order::reverse());
        kept.extend([4, 9, 1]);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_bounded_heap_extend() {
        let mut kept = BoundedHeap::new(3, Order::reverse());
        kept.extend([4, 8, 1, 9, 6, 2]);
        assert_eq!(kept.iter().count(), 3);
        assert_eq!(kept.into_sorted_vec(), vec![9, 8, 6]);
    }
}
