//! Common traits for heap data structures
//!
//! This module provides a small capability hierarchy shared by every heap in
//! the crate:
//!
//! - [`Heap`]: Base trait for the operations every heap supports (`push`, `pop`, `top`)
//! - [`MergeableHeap`]: Heaps that can absorb another heap of the same type
//! - [`HandleHeap`]: Heaps that hand back a stable [`Handle`] per element and
//!   allow lookup, update and deletion through it
//!
//! Unlike `std::collections::BinaryHeap`, ordering is not fixed to `Ord`: every
//! heap is generic over a [`Compare`](crate::ordering::Compare) strategy held
//! for the lifetime of the heap.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapError {
    /// The heap holds no elements
    EmptyHeap,
    /// The handle does not refer to a live element of this heap
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::InvalidHandle => {
                write!(f, "handle does not refer to a live element of this heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in a heap, used for lookup, update and delete
///
/// This is an opaque type that identifies a specific logical element,
/// independently of where the element currently sits in the backing array.
pub trait Handle: Clone + PartialEq + Eq + fmt::Debug {}

/// Base trait for heap/priority queue data structures
///
/// The "top" of a heap is the element that precedes every other element under
/// the heap's ordering: the minimum for a forward ordering, the maximum for a
/// reversed one.
///
/// # Example
///
/// ```rust
/// use rust_ordered_heaps::Heap;
/// use rust_ordered_heaps::binary::BinaryHeap;
///
/// let mut heap = BinaryHeap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.top(), Ok(&1));
/// assert_eq!(heap.pop(), Ok(1));
/// ```
pub trait Heap<T> {
    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(log n) amortized (the backing buffer grows by reallocation).
    fn push(&mut self, value: T);

    /// Returns the top element without removing it
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap holds no elements.
    fn top(&self) -> Result<&T, HeapError>;

    /// Removes and returns the top element
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap holds no elements.
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Result<T, HeapError>;

    /// Returns the top element, or `None` when empty
    fn peek(&self) -> Option<&T> {
        self.top().ok()
    }

    /// Pops every element, returning them in pop order
    fn extract_all(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Ok(value) = self.pop() {
            out.push(value);
        }
        out
    }
}

/// Heaps that can absorb another heap of the same type
pub trait MergeableHeap<T>: Heap<T> {
    /// Moves every element of `other` into `self`
    ///
    /// The ordering of `self` is kept; `other`'s ordering is discarded.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with handle-based operations
///
/// This trait extends [`Heap`] with operations that require tracking element
/// handles. Handles stay valid across any number of unrelated operations and
/// become invalid once their own element is popped or deleted.
///
/// # Example
///
/// ```rust
/// use rust_ordered_heaps::{Heap, HandleHeap};
/// use rust_ordered_heaps::indexed_binary::IndexedBinaryHeap;
///
/// let mut heap: IndexedBinaryHeap<i32> = IndexedBinaryHeap::new();
/// let handle = heap.push_with_handle(10);
/// heap.update(&handle, 1).unwrap();
/// assert_eq!(heap.top(), Ok(&1));
/// ```
pub trait HandleHeap<T>: Heap<T> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element, returning a handle to it
    fn push_with_handle(&mut self, value: T) -> Self::Handle;

    /// Replaces the value behind `handle` and restores the heap invariant
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is dead or foreign.
    fn update(&mut self, handle: &Self::Handle, value: T) -> Result<(), HeapError>;

    /// Removes the element behind `handle` and returns it
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is dead or foreign.
    fn delete(&mut self, handle: &Self::Handle) -> Result<T, HeapError>;

    /// Returns the value behind `handle`
    ///
    /// # Errors
    /// Returns `HeapError::InvalidHandle` if the handle is dead or foreign.
    fn value_of(&self, handle: &Self::Handle) -> Result<&T, HeapError>;

    /// Returns true if `handle` refers to a live element of this heap
    fn contains(&self, handle: &Self::Handle) -> bool;

    /// Returns the top element together with its handle
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap holds no elements.
    fn top_with_handle(&self) -> Result<(&T, Self::Handle), HeapError>;
}
