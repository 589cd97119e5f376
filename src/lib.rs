//! Comparator-driven heaps for Rust
//!
//! This crate provides a family of array-backed heap containers that share one
//! contract, plus top-k selection built on them. Every container is generic
//! over a [`Compare`](ordering::Compare) strategy fixed at construction, so
//! the same code serves min-heaps, max-heaps and heaps ordered by a key.
//!
//! # Features
//!
//! - **Binary Heap**: O(log n) push and pop, O(n) construction from a vector
//! - **Indexed Binary Heap**: a binary heap that returns a stable handle per
//!   element, for O(log n) update and delete and O(1) lookup
//! - **Min-Max Heap**: O(1) access to both the minimum and the maximum,
//!   O(log n) removal of either
//! - **Top-k selection**: `n_smallest` / `n_largest` in O(len log k) using a
//!   bounded binary heap
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_heaps::indexed_binary::IndexedBinaryHeap;
//! use rust_ordered_heaps::min_max::MinMaxHeap;
//! use rust_ordered_heaps::ordering::Order;
//! use rust_ordered_heaps::top_k::n_largest;
//!
//! let mut tasks = IndexedBinaryHeap::with_order(Order::reverse());
//! let low = tasks.push(1);
//! tasks.push(5);
//! tasks.update(&low, 9).unwrap();
//! assert_eq!(tasks.top(), Ok(&9));
//!
//! let mut window = MinMaxHeap::from_vec(vec![3, 8, 1, 6]);
//! assert_eq!((window.minimum(), window.maximum()), (Ok(&1), Ok(&8)));
//! assert_eq!(window.pop_max(), Ok(8));
//!
//! assert_eq!(n_largest(2, [4, 1, 7, 3], Order::forward()), vec![7, 4]);
//! ```

pub mod binary;
pub mod indexed_binary;
pub mod min_max;
pub mod ordering;
pub mod sift;
pub mod storage;
pub mod top_k;
pub mod traits;

// Re-export the main traits for convenience
pub use ordering::{Compare, Order};
pub use traits::{HandleHeap, Heap, HeapError, MergeableHeap};
