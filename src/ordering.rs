//! Comparator strategies shared by every heap
//!
//! A heap never calls `Ord` directly. It holds a [`Compare`] value for its
//! whole lifetime and asks it one question: does `a` strictly precede `b`?
//!
//! [`Order`] is the usual strategy object. It bundles a base comparator
//! ([`Natural`], [`LessThan`] or [`ByKey`]) with a [`Sense`]. Reversing an
//! order swaps the operands of every comparison instead of negating the
//! result, so ties stay ties and key projections behave identically in both
//! senses.
//!
//! # Example
//!
//! ```rust
//! use rust_ordered_heaps::ordering::{Compare, Order};
//!
//! let forward = Order::forward();
//! assert!(forward.less(&1, &2));
//!
//! let reverse = forward.reversed();
//! assert!(reverse.less(&2, &1));
//! // ties are preserved in both senses
//! assert!(!forward.less(&3, &3) && !reverse.less(&3, &3));
//!
//! let by_len = Order::by_key(|s: &&str| s.len());
//! assert!(by_len.less(&"ab", &"abc"));
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A strict weak ordering over `T`
///
/// Implementations must be irreflexive and transitive, and must answer
/// consistently for the lifetime of any heap that holds them. A comparator
/// that breaks these rules produces an unspecified (but memory-safe) order.
pub trait Compare<T: ?Sized> {
    /// Returns true if `a` strictly precedes `b`
    fn less(&self, a: &T, b: &T) -> bool;

    /// Three-way comparison derived from [`less`](Compare::less)
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl<T: ?Sized, C: Compare<T> + ?Sized> Compare<T> for &C {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (**self).less(a, b)
    }
}

/// Direction in which an [`Order`] applies its base comparator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sense {
    /// Ascending: the least element comes first
    #[default]
    Forward,
    /// Descending: the greatest element comes first
    Reverse,
}

impl Sense {
    /// Returns the opposite sense
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Sense::Forward => Sense::Reverse,
            Sense::Reverse => Sense::Forward,
        }
    }
}

/// Delegates to the [`Ord`] implementation of the compared type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// A caller-supplied less-than predicate
#[derive(Clone, Copy)]
pub struct LessThan<F>(pub F);

impl<T, F> Compare<T> for LessThan<F>
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for LessThan<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LessThan(..)")
    }
}

/// Compares the keys extracted by a projection function
#[derive(Clone, Copy)]
pub struct ByKey<F>(pub F);

impl<T, K, F> Compare<T> for ByKey<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.0)(a) < (self.0)(b)
    }
}

impl<F> fmt::Debug for ByKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByKey(..)")
    }
}

/// A comparator bundled with the sense in which it is applied
///
/// This is the configuration value every heap is constructed with. The
/// default is the natural ascending order, which makes a min-heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Order<C = Natural> {
    base: C,
    sense: Sense,
}

impl Order<Natural> {
    /// Natural ascending order (min-first heaps)
    pub const fn forward() -> Self {
        Order {
            base: Natural,
            sense: Sense::Forward,
        }
    }

    /// Natural descending order (max-first heaps)
    pub const fn reverse() -> Self {
        Order {
            base: Natural,
            sense: Sense::Reverse,
        }
    }
}

impl<F> Order<LessThan<F>> {
    /// Ascending order under a caller-supplied less-than predicate
    pub fn by(less: F) -> Self {
        Order::new(LessThan(less), Sense::Forward)
    }
}

impl<F> Order<ByKey<F>> {
    /// Ascending order of the keys produced by `key`
    pub fn by_key(key: F) -> Self {
        Order::new(ByKey(key), Sense::Forward)
    }
}

impl<C> Order<C> {
    /// Bundles `base` with an explicit sense
    pub const fn new(base: C, sense: Sense) -> Self {
        Order { base, sense }
    }

    /// Returns the same comparator applied in the opposite sense
    #[must_use]
    pub fn reversed(self) -> Self {
        Order {
            base: self.base,
            sense: self.sense.flip(),
        }
    }

    /// The sense this order applies its base comparator in
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// The underlying comparator
    pub fn base(&self) -> &C {
        &self.base
    }
}

impl<T: ?Sized, C: Compare<T>> Compare<T> for Order<C> {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        match self.sense {
            Sense::Forward => self.base.less(a, b),
            Sense::Reverse => self.base.less(b, a),
        }
    }
}

/// Applies a comparator with its operands swapped
///
/// Used internally where a structure needs the opposite order of a
/// caller-supplied comparator that is not an [`Order`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Compare<T>> Compare<T> for Reversed<C> {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.0.less(b, a)
    }
}
