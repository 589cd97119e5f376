//! Iterative sift primitives for array-backed binary heaps
//!
//! These work on plain slices so that [`BinaryHeap`](crate::binary::BinaryHeap)
//! and the top-k routines can share them. A slice is a heap under `cmp` when no
//! element strictly precedes its parent.

use crate::ordering::Compare;

#[inline]
pub(crate) fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline]
pub(crate) fn left(i: usize) -> usize {
    2 * i + 1
}

/// Moves the element at `index` toward the root until its parent no longer
/// comes after it. Returns the final position.
pub fn sift_up<T, C: Compare<T>>(data: &mut [T], mut index: usize, cmp: &C) -> usize {
    while index > 0 {
        let p = parent(index);
        if cmp.less(&data[index], &data[p]) {
            data.swap(index, p);
            index = p;
        } else {
            break;
        }
    }
    index
}

/// Moves the element at `index` toward the leaves, always swapping with the
/// child that comes first. Returns the final position.
pub fn sift_down<T, C: Compare<T>>(data: &mut [T], mut index: usize, cmp: &C) -> usize {
    let len = data.len();
    loop {
        let l = left(index);
        if l >= len {
            break;
        }
        let r = l + 1;
        let mut best = l;
        if r < len && cmp.less(&data[r], &data[l]) {
            best = r;
        }

        if cmp.less(&data[best], &data[index]) {
            data.swap(index, best);
            index = best;
        } else {
            break;
        }
    }
    index
}

/// Bottom-up heap construction in O(n): sift down every internal node,
/// from the last one back to the root.
pub fn heapify<T, C: Compare<T>>(data: &mut [T], cmp: &C) {
    for i in (0..data.len() / 2).rev() {
        sift_down(data, i, cmp);
    }
}

/// Returns true if `data` satisfies the binary heap invariant under `cmp`
pub fn is_heap<T, C: Compare<T>>(data: &[T], cmp: &C) -> bool {
    (1..data.len()).all(|i| !cmp.less(&data[i], &data[parent(i)]))
}
