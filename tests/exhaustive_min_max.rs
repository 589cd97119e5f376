//! Exhaustive checks of the min-max heap on small inputs
//!
//! The grandchild-then-parent step of the min-max trickle-down is easy to get
//! subtly wrong, so every permutation of up to 8 distinct values, and every
//! sequence over a 3-letter alphabet up to length 7, is pushed through
//! construction, insertion and both kinds of removal, with the structural
//! predicate checked after each step.

use rust_ordered_heaps::min_max::{is_min_max_heap, MinMaxHeap};
use rust_ordered_heaps::ordering::Order;

/// All permutations of `0..n`, via Heap's algorithm
fn permutations(n: usize) -> Vec<Vec<u8>> {
    let mut items: Vec<u8> = (0..n as u8).collect();
    let mut out = vec![items.clone()];
    let mut c = vec![0usize; n];
    let mut i = 0;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(c[i], i);
            }
            out.push(items.clone());
            c[i] += 1;
            i = 0;
        } else {
            c[i] = 0;
            i += 1;
        }
    }
    out
}

/// Every sequence of length `len` over `0..alphabet`
fn sequences(len: usize, alphabet: u8) -> Vec<Vec<u8>> {
    let mut out = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                (0..alphabet).map(move |x| {
                    let mut next = prefix.clone();
                    next.push(x);
                    next
                })
            })
            .collect();
    }
    out
}

fn check_input(input: &[u8]) {
    let mut expected = input.to_vec();
    expected.sort();

    // Bottom-up construction
    let heap = MinMaxHeap::from_vec(input.to_vec());
    assert!(heap.is_valid(), "heapify failed for {input:?}: {:?}", heap.as_slice());

    // Insertion one at a time
    let mut pushed = MinMaxHeap::new();
    for &x in input {
        pushed.push(x);
        assert!(pushed.is_valid(), "push failed for {input:?}: {:?}", pushed.as_slice());
    }

    // Draining from either end
    let mut lo = heap.clone();
    for &x in &expected {
        assert_eq!(lo.pop_min(), Ok(x));
        assert!(lo.is_valid(), "pop_min failed for {input:?}: {:?}", lo.as_slice());
    }
    let mut hi = pushed;
    for &x in expected.iter().rev() {
        assert_eq!(hi.pop_max(), Ok(x));
        assert!(hi.is_valid(), "pop_max failed for {input:?}: {:?}", hi.as_slice());
    }

    // Under a reversed order the "minimum" end holds the greatest value
    let rev = MinMaxHeap::from_vec_with_order(input.to_vec(), Order::reverse());
    assert!(is_min_max_heap(rev.as_slice(), &Order::reverse()));
    assert_eq!(rev.minimum().ok(), expected.last());
    assert_eq!(rev.maximum().ok(), expected.first());

    let mut rev_pushed = MinMaxHeap::with_order(Order::reverse());
    for &x in input {
        rev_pushed.push(x);
        assert!(rev_pushed.is_valid(), "reverse push failed for {input:?}");
    }
    let mut rev_lo = rev;
    for &x in expected.iter().rev() {
        assert_eq!(rev_lo.pop_min(), Ok(x));
        assert!(rev_lo.is_valid(), "reverse pop_min failed for {input:?}");
    }
    for &x in &expected {
        assert_eq!(rev_pushed.pop_max(), Ok(x));
        assert!(rev_pushed.is_valid(), "reverse pop_max failed for {input:?}");
    }
}

/// Pairs each value with its input position and orders by the value alone,
/// so ties carry distinguishable payloads
fn check_keyed_input(input: &[u8]) {
    let order = Order::by_key(|p: &(u8, usize)| p.0);
    let mut heap = MinMaxHeap::with_order(order);
    for (i, &x) in input.iter().enumerate() {
        heap.push((x, i));
        assert!(heap.is_valid(), "keyed push failed for {input:?}");
    }

    let mut expected = input.to_vec();
    expected.sort();
    let (mut lo, mut hi) = (0, expected.len());
    let mut take_max = false;
    while lo < hi {
        let popped = if take_max {
            hi -= 1;
            heap.pop_max().map(|p| (p.0, expected[hi]))
        } else {
            lo += 1;
            heap.pop_min().map(|p| (p.0, expected[lo - 1]))
        };
        let (got, want) = popped.unwrap();
        assert_eq!(got, want, "keyed pops disagree for {input:?}");
        assert!(heap.is_valid(), "keyed pop failed for {input:?}");
        take_max = !take_max;
    }
    assert!(heap.is_empty());
}

#[test]
fn all_permutations_up_to_eight() {
    for n in 0..=8 {
        let perms = permutations(n);
        assert_eq!(perms.len(), (1..=n).product::<usize>());
        for perm in perms {
            check_input(&perm);
        }
    }
}

#[test]
fn all_small_sequences_with_duplicates() {
    for len in 0..=7 {
        for seq in sequences(len, 3) {
            check_input(&seq);
            check_keyed_input(&seq);
        }
    }
}

#[test]
fn alternating_pops_on_every_permutation_of_seven() {
    for perm in permutations(7) {
        let mut heap = MinMaxHeap::from_vec(perm.clone());
        let (mut lo, mut hi) = (0u8, 6u8);
        for step in 0..7 {
            if step % 2 == 0 {
                assert_eq!(heap.pop_min(), Ok(lo));
                lo += 1;
            } else {
                assert_eq!(heap.pop_max(), Ok(hi));
                hi = hi.saturating_sub(1);
            }
            assert!(heap.is_valid(), "{perm:?} -> {:?}", heap.as_slice());
        }
        assert!(heap.is_empty());
    }
}
