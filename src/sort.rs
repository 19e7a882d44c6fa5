//! In-place sorting driven only by strategy functions.
//!
//! Neither algorithm touches capacity or length. [`selection_sort`] uses compare and swap;
//! [`quick_sort`] uses compare and move. The order produced is non-decreasing under the
//! comparator: no element is ordered before the one preceding it.
use bytemuck::{Pod, Zeroable};

use crate::strategy::{CompareFn, MoveFn, SwapFn};

/// Default depth of the explicit quicksort range stack.
///
/// Smaller ranges are always processed first, so the stack never holds more than about
/// `log2(len) + 1` ranges. 300 covers any length a `u32`-sized array can reach.
pub const DEFAULT_QUICK_SORT_LEVELS: usize = 300;

/// Overwrites `v[dst]` with `v[src]` through `move_fn`. `dst` and `src` must differ.
#[inline]
pub(crate) fn move_within<T>(v: &mut [T], dst: usize, src: usize, move_fn: MoveFn<T>) {
    debug_assert_ne!(dst, src);
    if dst < src {
        let (lo, hi) = v.split_at_mut(src);
        move_fn(&mut lo[dst], &hi[0]);
    } else {
        let (lo, hi) = v.split_at_mut(dst);
        move_fn(&mut hi[0], &lo[src]);
    }
}

/// Exchanges `v[a]` and `v[b]` through `swap`. Does nothing if `a == b`.
#[inline]
pub(crate) fn swap_within<T>(v: &mut [T], a: usize, b: usize, swap: SwapFn<T>) {
    if a == b {
        return;
    }
    let (a, b) = if a < b { (a, b) } else { (b, a) };
    let (lo, hi) = v.split_at_mut(b);
    swap(&mut lo[a], &mut hi[0]);
}

/// Selection sort: for each position, swap in a minimum of the remaining suffix.
///
/// `O(n²)` comparisons, at most `n` swaps, not stable.
///
/// # Examples
///
/// ```
/// use chunkvec::sort::selection_sort;
/// use chunkvec::strategy::{default_swap, ordered_compare};
///
/// let mut v = [3.5, -1.0, 2.0];
/// selection_sort(&mut v, ordered_compare, default_swap);
/// assert_eq!(v, [-1.0, 2.0, 3.5]);
/// ```
pub fn selection_sort<T>(v: &mut [T], compare: CompareFn<T>, swap: SwapFn<T>) {
    let len = v.len();
    for i in 0..len {
        let mut swap_index = len - 1;
        for j in i..len {
            if compare(&v[j], &v[swap_index]) {
                swap_index = j;
            }
        }
        swap_within(v, i, swap_index, swap);
    }
}

/// Non-recursive quicksort with an explicit range stack of `LEVELS` entries.
///
/// The first element of each range is the pivot. It is lifted into a temporary with `move_fn`,
/// the range is partitioned by moving elements across the gap from both ends, and the pivot is
/// moved into the slot where the scans meet. Of the two sub-ranges, the larger one is pushed
/// below the smaller one so it is processed later; this keeps the stack depth logarithmic in
/// `v.len()` for any input. The pivot choice is fixed, so already sorted input still costs
/// `O(n²)` comparisons.
///
/// # Panics
///
/// Panics if the range stack needs more than `LEVELS` entries. With the default of
/// [`DEFAULT_QUICK_SORT_LEVELS`] that cannot happen for slices an array can hold.
///
/// # Examples
///
/// ```
/// use chunkvec::sort::quick_sort;
/// use chunkvec::strategy::default_move;
///
/// let mut v = [1.1f32, 5.5, 3.3, 4.4, 2.2];
/// quick_sort::<_, 300>(&mut v, |a: &f32, b: &f32| a > b, default_move);
/// assert_eq!(v, [5.5, 4.4, 3.3, 2.2, 1.1]);
/// ```
pub fn quick_sort<T: Pod, const LEVELS: usize>(
    v: &mut [T],
    compare: CompareFn<T>,
    move_fn: MoveFn<T>,
) {
    let mut beg = [0usize; LEVELS];
    let mut end = [0usize; LEVELS];
    let mut depth = 1;
    end[0] = v.len();

    while depth > 0 {
        let i = depth - 1;
        let mut left = beg[i];
        if end[i] - left < 2 {
            depth -= 1;
            continue;
        }
        let mut right = end[i] - 1;

        let mut pivot = <T as Zeroable>::zeroed();
        move_fn(&mut pivot, &v[left]);
        while left < right {
            while left < right && !compare(&v[right], &pivot) {
                right -= 1;
            }
            if left < right {
                move_within(v, left, right, move_fn);
                left += 1;
            }
            while left < right && compare(&v[left], &pivot) {
                left += 1;
            }
            if left < right {
                move_within(v, right, left, move_fn);
                right -= 1;
            }
        }
        move_fn(&mut v[left], &pivot);

        assert!(
            depth < LEVELS,
            "quick_sort range stack exhausted ({} levels)",
            LEVELS
        );
        beg[i + 1] = left + 1;
        end[i + 1] = end[i];
        end[i] = left;
        depth += 1;

        if end[i + 1] - beg[i + 1] > end[i] - beg[i] {
            beg.swap(i, i + 1);
            end.swap(i, i + 1);
        }
    }
}
