//! Element-level strategies: how elements are ordered, exchanged and shifted.
//!
//! Array mechanics never look at element values themselves. Ordering goes through a
//! [`CompareFn`], exchanges through a [`SwapFn`] and every one-way shift (front push/pop,
//! insert, erase, quicksort partitioning) through a [`MoveFn`]. The three slots live in a
//! [`Strategies`] value owned by each array.
//!
//! Strategies are per array. To make a group of arrays behave the same, hand them the same
//! `Strategies`: it is `Copy`.
use core::fmt;

use bytemuck::Pod;

/// Returns `true` if `a` is ordered before `b`.
pub type CompareFn<T> = fn(&T, &T) -> bool;

/// Exchanges two elements.
pub type SwapFn<T> = fn(&mut T, &mut T);

/// Overwrites `destination` with the value of `source`. `source` is left as it was.
pub type MoveFn<T> = fn(&mut T, &T);

/// Orders elements by reading their bytes as a native-endian signed integer of the same width.
///
/// Only defined for elements of 1, 2 or 4 bytes. Other types need a comparator of their own,
/// for instance [`ordered_compare`]. The validation layer rejects other sizes; without it they
/// never compare as ordered.
///
/// For non-negative `f32` the bit pattern orders like the value, so the default works there too.
///
/// # Examples
///
/// ```
/// use chunkvec::strategy::default_compare;
///
/// assert!(default_compare(&-3i32, &7i32));
/// assert!(default_compare(&1.5f32, &2.25f32));
/// assert!(!default_compare(&9u8, &9u8));
/// ```
pub fn default_compare<T: Pod>(a: &T, b: &T) -> bool {
    let a = bytemuck::bytes_of(a);
    let b = bytemuck::bytes_of(b);
    match (a, b) {
        (&[a], &[b]) => i8::from_ne_bytes([a]) < i8::from_ne_bytes([b]),
        (&[a0, a1], &[b0, b1]) => i16::from_ne_bytes([a0, a1]) < i16::from_ne_bytes([b0, b1]),
        (&[a0, a1, a2, a3], &[b0, b1, b2, b3]) => {
            i32::from_ne_bytes([a0, a1, a2, a3]) < i32::from_ne_bytes([b0, b1, b2, b3])
        }
        _ => {
            check!(
                false,
                "the default comparator is only defined for 1, 2 or 4 byte elements (got {})",
                a.len()
            );
            false
        }
    }
}

/// Orders elements with their `PartialOrd` implementation.
pub fn ordered_compare<T: PartialOrd>(a: &T, b: &T) -> bool {
    a < b
}

/// Exchanges two elements through a temporary.
pub fn default_swap<T: Copy>(a: &mut T, b: &mut T) {
    let temp = *a;
    *a = *b;
    *b = temp;
}

/// Plain assignment.
pub fn default_move<T: Copy>(destination: &mut T, source: &T) {
    *destination = *source;
}

/// The compare, swap and move slots of one array.
///
/// A slot may be empty. Operations that need an empty slot are precondition violations.
pub struct Strategies<T> {
    compare: Option<CompareFn<T>>,
    swap: Option<SwapFn<T>>,
    move_fn: Option<MoveFn<T>>,
}

impl<T> Clone for Strategies<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Strategies<T> {}

impl<T> Strategies<T> {
    /// No strategy registered.
    pub const fn empty() -> Self {
        Strategies {
            compare: None,
            swap: None,
            move_fn: None,
        }
    }

    /// Returns these strategies with `compare` registered.
    pub fn with_compare(mut self, compare: CompareFn<T>) -> Self {
        self.compare = Some(compare);
        self
    }

    /// Returns these strategies with `swap` registered.
    pub fn with_swap(mut self, swap: SwapFn<T>) -> Self {
        self.swap = Some(swap);
        self
    }

    /// Returns these strategies with `move_fn` registered.
    pub fn with_move(mut self, move_fn: MoveFn<T>) -> Self {
        self.move_fn = Some(move_fn);
        self
    }

    /// The registered comparator, if any.
    pub fn compare(&self) -> Option<CompareFn<T>> {
        self.compare
    }

    /// The registered swap, if any.
    pub fn swap(&self) -> Option<SwapFn<T>> {
        self.swap
    }

    /// The registered move, if any.
    pub fn move_fn(&self) -> Option<MoveFn<T>> {
        self.move_fn
    }

    pub(crate) fn set_compare(&mut self, compare: CompareFn<T>) {
        self.compare = Some(compare);
    }

    pub(crate) fn set_swap(&mut self, swap: SwapFn<T>) {
        self.swap = Some(swap);
    }

    pub(crate) fn set_move(&mut self, move_fn: MoveFn<T>) {
        self.move_fn = Some(move_fn);
    }

    pub(crate) fn require_compare(&self, op: &str) -> CompareFn<T> {
        match self.compare {
            Some(f) => f,
            None => unregistered("compare", op),
        }
    }

    pub(crate) fn require_swap(&self, op: &str) -> SwapFn<T> {
        match self.swap {
            Some(f) => f,
            None => unregistered("swap", op),
        }
    }

    pub(crate) fn require_move(&self, op: &str) -> MoveFn<T> {
        match self.move_fn {
            Some(f) => f,
            None => unregistered("move", op),
        }
    }
}

impl<T: Pod> Strategies<T> {
    /// [`default_compare`], [`default_swap`] and [`default_move`].
    pub fn defaults() -> Self {
        Strategies {
            compare: Some(default_compare::<T>),
            swap: Some(default_swap::<T>),
            move_fn: Some(default_move::<T>),
        }
    }
}

impl<T: Pod + PartialOrd> Strategies<T> {
    /// Like [`Strategies::defaults`], but ordering through `PartialOrd` via [`ordered_compare`].
    pub fn ordered() -> Self {
        Self::defaults().with_compare(ordered_compare::<T>)
    }
}

impl<T: Pod> Default for Strategies<T> {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<T> fmt::Debug for Strategies<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategies")
            .field("compare", &self.compare.is_some())
            .field("swap", &self.swap.is_some())
            .field("move", &self.move_fn.is_some())
            .finish()
    }
}

#[cold]
#[inline(never)]
fn unregistered(slot: &str, op: &str) -> ! {
    panic!("`{}` needs a {} strategy, but none is registered", op, slot);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_compare_by_width() {
        assert!(default_compare(&-1i8, &1i8));
        assert!(default_compare(&-300i16, &-2i16));
        assert!(default_compare(&i32::MIN, &0i32));
        assert!(default_compare(&0.5f32, &100.0f32));
        assert!(!default_compare(&4u16, &4u16));
        assert!(!default_compare(&7i32, &3i32));
    }

    #[test]
    fn default_compare_reads_unsigned_as_signed() {
        // 0xFF is -1 as i8
        assert!(default_compare(&0xFFu8, &0x01u8));
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "validate"))]
    #[should_panic(expected = "only defined for 1, 2 or 4 byte elements")]
    fn default_compare_rejects_other_widths() {
        default_compare(&1u64, &2u64);
    }

    #[test]
    fn swap_and_move() {
        let (mut a, mut b) = (1u32, 2u32);
        default_swap(&mut a, &mut b);
        assert_eq!((a, b), (2, 1));
        default_move(&mut a, &b);
        assert_eq!((a, b), (1, 1));
    }

    #[test]
    fn slots_register_independently() {
        let s: Strategies<f32> = Strategies::empty().with_move(default_move);
        assert!(s.compare().is_none());
        assert!(s.swap().is_none());
        assert!(s.move_fn().is_some());

        let s = Strategies::<f32>::ordered();
        let cmp = s.compare().unwrap();
        assert!(cmp(&-2.0, &-1.0));
    }

    #[test]
    #[should_panic(expected = "`sort` needs a swap strategy")]
    fn missing_slot_panics() {
        let s: Strategies<u8> = Strategies::empty();
        s.require_swap("sort");
    }
}
