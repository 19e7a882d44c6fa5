//! A contiguous growable array that grows in fixed chunks, written `DynArray<T, CHUNK>`.
//!
//! Capacity always lands on a multiple of `CHUNK`, strictly above the length it was computed for.
//! Shifting operations (front push/pop, insert, erase) go through the array's move strategy and
//! the sorts through its compare, swap and move strategies; see [`strategy`](crate::strategy).
//!
//! # Capacity and reallocation
//!
//! Any operation that may grow or shrink the buffer ([`reserve`], every push, [`insert`],
//! [`fill_size`], [`shrink`], [`shrink_to_fit`], [`copy_from`]) may move it. References returned
//! by [`at_mut`] or obtained through slices are tied to a borrow of the array, so the compiler
//! rejects their use across such a call. Raw pointers from [`as_ptr`] and [`as_mut_ptr`] are not
//! tracked and must not be used after one.
//!
//! [`reserve`]: DynArray::reserve
//! [`insert`]: DynArray::insert
//! [`fill_size`]: DynArray::fill_size
//! [`shrink`]: DynArray::shrink
//! [`shrink_to_fit`]: DynArray::shrink_to_fit
//! [`copy_from`]: DynArray::copy_from
//! [`at_mut`]: DynArray::at_mut
//! [`as_ptr`]: DynArray::as_ptr
//! [`as_mut_ptr`]: DynArray::as_mut_ptr
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{self, Index, IndexMut};
use core::ptr;
use core::slice::{self, SliceIndex};

use bytemuck::{Pod, Zeroable};

use crate::allocator::{Global, RawAlloc};
use crate::raw_array::{RawArray, TryReserveError};
use crate::sort::{self, move_within, DEFAULT_QUICK_SORT_LEVELS};
use crate::strategy::{
    default_compare, default_move, default_swap, CompareFn, MoveFn, Strategies, SwapFn,
};

/// Growth granularity used when none is given.
pub const DEFAULT_CHUNK: usize = 128;

/// A contiguous growable array of plain-data elements, growing in blocks of `CHUNK` elements.
///
/// # Examples
///
/// ```
/// use chunkvec::DynArray;
///
/// let mut da: DynArray<f32> = DynArray::new();
/// da.push_front(1.1);
/// da.push_back(2.2);
/// da.push_back(3.3);
/// assert_eq!(da.capacity(), 128);
///
/// assert_eq!(da.pop_front(), 1.1);
/// assert_eq!(da.pop_back(), 3.3);
/// assert_eq!(da, [2.2]);
/// ```
pub struct DynArray<T, const CHUNK: usize = DEFAULT_CHUNK, A: RawAlloc = Global> {
    buf: RawArray<T, A>,
    strategies: Strategies<T>,
}

impl<T: Pod, const CHUNK: usize> DynArray<T, CHUNK, Global> {
    /// Constructs a new, empty array with the default strategies registered.
    ///
    /// The array will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let da: DynArray<i32> = DynArray::new();
    /// assert_eq!(da.len(), 0);
    /// assert_eq!(da.capacity(), 0);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new, empty array using `strategies`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// use chunkvec::Strategies;
    ///
    /// let da: DynArray<u64> = DynArray::with_strategies(Strategies::ordered());
    /// assert!(da.strategies().compare().is_some());
    /// ```
    #[inline]
    pub fn with_strategies(strategies: Strategies<T>) -> Self {
        Self::with_strategies_in(strategies, Global)
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc> DynArray<T, CHUNK, A> {
    const CHUNK_IS_POSITIVE: () = assert!(CHUNK > 0, "chunk size must be positive");

    /// Like `new`, but allocating through `alloc`.
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self::with_strategies_in(Strategies::defaults(), alloc)
    }

    /// Like `with_strategies`, but allocating through `alloc`.
    pub fn with_strategies_in(strategies: Strategies<T>, alloc: A) -> Self {
        let () = Self::CHUNK_IS_POSITIVE;
        DynArray {
            buf: RawArray::new_in(alloc),
            strategies,
        }
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the array can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Returns the allocator backing this array.
    pub fn allocator(&self) -> &A {
        self.buf.alloc()
    }

    /// The structural invariant: `len <= capacity`, and no more than one element without a
    /// buffer.
    ///
    /// Checked at the start of every operation when `debug_assertions` or the `validate` feature
    /// is on.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !(self.buf.len() > self.buf.cap() || (self.buf.len() > 1 && !self.buf.has_buffer()))
    }

    /// Extracts a slice containing the entire array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len()) }
    }

    /// Extracts a mutable slice containing the entire array.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len()) }
    }

    /// Returns a raw pointer to the array's buffer.
    ///
    /// The pointer is dangling while no buffer is held, and becomes invalid at the next call that
    /// may reallocate.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Returns an unsafe mutable pointer to the array's buffer.
    ///
    /// The same invalidation rules as for [`as_ptr`](DynArray::as_ptr) apply.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// The strategies this array sorts and shifts with.
    pub fn strategies(&self) -> &Strategies<T> {
        &self.strategies
    }

    /// Replaces all three strategy slots.
    pub fn set_strategies(&mut self, strategies: Strategies<T>) {
        self.strategies = strategies;
    }

    /// Registers the comparator used by [`sort`](DynArray::sort) and
    /// [`quick_sort`](DynArray::quick_sort).
    pub fn set_compare_function(&mut self, compare: CompareFn<T>) {
        self.strategies.set_compare(compare);
    }

    /// Registers the swap used by [`sort`](DynArray::sort).
    pub fn set_swap_function(&mut self, swap: SwapFn<T>) {
        self.strategies.set_swap(swap);
    }

    /// Registers the move used by every shifting operation and by
    /// [`quick_sort`](DynArray::quick_sort).
    pub fn set_move_function(&mut self, move_fn: MoveFn<T>) {
        self.strategies.set_move(move_fn);
    }

    /// Registers [`default_compare`].
    pub fn set_default_compare_function(&mut self) {
        self.strategies.set_compare(default_compare::<T>);
    }

    /// Registers [`default_swap`].
    pub fn set_default_swap_function(&mut self) {
        self.strategies.set_swap(default_swap::<T>);
    }

    /// Registers [`default_move`].
    pub fn set_default_move_function(&mut self) {
        self.strategies.set_move(default_move::<T>);
    }

    /// Registers all three default strategies.
    pub fn set_default_functions(&mut self) {
        self.strategies = Strategies::defaults();
    }

    /// Makes room for `size` elements in total.
    ///
    /// The new capacity is `(size / CHUNK + 1) * CHUNK`, so it is always a multiple of `CHUNK`
    /// strictly greater than `size`. The buffer is only reallocated when that is more than the
    /// current capacity; `reserve` never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    ///
    /// # Aborts
    ///
    /// Aborts on allocation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<f32> = DynArray::new();
    /// da.reserve(64);
    /// assert_eq!(da.capacity(), 128);
    /// da.reserve(129);
    /// assert_eq!(da.capacity(), 256);
    /// da.reserve(1);
    /// assert_eq!(da.capacity(), 256);
    /// ```
    pub fn reserve(&mut self, size: usize) {
        check_valid!(self, "reserve");
        self.buf.reserve(CHUNK, size);
    }

    /// The same as `reserve`, but returns on errors instead of panicking or aborting.
    pub fn try_reserve(&mut self, size: usize) -> Result<(), TryReserveError> {
        check_valid!(self, "try_reserve");
        self.buf.try_reserve(CHUNK, size)
    }

    /// Reallocates to the chunk-rounded capacity for the current length, if that is smaller than
    /// the current capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<u8, 16> = DynArray::new();
    /// da.reserve(40);
    /// da.push_back(1);
    /// assert_eq!(da.capacity(), 48);
    /// da.shrink();
    /// assert_eq!(da.capacity(), 16);
    /// ```
    pub fn shrink(&mut self) {
        check_valid!(self, "shrink");
        self.buf.shrink(CHUNK);
    }

    /// Reallocates to exactly `len` elements. An empty array releases its buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<f32> = DynArray::new();
    /// da.push_back(1.1);
    /// da.shrink_to_fit();
    /// assert_eq!(da.capacity(), 1);
    /// da.clear();
    /// da.shrink_to_fit();
    /// assert_eq!(da.capacity(), 0);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        check_valid!(self, "shrink_to_fit");
        self.buf.shrink_to_fit();
    }

    /// Grows by one slot at the back and writes `value` into it.
    #[inline]
    fn append_slot(&mut self, value: T) {
        let len = self.len();
        self.buf.reserve(CHUNK, len + 1);
        unsafe {
            self.buf.ptr().add(len).write(value);
        }
        self.buf.set_len(len + 1);
    }

    /// Appends an element to the back of the array.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        check_valid!(self, "push_back");
        self.append_slot(value);
    }

    /// Removes the last element and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_back(&mut self) -> T {
        check_valid!(self, "pop_back");
        let len = self.len();
        if len == 0 {
            empty_array("pop_back");
        }
        let value = self.as_slice()[len - 1];
        self.buf.set_len(len - 1);
        value
    }

    /// Inserts an element at the front, moving every element one slot to the back.
    ///
    /// `O(len)` calls to the move strategy.
    pub fn push_front(&mut self, value: T) {
        check_valid!(self, "push_front");
        self.insert_with("push_front", 0, value);
    }

    /// Removes the first element and returns it, moving every other element one slot to the
    /// front.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_front(&mut self) -> T {
        check_valid!(self, "pop_front");
        if self.is_empty() {
            empty_array("pop_front");
        }
        let value = self.as_slice()[0];
        self.erase_with("pop_front", 0);
        value
    }

    /// Appends a zero-filled element.
    pub fn push_back_empty(&mut self) {
        check_valid!(self, "push_back_empty");
        self.append_slot(<T as Zeroable>::zeroed());
    }

    /// Inserts a zero-filled element at the front.
    pub fn push_front_empty(&mut self) {
        check_valid!(self, "push_front_empty");
        self.insert_with("push_front_empty", 0, <T as Zeroable>::zeroed());
    }

    /// Inserts an element at position `index`, moving all elements after it one slot to the back.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<f32> = DynArray::from([1.1, 2.2, 3.3, 4.4, 5.5]);
    /// da.insert(2, 9.9);
    /// assert_eq!(da, [1.1, 2.2, 9.9, 3.3, 4.4, 5.5]);
    /// da.erase(2);
    /// assert_eq!(da, [1.1, 2.2, 3.3, 4.4, 5.5]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        check_valid!(self, "insert");
        self.insert_with("insert", index, value);
    }

    fn insert_with(&mut self, op: &str, index: usize, value: T) {
        #[cold]
        #[inline(never)]
        fn assert_failed(op: &str, index: usize, len: usize) -> ! {
            panic!("`{}` index (is {}) should be <= len (is {})", op, index, len);
        }

        let len = self.len();
        if index > len {
            assert_failed(op, index, len);
        }
        if index == len {
            self.append_slot(value);
            return;
        }
        let move_fn = self.strategies.require_move(op);

        // The new tail slot is initialized first so the shift below only ever reads live
        // elements.
        self.append_slot(value);
        let v = self.as_mut_slice();
        for i in (index + 1..=len).rev() {
            move_within(v, i, i - 1, move_fn);
        }
        v[index] = value;
    }

    /// Removes the element at `index`, moving all elements after it one slot to the front.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) {
        check_valid!(self, "erase");
        self.erase_with("erase", index);
    }

    fn erase_with(&mut self, op: &str, index: usize) {
        let len = self.len();
        if index >= len {
            index_out_of_bounds(op, index, len);
        }
        if index + 1 < len {
            let move_fn = self.strategies.require_move(op);
            let v = self.as_mut_slice();
            for i in index..len - 1 {
                move_within(v, i, i + 1, move_fn);
            }
        }
        self.buf.set_len(len - 1);
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn at(&self, index: usize) -> T {
        check_valid!(self, "at");
        let len = self.len();
        if index >= len {
            index_out_of_bounds("at", index, len);
        }
        self.as_slice()[index]
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<f32> = DynArray::from([1.1, 2.2, 3.3]);
    /// *da.at_mut(1) = 9.9;
    /// assert_eq!(da.at(1), 9.9);
    /// ```
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        check_valid!(self, "at_mut");
        let len = self.len();
        if index >= len {
            index_out_of_bounds("at_mut", index, len);
        }
        &mut self.as_mut_slice()[index]
    }

    /// Overwrites every element with `value`. The length does not change.
    pub fn fill(&mut self, value: T) {
        check_valid!(self, "fill");
        self.as_mut_slice().fill(value);
    }

    /// Makes the array exactly `size` copies of `value`, reserving as `reserve(size)` would.
    ///
    /// Previous contents are discarded, not preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<f32> = DynArray::new();
    /// da.fill_size(10, 3.3);
    /// assert_eq!(da.len(), 10);
    /// assert!(da.iter().all(|&x| x == 3.3));
    /// ```
    pub fn fill_size(&mut self, size: usize, value: T) {
        check_valid!(self, "fill_size");
        self.buf.reserve(CHUNK, size);
        let ptr = self.buf.ptr();
        unsafe {
            for i in 0..size {
                ptr.add(i).write(value);
            }
        }
        self.buf.set_len(size);
    }

    /// Makes this array a value copy of `source`, reserving as `reserve(source.len())` would.
    ///
    /// The two arrays share nothing afterwards. Strategies are not copied.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let src: DynArray<u16> = DynArray::from([4, 5, 6]);
    /// let mut dst: DynArray<u16, 4> = DynArray::new();
    /// dst.copy_from(&src);
    /// assert_eq!(dst, src);
    /// assert_eq!(dst.capacity(), 4);
    /// ```
    pub fn copy_from<const SRC_CHUNK: usize, B: RawAlloc>(
        &mut self,
        source: &DynArray<T, SRC_CHUNK, B>,
    ) {
        check_valid!(source, "copy");
        check_valid!(self, "copy");
        let len = source.len();
        self.buf.reserve(CHUNK, len);
        unsafe {
            ptr::copy_nonoverlapping(source.as_ptr(), self.buf.ptr(), len);
        }
        self.buf.set_len(len);
    }

    /// Removes all elements. Capacity is kept.
    #[inline]
    pub fn clear(&mut self) {
        check_valid!(self, "clear");
        self.buf.set_len(0);
    }

    /// Selection-sorts the array with the compare and swap strategies.
    ///
    /// `O(len²)`, not stable. See [`sort::selection_sort`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<f32> = DynArray::from([1.1, 5.5, 3.3, 4.4, 2.2]);
    /// da.sort();
    /// assert_eq!(da, [1.1, 2.2, 3.3, 4.4, 5.5]);
    /// ```
    pub fn sort(&mut self) {
        check_valid!(self, "sort");
        let compare = self.strategies.require_compare("sort");
        let swap = self.strategies.require_swap("sort");
        sort::selection_sort(self.as_mut_slice(), compare, swap);
    }

    /// Quicksorts the array with the compare and move strategies, using a range stack of
    /// [`DEFAULT_QUICK_SORT_LEVELS`] entries. See [`sort::quick_sort`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use chunkvec::DynArray;
    /// let mut da: DynArray<f32> = DynArray::from([1.1, 5.5, 3.3, 4.4, 2.2]);
    /// da.set_compare_function(|a, b| a > b);
    /// da.quick_sort();
    /// assert_eq!(da, [5.5, 4.4, 3.3, 2.2, 1.1]);
    /// ```
    pub fn quick_sort(&mut self) {
        self.quick_sort_with_levels::<DEFAULT_QUICK_SORT_LEVELS>();
    }

    /// Like [`quick_sort`](DynArray::quick_sort), with a range stack of `LEVELS` entries.
    ///
    /// # Panics
    ///
    /// Panics if sorting needs more than `LEVELS` stack entries.
    pub fn quick_sort_with_levels<const LEVELS: usize>(&mut self) {
        check_valid!(self, "quick_sort");
        let compare = self.strategies.require_compare("quick_sort");
        let move_fn = self.strategies.require_move("quick_sort");
        sort::quick_sort::<T, LEVELS>(self.as_mut_slice(), compare, move_fn);
    }
}

/// Makes `destination` a value copy of `source`. See [`DynArray::copy_from`].
pub fn copy<T: Pod, const C1: usize, A1: RawAlloc, const C2: usize, A2: RawAlloc>(
    source: &DynArray<T, C1, A1>,
    destination: &mut DynArray<T, C2, A2>,
) {
    destination.copy_from(source);
}

#[cold]
#[inline(never)]
fn index_out_of_bounds(op: &str, index: usize, len: usize) -> ! {
    panic!("`{}` index (is {}) should be < len (is {})", op, index, len);
}

#[cold]
#[inline(never)]
fn empty_array(op: &str) -> ! {
    panic!("`{}` called on an empty array", op);
}

////////////////////////////////////////////////////////////////////////////////
// Common trait implementations for DynArray
////////////////////////////////////////////////////////////////////////////////

impl<T: Pod, const CHUNK: usize, A: RawAlloc> ops::Deref for DynArray<T, CHUNK, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc> ops::DerefMut for DynArray<T, CHUNK, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc + Clone> Clone for DynArray<T, CHUNK, A> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_strategies_in(self.strategies, self.allocator().clone());
        copy.copy_from(self);
        copy
    }
}

impl<T: Pod + Hash, const CHUNK: usize, A: RawAlloc> Hash for DynArray<T, CHUNK, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state)
    }
}

impl<T: Pod, I: SliceIndex<[T]>, const CHUNK: usize, A: RawAlloc> Index<I>
    for DynArray<T, CHUNK, A>
{
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T: Pod, I: SliceIndex<[T]>, const CHUNK: usize, A: RawAlloc> IndexMut<I>
    for DynArray<T, CHUNK, A>
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc> Extend<T> for DynArray<T, CHUNK, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len().saturating_add(lower));
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Pod, const CHUNK: usize, A: RawAlloc> Extend<&'a T> for DynArray<T, CHUNK, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc + Default> FromIterator<T>
    for DynArray<T, CHUNK, A>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new_in(A::default());
        array.extend(iter);
        array
    }
}

impl<'a, T: Pod, const CHUNK: usize, A: RawAlloc> IntoIterator for &'a DynArray<T, CHUNK, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T: Pod, const CHUNK: usize, A: RawAlloc> IntoIterator
    for &'a mut DynArray<T, CHUNK, A>
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

macro_rules! __impl_slice_eq1 {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: Pod + PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
        }
    }
}

impl<T, U, const C: usize, A: RawAlloc, const D: usize, B: RawAlloc> PartialEq<DynArray<U, D, B>>
    for DynArray<T, C, A>
where
    T: Pod + PartialEq<U>,
    U: Pod,
{
    #[inline]
    fn eq(&self, other: &DynArray<U, D, B>) -> bool {
        self[..] == other[..]
    }
}

__impl_slice_eq1! { [const C: usize, A: RawAlloc] DynArray<T, C, A>, [U] }
__impl_slice_eq1! { [const C: usize, A: RawAlloc] DynArray<T, C, A>, &[U] }
__impl_slice_eq1! { [const C: usize, A: RawAlloc] DynArray<T, C, A>, &mut [U] }
__impl_slice_eq1! { [const C: usize, A: RawAlloc, const N: usize] DynArray<T, C, A>, [U; N] }
__impl_slice_eq1! { [const C: usize, A: RawAlloc, const N: usize] DynArray<T, C, A>, &[U; N] }

impl<T: Pod + Eq, const CHUNK: usize, A: RawAlloc> Eq for DynArray<T, CHUNK, A> {}

impl<T: Pod, const CHUNK: usize, A: RawAlloc + Default> Default for DynArray<T, CHUNK, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Pod + fmt::Debug, const CHUNK: usize, A: RawAlloc> fmt::Debug for DynArray<T, CHUNK, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc> AsRef<[T]> for DynArray<T, CHUNK, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc> AsMut<[T]> for DynArray<T, CHUNK, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc + Default> From<&[T]> for DynArray<T, CHUNK, A> {
    fn from(s: &[T]) -> Self {
        let mut array = Self::new_in(A::default());
        array.reserve(s.len());
        unsafe {
            ptr::copy_nonoverlapping(s.as_ptr(), array.as_mut_ptr(), s.len());
        }
        array.buf.set_len(s.len());
        array
    }
}

impl<T: Pod, const CHUNK: usize, A: RawAlloc + Default, const N: usize> From<[T; N]>
    for DynArray<T, CHUNK, A>
{
    fn from(s: [T; N]) -> Self {
        Self::from(&s[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn new_array_is_empty_and_unallocated() {
        let da: DynArray<u32> = DynArray::new();
        assert!(da.is_valid());
        assert!(da.is_empty());
        assert_eq!(da.capacity(), 0);
        assert_eq!(da.as_slice(), &[] as &[u32]);
    }

    #[test]
    fn push_back_grows_by_chunks() {
        let mut da: DynArray<u8, 4> = DynArray::new();
        for i in 0..3 {
            da.push_back(i);
        }
        assert_eq!(da.capacity(), 4);
        da.push_back(3);
        assert_eq!(da.capacity(), 8);
        assert_eq!(da, [0, 1, 2, 3]);
    }

    static MOVES: AtomicUsize = AtomicUsize::new(0);

    fn counting_move(destination: &mut i32, source: &i32) {
        MOVES.fetch_add(1, Ordering::Relaxed);
        *destination = *source;
    }

    #[test]
    fn shifts_go_through_move_strategy() {
        let mut da: DynArray<i32> = DynArray::from([1, 2, 3, 4]);
        da.set_move_function(counting_move);

        MOVES.store(0, Ordering::Relaxed);
        da.push_front(0);
        assert_eq!(MOVES.load(Ordering::Relaxed), 4);
        assert_eq!(da, [0, 1, 2, 3, 4]);

        MOVES.store(0, Ordering::Relaxed);
        da.erase(1);
        assert_eq!(MOVES.load(Ordering::Relaxed), 3);
        assert_eq!(da, [0, 2, 3, 4]);

        MOVES.store(0, Ordering::Relaxed);
        da.insert(3, 7);
        assert_eq!(MOVES.load(Ordering::Relaxed), 1);
        assert_eq!(da, [0, 2, 3, 7, 4]);

        MOVES.store(0, Ordering::Relaxed);
        assert_eq!(da.pop_front(), 0);
        assert_eq!(MOVES.load(Ordering::Relaxed), 4);
        assert_eq!(da, [2, 3, 7, 4]);
    }

    #[test]
    fn insert_at_end_and_erase_last_need_no_moves() {
        let mut da: DynArray<i16> = DynArray::with_strategies(Strategies::empty());
        da.insert(0, 5);
        da.insert(1, 6);
        da.erase(1);
        assert_eq!(da, [5]);
    }

    #[test]
    #[should_panic(expected = "`push_front` needs a move strategy")]
    fn push_front_without_move_strategy() {
        let mut da: DynArray<i16> = DynArray::with_strategies(Strategies::empty());
        da.push_back(1);
        da.push_front(0);
    }

    #[test]
    #[should_panic(expected = "`sort` needs a compare strategy")]
    fn sort_without_compare_strategy() {
        let mut da: DynArray<i16> =
            DynArray::with_strategies(Strategies::empty().with_swap(default_swap));
        da.sort();
    }

    #[test]
    #[should_panic(expected = "`pop_back` called on an empty array")]
    fn pop_back_empty() {
        let mut da: DynArray<u8> = DynArray::new();
        da.pop_back();
    }

    #[test]
    #[should_panic(expected = "`pop_front` called on an empty array")]
    fn pop_front_empty() {
        let mut da: DynArray<u8> = DynArray::new();
        da.pop_front();
    }

    #[test]
    #[should_panic(expected = "`insert` index (is 3) should be <= len (is 1)")]
    fn insert_past_end() {
        let mut da: DynArray<u8> = DynArray::from([1]);
        da.insert(3, 2);
    }

    #[test]
    #[should_panic(expected = "`erase` index (is 1) should be < len (is 1)")]
    fn erase_past_end() {
        let mut da: DynArray<u8> = DynArray::from([1]);
        da.erase(1);
    }

    #[test]
    #[should_panic(expected = "`at` index (is 0) should be < len (is 0)")]
    fn at_on_empty() {
        let da: DynArray<u8> = DynArray::new();
        da.at(0);
    }

    #[test]
    fn empty_pushes_are_zeroed() {
        let mut da: DynArray<[u16; 3]> = DynArray::new();
        da.push_back([1, 2, 3]);
        da.push_front_empty();
        da.push_back_empty();
        assert_eq!(da, [[0; 3], [1, 2, 3], [0; 3]]);
    }

    #[test]
    fn fill_size_discards_previous_contents() {
        let mut da: DynArray<i32, 8> = DynArray::from([1, 2, 3, 4, 5]);
        da.fill_size(2, -1);
        assert_eq!(da, [-1, -1]);
        assert_eq!(da.capacity(), 8);
        da.fill_size(20, 9);
        assert_eq!(da.len(), 20);
        assert_eq!(da.capacity(), 24);
        da.fill(0);
        assert!(da.iter().all(|&x| x == 0));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut da: DynArray<u64> = DynArray::from([1, 2, 3]);
        da.clear();
        assert!(da.is_empty());
        assert_eq!(da.capacity(), 128);
    }

    #[test]
    fn clone_is_independent() {
        let mut a: DynArray<u8, 2> = DynArray::from([1, 2, 3]);
        let b = a.clone();
        a.fill(0);
        assert_eq!(b, [1, 2, 3]);
        assert_eq!(b.capacity(), 4);
    }

    #[test]
    fn collect_and_extend() {
        let mut da: DynArray<u32> = (1..=3).collect();
        da.extend(&[4, 5]);
        assert_eq!(da, [1, 2, 3, 4, 5]);
        let sum: u32 = (&da).into_iter().sum();
        assert_eq!(sum, 15);
    }

    #[test]
    fn zero_sized_elements() {
        let mut da: DynArray<()> = DynArray::new();
        da.push_back(());
        da.push_back(());
        da.push_front(());
        assert_eq!(da.len(), 3);
        assert!(da.is_valid());
        da.erase(0);
        da.pop_back();
        assert_eq!(da.len(), 1);
    }
}
