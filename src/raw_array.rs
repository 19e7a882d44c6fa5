//! Implementation details for `DynArray`: the owned buffer and its chunked growth policy.
use core::alloc::Layout;
use core::fmt;
use core::mem;
use core::ptr::NonNull;

use alloc::alloc::handle_alloc_error;

use crate::allocator::{Global, RawAlloc};

use self::TryReserveError::*;

/// Largest number of elements an array can hold. Length and capacity are stored as `u32`.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Capacity the growth policy picks to hold `size` elements in blocks of `chunk`.
///
/// The result is rounded up to the next chunk boundary *exclusive*, so asking for exactly one
/// chunk of elements yields two chunks. Returns `None` if the result overflows `usize`.
///
/// # Examples
///
/// ```
/// use chunkvec::chunk_capacity;
///
/// assert_eq!(chunk_capacity(128, 0), Some(128));
/// assert_eq!(chunk_capacity(128, 64), Some(128));
/// assert_eq!(chunk_capacity(128, 128), Some(256));
/// assert_eq!(chunk_capacity(128, 129), Some(256));
/// ```
#[inline]
pub const fn chunk_capacity(chunk: usize, size: usize) -> Option<usize> {
    match (size / chunk).checked_add(1) {
        Some(chunks) => chunks.checked_mul(chunk),
        None => None,
    }
}

/// The error type for `try_reserve` methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TryReserveError {
    /// The computed capacity exceeded [`MAX_CAPACITY`] or overflowed `usize`.
    CapacityOverflow,
    /// The allocator returned an error.
    AllocError {
        /// The layout of the allocation request that failed.
        layout: Layout,
    },
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")?;
        match self {
            CapacityOverflow => f.write_str(" because the computed capacity exceeded the maximum"),
            AllocError { layout } => write!(
                f,
                " because the allocator failed for {} bytes (align {})",
                layout.size(),
                layout.align()
            ),
        }
    }
}

impl core::error::Error for TryReserveError {}

/// A low-level buffer of `T` with a logical length. It allocates, grows, shrinks and releases
/// memory, and never reads or drops the elements it holds.
///
/// `cap == 0` means no block is held. For zero-sized `T` the capacity is tracked but nothing is
/// ever allocated.
pub(crate) struct RawArray<T, A: RawAlloc = Global> {
    ptr: NonNull<T>,
    cap: u32,
    len: u32,
    alloc: A,
}

unsafe impl<T: Send, A: RawAlloc + Send> Send for RawArray<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for RawArray<T, A> {}

impl<T, A: RawAlloc> RawArray<T, A> {
    /// Creates an empty buffer without allocating.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            alloc,
        }
    }

    /// Gets a raw pointer to the start of the allocation. This is `NonNull::dangling()` if no
    /// block is held.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.cap as usize
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len as usize
    }

    /// Sets the logical length. The caller guarantees `len <= cap` and that `..len` is
    /// initialized.
    #[inline]
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.cap(), "`len` must be smaller or equal to `self.cap()`");
        self.len = len as u32;
    }

    /// Whether a buffer is held at all.
    #[inline]
    pub(crate) fn has_buffer(&self) -> bool {
        self.cap != 0
    }

    pub(crate) fn alloc(&self) -> &A {
        &self.alloc
    }

    fn current_memory(&self) -> Option<(NonNull<u8>, Layout)> {
        if mem::size_of::<T>() == 0 || self.cap == 0 {
            None
        } else {
            // The block was allocated with exactly this layout, so it cannot overflow.
            unsafe {
                let size = mem::size_of::<T>() * self.cap();
                let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
                Some((self.ptr.cast(), layout))
            }
        }
    }

    /// Grows the buffer to the chunk-rounded capacity for `size` elements. Never shrinks.
    ///
    /// # Aborts
    ///
    /// Aborts on allocation failure.
    pub(crate) fn reserve(&mut self, chunk: usize, size: usize) {
        handle_reserve(self.try_reserve(chunk, size));
    }

    /// The same as `reserve`, but returns on errors instead of panicking or aborting.
    pub(crate) fn try_reserve(&mut self, chunk: usize, size: usize) -> Result<(), TryReserveError> {
        let new_cap = chunk_capacity(chunk, size).ok_or(CapacityOverflow)?;
        if new_cap > self.cap() {
            self.try_set_capacity(new_cap)
        } else {
            Ok(())
        }
    }

    /// Reallocates down to the chunk-rounded capacity for the current length, if that is smaller
    /// than the current capacity.
    pub(crate) fn shrink(&mut self, chunk: usize) {
        if let Some(new_cap) = chunk_capacity(chunk, self.len()) {
            if new_cap < self.cap() {
                handle_reserve(self.try_set_capacity(new_cap));
            }
        }
    }

    /// Reallocates to exactly the current length. A length of zero releases the buffer.
    pub(crate) fn shrink_to_fit(&mut self) {
        if self.cap() != self.len() {
            handle_reserve(self.try_set_capacity(self.len()));
        }
    }

    /// Moves the buffer to a block of exactly `new_cap` elements, keeping the first
    /// `min(cap, new_cap)` of them. `new_cap == 0` releases the block.
    fn try_set_capacity(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(self.len() <= new_cap, "capacity change would cut off elements");

        if new_cap > MAX_CAPACITY {
            return Err(CapacityOverflow);
        }
        if mem::size_of::<T>() == 0 {
            self.cap = new_cap as u32;
            return Ok(());
        }
        if new_cap == 0 {
            if let Some((ptr, layout)) = self.current_memory() {
                unsafe { self.alloc.release(ptr, layout) }
            }
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return Ok(());
        }

        let new_layout = Layout::array::<T>(new_cap).map_err(|_| CapacityOverflow)?;
        let memory = match self.current_memory() {
            Some((ptr, old_layout)) => unsafe {
                self.alloc.reallocate(ptr, old_layout, new_layout.size())
            },
            None => self.alloc.allocate(new_layout),
        }
        .ok_or(AllocError { layout: new_layout })?;

        self.ptr = memory.cast();
        self.cap = new_cap as u32;
        Ok(())
    }
}

impl<T, A: RawAlloc> Drop for RawArray<T, A> {
    /// Frees the memory owned by `RawArray` *without* trying to drop its contents.
    fn drop(&mut self) {
        if let Some((ptr, layout)) = self.current_memory() {
            unsafe { self.alloc.release(ptr, layout) }
        }
    }
}

// Central place turning reservation errors into the fatal paths: overflow panics, allocator
// failure aborts.
#[inline]
fn handle_reserve(result: Result<(), TryReserveError>) {
    match result {
        Err(CapacityOverflow) => capacity_overflow(),
        Err(AllocError { layout }) => handle_alloc_error(layout),
        Ok(()) => { /* yay */ }
    }
}

// One central function responsible for reporting capacity overflows. This'll ensure that the code
// generation related to these panics is minimal as there's only one location which panics rather
// than a bunch throughout the module.
#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
