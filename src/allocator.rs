//! The allocation primitives an array is built on.
//!
//! Every buffer change of a [`DynArray`] goes through exactly one of [`RawAlloc::allocate`],
//! [`RawAlloc::reallocate`] or [`RawAlloc::release`]. Embedders redirect them by implementing
//! [`RawAlloc`] and constructing arrays with [`DynArray::new_in`].
//!
//! [`DynArray`]: crate::DynArray
//! [`DynArray::new_in`]: crate::DynArray::new_in
use core::alloc::Layout;
use core::ptr::NonNull;

/// Allocate, reallocate and release raw blocks of memory.
///
/// # Safety
///
/// Implementors must return blocks that are valid for reads and writes of `layout.size()` bytes
/// and aligned to `layout.align()`, and `reallocate` must preserve the first
/// `min(old.size(), new_size)` bytes of the block.
pub unsafe trait RawAlloc {
    /// Allocates a block for `layout`. `layout.size()` is never zero.
    ///
    /// Returns `None` when the allocation fails.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resizes the block at `ptr` to `new_size` bytes, keeping its alignment.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `old`, and `new_size` must be
    /// non-zero. On success the old pointer is no longer valid.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// Returns the block at `ptr` to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout`.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The global heap, through `alloc::alloc`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl RawAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert_ne!(layout.size(), 0);
        NonNull::new(unsafe { alloc::alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        debug_assert_ne!(new_size, 0);
        NonNull::new(unsafe { alloc::alloc::realloc(ptr.as_ptr(), old, new_size) })
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

unsafe impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        unsafe { (**self).reallocate(ptr, old, new_size) }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).release(ptr, layout) }
    }
}
