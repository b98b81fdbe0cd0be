//! Pluggable memory source for pixel buffers and byte planes.
//!
//! Storage never calls the global allocator directly. It asks a
//! [`BufferAllocator`] for memory and hands the same pointer and layout back when
//! it is done, so callers can count, pool or cap allocations.

use std::alloc::{self, Layout};

/// Failure to obtain memory for a buffer.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AllocatorError {
    /// Element count and type do not describe a valid allocation, usually
    /// because the byte size exceeds `isize::MAX`.
    #[error("Invalid buffer layout {0}")]
    LayoutError(core::alloc::LayoutError),

    /// No memory was returned for the request.
    #[error("Allocator returned a null pointer")]
    NullPointer,
}

/// Source of the memory behind pixel and byte storage.
///
/// Storage only calls `alloc` with non-zero sized layouts, and passes every
/// returned pointer to `dealloc` exactly once with the layout it was allocated
/// with.
pub trait BufferAllocator: Clone {
    /// Obtain memory for `layout`.
    fn alloc(&self, layout: Layout) -> Result<*mut u8, AllocatorError>;

    /// Return memory previously obtained from [`BufferAllocator::alloc`].
    fn dealloc(&self, ptr: *mut u8, layout: Layout);
}

/// The process-wide system allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuAllocator;

impl BufferAllocator for CpuAllocator {
    fn alloc(&self, layout: Layout) -> Result<*mut u8, AllocatorError> {
        // SAFETY: storage never requests a zero-sized layout
        let ptr = unsafe { alloc::alloc(layout) };
        if ptr.is_null() {
            return Err(AllocatorError::NullPointer);
        }
        Ok(ptr)
    }

    #[allow(clippy::not_unsafe_ptr_arg_deref)]
    fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if ptr.is_null() {
            return;
        }
        // SAFETY: `ptr` came from `alloc` with this layout
        unsafe { alloc::dealloc(ptr, layout) }
    }
}
