//! Owned, allocator-backed storage for pixel buffers and byte planes.
//!
//! Memory is obtained from a [`BufferAllocator`] when the storage is created and
//! handed back to the same allocator exactly once when the storage is dropped.

use std::{alloc::Layout, ptr::NonNull};

use crate::allocator::{AllocatorError, BufferAllocator};

/// A contiguous, exclusively owned block of `len` elements of type `T`.
///
/// Only `Copy` element types can be stored, so dropping the storage never
/// needs to run element destructors.
pub struct OwnedStorage<T, A: BufferAllocator> {
    /// The pointer to the memory which must be non-null.
    ptr: NonNull<T>,
    /// Number of elements.
    len: usize,
    /// The memory layout used for allocation.
    layout: Layout,
    /// The allocator that owns the memory.
    alloc: A,
}

// SAFETY: the storage owns its memory exclusively; access goes through `&self` / `&mut self`.
unsafe impl<T: Send, A: BufferAllocator + Send> Send for OwnedStorage<T, A> {}
// SAFETY: shared references only hand out `&[T]`.
unsafe impl<T: Sync, A: BufferAllocator + Sync> Sync for OwnedStorage<T, A> {}

impl<T: Copy, A: BufferAllocator> OwnedStorage<T, A> {
    /// Allocates storage for `len` elements and fills it with `val`.
    pub fn from_elem(val: T, len: usize, alloc: A) -> Result<Self, AllocatorError> {
        let storage = Self::allocate(len, alloc)?;
        for i in 0..len {
            // SAFETY: the allocation holds `len` properly aligned elements.
            unsafe { storage.ptr.as_ptr().add(i).write(val) };
        }
        Ok(storage)
    }

    /// Allocates storage and copies `data` into it.
    pub fn from_slice(data: &[T], alloc: A) -> Result<Self, AllocatorError> {
        let storage = Self::allocate(data.len(), alloc)?;
        // SAFETY: both regions are valid for `data.len()` elements and do not overlap.
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), storage.ptr.as_ptr(), data.len());
        }
        Ok(storage)
    }

    /// Allocates new storage from the same allocator holding a copy of the elements.
    pub fn try_clone(&self) -> Result<Self, AllocatorError> {
        Self::from_slice(self.as_slice(), self.alloc.clone())
    }

    fn allocate(len: usize, alloc: A) -> Result<Self, AllocatorError> {
        let layout = Layout::array::<T>(len).map_err(AllocatorError::LayoutError)?;

        // zero-sized requests never reach the allocator
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let raw_ptr = alloc.alloc(layout)? as *mut T;
            NonNull::new(raw_ptr).ok_or(AllocatorError::NullPointer)?
        };

        Ok(Self {
            ptr,
            len,
            layout,
            alloc,
        })
    }
}

impl<T, A: BufferAllocator> OwnedStorage<T, A> {
    /// Returns the stored elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid and aligned for `len` initialized elements.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the stored elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: ptr is valid, aligned and exclusively borrowed through `&mut self`.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the allocator backing this storage.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A: BufferAllocator> Drop for OwnedStorage<T, A> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            self.alloc.dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
        }
    }
}

impl<T: std::fmt::Debug, A: BufferAllocator> std::fmt::Debug for OwnedStorage<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedStorage")
            .field("len", &self.len)
            .field("layout", &self.layout)
            .finish()
    }
}
