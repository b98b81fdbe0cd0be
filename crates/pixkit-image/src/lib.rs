#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// allocator trait and the system allocator used by pixel buffers.
pub mod allocator;

/// Error types for the image module.
pub mod error;

/// pixel buffer representation.
pub mod image;

/// pixel format capability and concrete pixel types.
pub mod pixel;

/// rectangles and positions inside an image.
pub mod region;

/// owned storage backing pixel buffers and byte planes.
pub mod storage;

pub use crate::allocator::{AllocatorError, BufferAllocator, CpuAllocator};
pub use crate::error::ImageError;
pub use crate::image::{ImageSize, PixelBuffer};
pub use crate::pixel::{Pixel, Rgba32, Vector4};
pub use crate::region::{Point, Region};
