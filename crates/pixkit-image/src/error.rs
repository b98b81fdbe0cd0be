use crate::{allocator::AllocatorError, region::Region, ImageSize};

/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the pixel data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the pixel count of an image size does not fit in a `usize`.
    #[error("Image size {0} overflows the addressable pixel count")]
    SizeOverflow(ImageSize),

    /// Error when a region does not fit inside the image.
    #[error("Region {region} exceeds the image bounds {size}")]
    RegionOutOfBounds {
        /// The offending region.
        region: Region,
        /// The size of the image the region was checked against.
        size: ImageSize,
    },

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the backing memory could not be allocated.
    #[error("Failed to allocate the image memory. {0}")]
    AllocationError(#[from] AllocatorError),
}
