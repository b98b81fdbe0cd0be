use crate::{
    allocator::{BufferAllocator, CpuAllocator},
    error::ImageError,
    pixel::Pixel,
    region::Region,
    storage::OwnedStorage,
};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// The number of pixels in an image of this size, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// The number of pixels, or `None` if it does not fit in a `usize`.
    pub fn checked_area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// A contiguous, row-major 2D store of pixels of a single format.
///
/// The buffer owns `width * height` pixels of type `P`, allocated through `A`,
/// and exposes them as whole-image or per-row slices for zero-copy bulk access.
/// The memory is returned to the allocator when the buffer is dropped.
pub struct PixelBuffer<P: Pixel, A: BufferAllocator = CpuAllocator> {
    size: ImageSize,
    storage: OwnedStorage<P, A>,
}

impl<P: Pixel, A: BufferAllocator> PixelBuffer<P, A> {
    /// Create a new pixel buffer from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixels in row-major order.
    /// * `alloc` - The allocator backing the buffer.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, or the size
    /// overflows, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixkit_image::{ImageSize, PixelBuffer, CpuAllocator};
    /// use pixkit_image::pixel::L8;
    ///
    /// let image = PixelBuffer::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![L8::new(0); 10 * 20],
    ///     CpuAllocator,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<P>, alloc: A) -> Result<Self, ImageError> {
        let area = size.checked_area().ok_or(ImageError::SizeOverflow(size))?;

        // check if the data length matches the image size
        if data.len() != area {
            return Err(ImageError::InvalidDataLength(data.len(), area));
        }

        Ok(Self {
            size,
            storage: OwnedStorage::from_slice(&data, alloc)?,
        })
    }

    /// Create a new pixel buffer with every pixel set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixkit_image::{ImageSize, PixelBuffer, CpuAllocator};
    /// use pixkit_image::pixel::Rgba32;
    ///
    /// let image = PixelBuffer::from_size_val(
    ///     ImageSize {
    ///         width: 4,
    ///         height: 2,
    ///     },
    ///     Rgba32::new(1, 2, 3, 4),
    ///     CpuAllocator,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.get(3, 1), Some(&Rgba32::new(1, 2, 3, 4)));
    /// ```
    pub fn from_size_val(size: ImageSize, val: P, alloc: A) -> Result<Self, ImageError> {
        let area = size.checked_area().ok_or(ImageError::SizeOverflow(size))?;
        Ok(Self {
            size,
            storage: OwnedStorage::from_elem(val, area, alloc)?,
        })
    }

    /// Copy the buffer into new memory obtained from the same allocator.
    pub fn try_clone(&self) -> Result<Self, ImageError> {
        Ok(Self {
            size: self.size,
            storage: self.storage.try_clone()?,
        })
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// The region covering the whole image.
    pub fn bounds(&self) -> Region {
        Region::from_size(self.size)
    }

    /// The allocator backing the buffer.
    pub fn allocator(&self) -> &A {
        self.storage.allocator()
    }

    /// All pixels in row-major order.
    pub fn as_slice(&self) -> &[P] {
        self.storage.as_slice()
    }

    /// All pixels in row-major order, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [P] {
        self.storage.as_mut_slice()
    }

    /// Copy the pixels into a vector.
    pub fn to_vec(&self) -> Vec<P> {
        self.as_slice().to_vec()
    }

    /// The pixels of row `y`, or `None` if the row is out of bounds.
    pub fn row(&self, y: usize) -> Option<&[P]> {
        if y >= self.height() {
            return None;
        }
        let width = self.width();
        Some(&self.as_slice()[y * width..(y + 1) * width])
    }

    /// The pixels of row `y` for writing, or `None` if the row is out of bounds.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [P]> {
        if y >= self.height() {
            return None;
        }
        let width = self.width();
        Some(&mut self.as_slice_mut()[y * width..(y + 1) * width])
    }

    /// The pixel at column `x` and row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&P> {
        if x >= self.width() {
            return None;
        }
        self.row(y).map(|row| &row[x])
    }

    /// The pixel at column `x` and row `y`, mutable.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut P> {
        if x >= self.width() {
            return None;
        }
        self.row_mut(y).map(|row| &mut row[x])
    }

    /// Overwrite the pixel at column `x` and row `y`.
    ///
    /// # Errors
    ///
    /// If the coordinates are out of bounds, an error is returned.
    pub fn set(&mut self, x: usize, y: usize, val: P) -> Result<(), ImageError> {
        let (width, height) = (self.width(), self.height());
        let px = self
            .get_mut(x, y)
            .ok_or(ImageError::PixelIndexOutOfBounds(x, y, width, height))?;
        *px = val;
        Ok(())
    }

    /// Check that `region` lies entirely inside the image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::RegionOutOfBounds`] if any part of the region falls outside.
    pub fn check_region(&self, region: Region) -> Result<(), ImageError> {
        if !region.fits_within(self.size) {
            return Err(ImageError::RegionOutOfBounds {
                region,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl<P: Pixel, A: BufferAllocator> std::fmt::Debug for PixelBuffer<P, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("size", &self.size)
            .field("pixel", &std::any::type_name::<P>())
            .finish()
    }
}
