use pixkit_image::{BufferAllocator, Pixel, PixelBuffer};

use crate::{
    error::ProcessError,
    parallel::{self, ExecutionStrategy},
};

/// Convert every pixel of `src` into the pixel type of `dst`.
///
/// Conversions between types with at most 8 bits per channel go through the
/// exact byte path; wider types go through the scaled vector.
///
/// # Errors
///
/// Returns an error if the buffers differ in size or the strategy is invalid.
///
/// # Example
///
/// ```
/// use pixkit_image::{pixel::{Bgra32, L8}, CpuAllocator, ImageSize, PixelBuffer};
/// use pixkit_imgproc::{convert_pixels, ExecutionStrategy};
///
/// let size = ImageSize { width: 2, height: 1 };
/// let src = PixelBuffer::from_size_val(size, L8::new(17), CpuAllocator).unwrap();
/// let mut dst = PixelBuffer::from_size_val(size, Bgra32::default(), CpuAllocator).unwrap();
///
/// convert_pixels(&src, &mut dst, ExecutionStrategy::default()).unwrap();
/// assert_eq!(dst.as_slice(), &[Bgra32::new(17, 17, 17, 255); 2]);
/// ```
pub fn convert_pixels<S, D, A1, A2>(
    src: &PixelBuffer<S, A1>,
    dst: &mut PixelBuffer<D, A2>,
    strategy: ExecutionStrategy,
) -> Result<(), ProcessError>
where
    S: Pixel,
    D: Pixel,
    A1: BufferAllocator,
    A2: BufferAllocator,
{
    if src.size() != dst.size() {
        return Err(ProcessError::SizeMismatch(src.size(), dst.size()));
    }

    let byte_path = S::BITS_PER_CHANNEL <= 8 && D::BITS_PER_CHANNEL <= 8;
    let cols = src.cols();

    parallel::par_iter_rows(
        strategy,
        src.as_slice(),
        cols,
        dst.as_slice_mut(),
        cols,
        |src_row, dst_row| {
            let pairs = src_row.iter().zip(dst_row.iter_mut());
            if byte_path {
                pairs.for_each(|(s, d)| *d = D::from_rgba32(s.to_rgba32()));
            } else {
                pairs.for_each(|(s, d)| *d = D::from_scaled_vector4(s.to_scaled_vector4()));
            }
        },
    )
}
