use pixkit_image::{BufferAllocator, Pixel, PixelBuffer, Point, Region, Vector4};

use crate::{error::ProcessError, modifiers::ConversionModifiers, parallel};
use crate::parallel::ExecutionStrategy;

/// Options for a row operation.
///
/// The default covers the whole buffer, applies no modifiers and processes rows
/// in parallel on the global thread pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowOptions {
    /// The rectangle to process, or the whole buffer if `None`.
    pub region: Option<Region>,
    /// How pixels are presented to the operator.
    pub modifiers: ConversionModifiers,
    /// How rows are scheduled.
    pub strategy: ExecutionStrategy,
}

impl RowOptions {
    /// Restrict the operation to `region`.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the conversion modifiers.
    pub fn with_modifiers(mut self, modifiers: ConversionModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Apply a row operator to the pixels of a buffer through the canonical form.
///
/// For every row of the region the pixels are converted to [`Vector4`] as
/// selected by the modifiers, handed to `op` together with the absolute
/// position of the row's first pixel, and written back. Rows are independent
/// and may run concurrently; pixels outside the region are never written.
///
/// # Arguments
///
/// * `buffer` - The buffer to transform in place.
/// * `options` - The region, modifiers and execution strategy.
/// * `op` - The row operator.
///
/// # Errors
///
/// Fails before any pixel is written if the modifiers or the strategy are
/// invalid, or the region does not fit the buffer.
///
/// # Example
///
/// ```
/// use pixkit_image::{CpuAllocator, ImageSize, PixelBuffer, Region, Rgba32};
/// use pixkit_imgproc::{process_pixel_rows, RowOptions};
///
/// let size = ImageSize { width: 4, height: 2 };
/// let mut image = PixelBuffer::from_size_val(size, Rgba32::new(0, 0, 0, 255), CpuAllocator).unwrap();
///
/// let options = RowOptions::default().with_region(Region::new(1, 0, 2, 2));
/// process_pixel_rows(&mut image, &options, |row, start| {
///     for v in row.iter_mut() {
///         v.r = 10.0 * start.y as f32;
///     }
/// })
/// .unwrap();
///
/// assert_eq!(image.get(2, 1), Some(&Rgba32::new(10, 0, 0, 255)));
/// assert_eq!(image.get(3, 1), Some(&Rgba32::new(0, 0, 0, 255)));
/// ```
pub fn process_pixel_rows<P, A, F>(
    buffer: &mut PixelBuffer<P, A>,
    options: &RowOptions,
    op: F,
) -> Result<(), ProcessError>
where
    P: Pixel,
    A: BufferAllocator,
    F: Fn(&mut [Vector4], Point) + Send + Sync,
{
    let modifiers = options.modifiers;
    modifiers.validate()?;
    options.strategy.validate()?;

    let region = options.region.unwrap_or_else(|| buffer.bounds());
    buffer.check_region(region)?;

    log::debug!(
        "processing {region} of a {} buffer, modifiers {modifiers}, strategy {:?}",
        buffer.size(),
        options.strategy
    );

    if region.is_empty() {
        return Ok(());
    }

    let stride = buffer.width();
    let (x, width) = (region.x, region.width);

    parallel::par_iter_rows_range(
        options.strategy,
        buffer.as_slice_mut(),
        stride,
        region.y..region.bottom(),
        || Vec::with_capacity(width),
        |scratch: &mut Vec<Vector4>, y, row| {
            let pixels = &mut row[x..x + width];

            scratch.clear();
            scratch.extend(pixels.iter().map(|px| modifiers.to_operator(px)));

            op(scratch.as_mut_slice(), Point::new(x, y));

            pixels
                .iter_mut()
                .zip(scratch.iter())
                .for_each(|(px, v)| *px = modifiers.from_operator(*v));
        },
    )
}

/// Apply a per-pixel operator to a buffer through the canonical form.
///
/// # Example
///
/// ```
/// use pixkit_image::{pixel::L8, CpuAllocator, ImageSize, PixelBuffer};
/// use pixkit_imgproc::{map_pixels, ConversionModifiers, RowOptions};
///
/// let size = ImageSize { width: 3, height: 1 };
/// let mut image = PixelBuffer::from_size_val(size, L8::new(51), CpuAllocator).unwrap();
///
/// let options = RowOptions::default().with_modifiers(ConversionModifiers::SCALE);
/// map_pixels(&mut image, &options, |v| v.map_rgb(|c| 1.0 - c)).unwrap();
///
/// assert_eq!(image.as_slice(), &[L8::new(204); 3]);
/// ```
pub fn map_pixels<P, A, F>(
    buffer: &mut PixelBuffer<P, A>,
    options: &RowOptions,
    op: F,
) -> Result<(), ProcessError>
where
    P: Pixel,
    A: BufferAllocator,
    F: Fn(Vector4) -> Vector4 + Send + Sync,
{
    process_pixel_rows(buffer, options, |row, _| {
        row.iter_mut().for_each(|v| *v = op(*v));
    })
}

/// Apply a per-pixel operator that also receives each pixel's absolute position.
pub fn map_pixels_with_position<P, A, F>(
    buffer: &mut PixelBuffer<P, A>,
    options: &RowOptions,
    op: F,
) -> Result<(), ProcessError>
where
    P: Pixel,
    A: BufferAllocator,
    F: Fn(Vector4, Point) -> Vector4 + Send + Sync,
{
    process_pixel_rows(buffer, options, |row, start| {
        row.iter_mut()
            .enumerate()
            .for_each(|(i, v)| *v = op(*v, Point::new(start.x + i, start.y)));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_image::{
        pixel::{Bgra32, Rgb48},
        CpuAllocator, ImageSize, Rgba32,
    };
    use rand::Rng;

    fn random_image(width: usize, height: usize) -> Result<PixelBuffer<Rgba32>, ProcessError> {
        let mut rng = rand::rng();
        let data = (0..width * height)
            .map(|_| {
                let [r, g, b, a]: [u8; 4] = rng.random();
                Rgba32::new(r, g, b, a)
            })
            .collect();
        Ok(PixelBuffer::new(
            ImageSize { width, height },
            data,
            CpuAllocator,
        )?)
    }

    #[test]
    fn noop_is_identity() -> Result<(), ProcessError> {
        let mut image = random_image(17, 9)?;
        let expected = image.to_vec();

        for modifiers in [
            ConversionModifiers::NONE,
            ConversionModifiers::SCALE,
            ConversionModifiers::PREMULTIPLY,
            ConversionModifiers::SCALE | ConversionModifiers::PREMULTIPLY,
            ConversionModifiers::SCALE | ConversionModifiers::COMPAND,
        ] {
            let options = RowOptions::default().with_modifiers(modifiers);
            process_pixel_rows(&mut image, &options, |_, _| {})?;
            assert_eq!(image.as_slice(), expected.as_slice(), "{modifiers}");
        }
        Ok(())
    }

    #[test]
    fn premultiply_identity_keeps_transparent_pixels() -> Result<(), ProcessError> {
        let data = vec![
            Rgba32::new(200, 100, 50, 0),
            Rgba32::new(255, 255, 255, 0),
            Rgba32::new(10, 20, 30, 128),
            Rgba32::new(1, 2, 3, 255),
        ];
        let mut image = PixelBuffer::new([2, 2].into(), data.clone(), CpuAllocator)?;
        let options = RowOptions::default().with_modifiers(ConversionModifiers::PREMULTIPLY);
        map_pixels(&mut image, &options, |v| v)?;
        assert_eq!(image.to_vec(), data);
        Ok(())
    }

    #[test]
    fn operator_sees_premultiplied_values() -> Result<(), ProcessError> {
        let mut image = PixelBuffer::new(
            [1, 1].into(),
            vec![Rgba32::new(255, 0, 0, 51)],
            CpuAllocator,
        )?;
        let options = RowOptions::default()
            .with_modifiers(ConversionModifiers::PREMULTIPLY | ConversionModifiers::SCALE);
        map_pixels(&mut image, &options, |v| {
            approx::assert_relative_eq!(v.r, 0.2, epsilon = 1e-6);
            approx::assert_relative_eq!(v.a, 0.2, epsilon = 1e-6);
            v
        })?;
        assert_eq!(image.as_slice(), &[Rgba32::new(255, 0, 0, 51)]);
        Ok(())
    }

    #[test]
    fn region_is_respected() -> Result<(), ProcessError> {
        let mut image = PixelBuffer::from_size_val(
            ImageSize {
                width: 5,
                height: 4,
            },
            Bgra32::new(0, 0, 0, 255),
            CpuAllocator,
        )?;
        let region = Region::new(1, 1, 3, 2);
        let options = RowOptions::default().with_region(region);
        map_pixels(&mut image, &options, |v| Vector4::new(255.0, v.g, v.b, v.a))?;

        for y in 0..4 {
            for x in 0..5 {
                let expected = if region.contains(x, y) { 255 } else { 0 };
                assert_eq!(image.get(x, y).map(|px| px.r), Some(expected), "({x}, {y})");
            }
        }
        Ok(())
    }

    #[test]
    fn region_out_of_bounds_writes_nothing() -> Result<(), ProcessError> {
        let mut image = random_image(4, 4)?;
        let expected = image.to_vec();
        let options = RowOptions::default().with_region(Region::new(2, 2, 3, 1));
        let res = map_pixels(&mut image, &options, |_| Vector4::ZERO);
        assert!(matches!(res, Err(ProcessError::ImageError(_))));
        assert_eq!(image.to_vec(), expected);
        Ok(())
    }

    #[test]
    fn invalid_options_write_nothing() -> Result<(), ProcessError> {
        let mut image = random_image(3, 3)?;
        let expected = image.to_vec();

        let options = RowOptions::default().with_modifiers(ConversionModifiers::COMPAND);
        let res = map_pixels(&mut image, &options, |_| Vector4::ZERO);
        assert_eq!(res, Err(ProcessError::InvalidModifiers(0b100)));

        let options = RowOptions::default().with_strategy(ExecutionStrategy::Fixed(0));
        let res = map_pixels(&mut image, &options, |_| Vector4::ZERO);
        assert_eq!(res, Err(ProcessError::InvalidThreadCount(0)));

        assert_eq!(image.to_vec(), expected);
        Ok(())
    }

    #[test]
    fn row_start_positions() -> Result<(), ProcessError> {
        let mut image = PixelBuffer::from_size_val(
            ImageSize {
                width: 6,
                height: 5,
            },
            Rgb48::default(),
            CpuAllocator,
        )?;
        let options = RowOptions::default().with_region(Region::new(2, 1, 3, 3));
        process_pixel_rows(&mut image, &options, |row, start| {
            assert_eq!(start.x, 2);
            assert!((1..4).contains(&start.y));
            row.iter_mut().for_each(|v| v.r = start.y as f32);
        })?;
        assert_eq!(image.get(3, 2).map(|px| px.r), Some(2));
        assert_eq!(image.get(1, 2).map(|px| px.r), Some(0));
        Ok(())
    }

    #[test]
    fn pixel_positions_are_absolute() -> Result<(), ProcessError> {
        let mut image = PixelBuffer::from_size_val(
            ImageSize {
                width: 8,
                height: 6,
            },
            Rgba32::default(),
            CpuAllocator,
        )?;
        let options = RowOptions::default()
            .with_region(Region::new(3, 2, 4, 3))
            .with_strategy(ExecutionStrategy::Serial);
        map_pixels_with_position(&mut image, &options, |v, p| {
            Vector4::new(p.x as f32, p.y as f32, v.b, 255.0)
        })?;

        assert_eq!(image.get(3, 2), Some(&Rgba32::new(3, 2, 0, 255)));
        assert_eq!(image.get(6, 4), Some(&Rgba32::new(6, 4, 0, 255)));
        assert_eq!(image.get(2, 2), Some(&Rgba32::default()));
        assert_eq!(image.get(7, 4), Some(&Rgba32::default()));
        assert_eq!(image.get(3, 5), Some(&Rgba32::default()));
        Ok(())
    }

    #[test]
    fn strategies_agree() -> Result<(), ProcessError> {
        let source = random_image(31, 17)?;
        let op = |v: Vector4, p: Point| {
            let shift = (p.x * 7 + p.y * 3) as f32;
            Vector4::new((v.r + shift) % 256.0, v.b, v.g, 255.0 - v.a)
        };

        let mut results = Vec::new();
        for strategy in [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelRows,
            ExecutionStrategy::Fixed(3),
        ] {
            let mut image = source.try_clone()?;
            let options = RowOptions::default()
                .with_region(Region::new(2, 3, 25, 10))
                .with_strategy(strategy);
            map_pixels_with_position(&mut image, &options, op)?;
            results.push(image.to_vec());
        }

        assert_eq!(results[0], results[1]);
        assert_eq!(results[0], results[2]);
        Ok(())
    }

    #[test]
    fn empty_region_is_a_noop() -> Result<(), ProcessError> {
        let mut image = random_image(3, 3)?;
        let expected = image.to_vec();
        let options = RowOptions::default().with_region(Region::new(3, 0, 0, 3));
        map_pixels(&mut image, &options, |_| Vector4::ZERO)?;
        assert_eq!(image.to_vec(), expected);
        Ok(())
    }
}
