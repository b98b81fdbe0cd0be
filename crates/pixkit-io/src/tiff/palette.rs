use pixkit_image::{BufferAllocator, Pixel, PixelBuffer, Region, Vector4};

use super::{check_sample_bits, for_each_row, BitReader};
use crate::error::IoError;

/// Maps 1 to 8-bit indices to the colors of a TIFF color map.
///
/// The color map holds `3 * 2^bits` 16-bit values: all red values, then all
/// green values, then all blue values. Palette colors are opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteDecoder {
    bits: u32,
    palette: Vec<Vector4>,
}

impl PaletteDecoder {
    /// Build the palette from a ColorMap tag.
    ///
    /// # Errors
    ///
    /// Returns an error if `bits` is not between 1 and 8 or `color_map` does not
    /// hold exactly `3 * 2^bits` values.
    pub fn new(bits: u32, color_map: &[u16]) -> Result<Self, IoError> {
        check_sample_bits(&[bits], 8)?;
        let colors = 1usize << bits;
        if color_map.len() != 3 * colors {
            return Err(IoError::InvalidColorMap {
                expected: 3 * colors,
                actual: color_map.len(),
            });
        }

        let (reds, rest) = color_map.split_at(colors);
        let (greens, blues) = rest.split_at(colors);
        let scale = |v: u16| v as f32 / u16::MAX as f32;

        let palette = reds
            .iter()
            .zip(greens)
            .zip(blues)
            .map(|((&r, &g), &b)| Vector4::new(scale(r), scale(g), scale(b), 1.0))
            .collect();

        Ok(Self { bits, palette })
    }

    /// Bits per index.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The palette colors as scaled vectors.
    pub fn colors(&self) -> &[Vector4] {
        &self.palette
    }

    /// Decode packed indices into `region` of `pixels`.
    pub fn decode<P: Pixel, A: BufferAllocator>(
        &self,
        data: &[u8],
        pixels: &mut PixelBuffer<P, A>,
        region: Region,
    ) -> Result<(), IoError> {
        let bits = self.bits;
        for_each_row(data, pixels, region, bits as usize, |src, dst| {
            let mut reader = BitReader::new(src);
            for px in dst.iter_mut() {
                let index = reader.read_bits(bits).unwrap_or_default() as usize;
                // every index below 2^bits has an entry
                *px = P::from_scaled_vector4(self.palette[index]);
            }
            Ok(())
        })
    }
}
