use pixkit_image::{BufferAllocator, Pixel, PixelBuffer, Region, Rgba32, Vector4};

use super::{check_sample_bits, for_each_row, BitReader, ByteOrder};
use crate::error::IoError;

/// Decode interleaved 8-bit RGB samples.
pub fn decode_888<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
) -> Result<(), IoError> {
    for_each_row(data, pixels, region, 24, |src, dst| {
        for (px, rgb) in dst.iter_mut().zip(src.chunks_exact(3)) {
            *px = P::from_rgba32(Rgba32::new(rgb[0], rgb[1], rgb[2], u8::MAX));
        }
        Ok(())
    })
}

/// Decode interleaved 16-bit RGB samples in the given byte order.
pub fn decode_161616<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    byte_order: ByteOrder,
) -> Result<(), IoError> {
    let scale = |hi: u8, lo: u8| byte_order.read_u16([hi, lo]) as f32 / u16::MAX as f32;
    for_each_row(data, pixels, region, 48, |src, dst| {
        for (px, rgb) in dst.iter_mut().zip(src.chunks_exact(6)) {
            *px = P::from_scaled_vector4(Vector4::new(
                scale(rgb[0], rgb[1]),
                scale(rgb[2], rgb[3]),
                scale(rgb[4], rgb[5]),
                1.0,
            ));
        }
        Ok(())
    })
}

/// Decode interleaved RGB samples with per-channel widths of 1 to 16 bits.
///
/// Samples are packed without padding between pixels; only rows are aligned.
pub fn decode<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    bits: [u32; 3],
) -> Result<(), IoError> {
    check_sample_bits(&bits, 16)?;
    let max = bits.map(|b| ((1u32 << b) - 1) as f32);
    let bits_per_pixel = bits.iter().sum::<u32>() as usize;
    for_each_row(data, pixels, region, bits_per_pixel, |src, dst| {
        let mut reader = BitReader::new(src);
        for px in dst.iter_mut() {
            let [r, g, b] = [0, 1, 2].map(|c| {
                reader.read_bits(bits[c]).unwrap_or_default() as f32 / max[c]
            });
            *px = P::from_scaled_vector4(Vector4::new(r, g, b, 1.0));
        }
        Ok(())
    })
}
