use pixkit_image::{BufferAllocator, Pixel, PixelBuffer, Region, Vector4};

use super::{check_sample_bits, for_each_row, gray8, gray_sample, BitReader, ByteOrder};
use crate::error::IoError;

/// Decode 1-bit samples, eight per byte, most significant bit first.
pub fn decode_1bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
) -> Result<(), IoError> {
    unpack_1bit(data, pixels, region, false)
}

/// Decode 4-bit samples, two per byte, high nibble first.
///
/// Each nibble `n` expands to the intensity `n * 17`. For odd widths the low
/// nibble of the last byte of a row is padding and is ignored.
///
/// # Example
///
/// ```
/// use pixkit_image::{pixel::L8, CpuAllocator, ImageSize, PixelBuffer, Region};
/// use pixkit_io::tiff::black_is_zero;
///
/// let size = ImageSize { width: 2, height: 1 };
/// let mut image = PixelBuffer::from_size_val(size, L8::new(0), CpuAllocator).unwrap();
/// black_is_zero::decode_4bit(&[0xa5], &mut image, Region::from_size(size)).unwrap();
/// assert_eq!(image.as_slice(), &[L8::new(170), L8::new(85)]);
/// ```
pub fn decode_4bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
) -> Result<(), IoError> {
    unpack_4bit(data, pixels, region, false)
}

/// Decode 8-bit samples.
pub fn decode_8bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
) -> Result<(), IoError> {
    unpack_8bit(data, pixels, region, false)
}

/// Decode 16-bit samples in the given byte order.
pub fn decode_16bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    byte_order: ByteOrder,
) -> Result<(), IoError> {
    unpack_16bit(data, pixels, region, byte_order, false)
}

/// Decode samples of any width from 1 to 16 bits.
pub fn decode<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    bits: u32,
) -> Result<(), IoError> {
    unpack_bits(data, pixels, region, bits, false)
}

// The unpackers below are shared with the 'WhiteIsZero' decoders, which flip
// every sample before expanding it. For a sample `v` of maximum `max`,
// `v ^ max == max - v`.

pub(super) fn unpack_1bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    invert: bool,
) -> Result<(), IoError> {
    let mask = if invert { 0xff } else { 0x00 };
    for_each_row(data, pixels, region, 1, |src, dst| {
        for (chunk, byte) in dst.chunks_mut(8).zip(src) {
            let byte = byte ^ mask;
            for (bit, px) in chunk.iter_mut().enumerate() {
                let set = (byte >> (7 - bit)) & 1 == 1;
                *px = gray8(if set { u8::MAX } else { 0 });
            }
        }
        Ok(())
    })
}

pub(super) fn unpack_4bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    invert: bool,
) -> Result<(), IoError> {
    let mask = if invert { 0x0f } else { 0x00 };
    for_each_row(data, pixels, region, 4, |src, dst| {
        for (pair, byte) in dst.chunks_mut(2).zip(src) {
            pair[0] = gray8(((byte >> 4) ^ mask) * 17);
            if let Some(px) = pair.get_mut(1) {
                *px = gray8(((byte & 0x0f) ^ mask) * 17);
            }
        }
        Ok(())
    })
}

pub(super) fn unpack_8bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    invert: bool,
) -> Result<(), IoError> {
    let mask = if invert { 0xff } else { 0x00 };
    for_each_row(data, pixels, region, 8, |src, dst| {
        dst.iter_mut()
            .zip(src)
            .for_each(|(px, &l)| *px = gray8(l ^ mask));
        Ok(())
    })
}

pub(super) fn unpack_16bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    byte_order: ByteOrder,
    invert: bool,
) -> Result<(), IoError> {
    let mask = if invert { 0xffff } else { 0x0000 };
    for_each_row(data, pixels, region, 16, |src, dst| {
        for (px, sample) in dst.iter_mut().zip(src.chunks_exact(2)) {
            let v = byte_order.read_u16([sample[0], sample[1]]) ^ mask;
            let l = v as f32 / u16::MAX as f32;
            *px = P::from_scaled_vector4(Vector4::new(l, l, l, 1.0));
        }
        Ok(())
    })
}

pub(super) fn unpack_bits<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    bits: u32,
    invert: bool,
) -> Result<(), IoError> {
    check_sample_bits(&[bits], 16)?;
    let max = ((1u32 << bits) - 1) as u16;
    let mask = if invert { max } else { 0 };
    for_each_row(data, pixels, region, bits as usize, |src, dst| {
        let mut reader = BitReader::new(src);
        for px in dst.iter_mut() {
            // the row length was validated up front
            let v = reader.read_bits(bits).unwrap_or_default();
            *px = gray_sample(v ^ mask, bits);
        }
        Ok(())
    })
}
