use pixkit_image::{BufferAllocator, Pixel, PixelBuffer, Region};

use super::black_is_zero::{unpack_16bit, unpack_1bit, unpack_4bit, unpack_8bit, unpack_bits};
use super::ByteOrder;
use crate::error::IoError;

/// Decode 1-bit samples where a set bit is black.
pub fn decode_1bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
) -> Result<(), IoError> {
    unpack_1bit(data, pixels, region, true)
}

/// Decode 4-bit samples where `0xf` is black.
pub fn decode_4bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
) -> Result<(), IoError> {
    unpack_4bit(data, pixels, region, true)
}

/// Decode 8-bit samples where `0xff` is black.
pub fn decode_8bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
) -> Result<(), IoError> {
    unpack_8bit(data, pixels, region, true)
}

/// Decode 16-bit samples where `0xffff` is black.
pub fn decode_16bit<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    byte_order: ByteOrder,
) -> Result<(), IoError> {
    unpack_16bit(data, pixels, region, byte_order, true)
}

/// Decode inverted samples of any width from 1 to 16 bits.
pub fn decode<P: Pixel, A: BufferAllocator>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    bits: u32,
) -> Result<(), IoError> {
    unpack_bits(data, pixels, region, bits, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_image::{
        pixel::{L16, L8},
        CpuAllocator, ImageSize,
    };

    fn gray_image(width: usize, height: usize) -> Result<PixelBuffer<L8>, IoError> {
        Ok(PixelBuffer::from_size_val(
            ImageSize { width, height },
            L8::new(7),
            CpuAllocator,
        )?)
    }

    fn levels(image: &PixelBuffer<L8>) -> Vec<u8> {
        image.as_slice().iter().map(|px| px.l).collect()
    }

    #[test]
    fn decode_inverted_levels() -> Result<(), IoError> {
        let mut image = gray_image(3, 1)?;
        let bounds = image.bounds();

        decode_4bit(&[0xa5, 0xf0], &mut image, bounds)?;
        assert_eq!(levels(&image), vec![85, 170, 0]);

        decode_8bit(&[0, 1, 255], &mut image, bounds)?;
        assert_eq!(levels(&image), vec![255, 254, 0]);

        decode_1bit(&[0b0100_0000], &mut image, bounds)?;
        assert_eq!(levels(&image), vec![255, 0, 255]);

        decode(&[0b0001_1000], &mut image, bounds, 2)?;
        assert_eq!(levels(&image), vec![255, 170, 85]);
        Ok(())
    }

    #[test]
    fn decode_inverted_16bit() -> Result<(), IoError> {
        let mut image = PixelBuffer::from_size_val(
            ImageSize {
                width: 2,
                height: 1,
            },
            L16::default(),
            CpuAllocator,
        )?;
        let bounds = image.bounds();
        decode_16bit(&[0x00, 0x00, 0x00, 0x01], &mut image, bounds, ByteOrder::BigEndian)?;
        assert_eq!(image.as_slice(), &[L16::new(0xffff), L16::new(0xfffe)]);
        Ok(())
    }

    #[test]
    fn decode_inverted_insufficient_data() -> Result<(), IoError> {
        let mut image = gray_image(3, 2)?;
        let bounds = image.bounds();
        let res = decode_4bit(&[0x00, 0x00, 0x00], &mut image, bounds);
        assert_eq!(
            res,
            Err(IoError::InsufficientData {
                expected: 4,
                actual: 3,
                region: bounds,
            })
        );
        Ok(())
    }
}
