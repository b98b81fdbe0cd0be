//! TIFF photometric interpretation decoders.
//!
//! Each decoder consumes the packed sample bytes of one image block (strip or
//! tile) and writes one pixel per sample into a region of a [`PixelBuffer`].
//! Rows are padded to a whole byte: a row never shares a byte with the next one.
//!
//! Parsing the IFD and decompressing strips is the caller's job; the decoders
//! only see the uncompressed sample bytes.

use pixkit_image::{BufferAllocator, Pixel, PixelBuffer, Region, Rgba32, Vector4};
use tiff::tags::PhotometricInterpretation;

use crate::error::IoError;

mod bit_reader;

/// 'BlackIsZero' grayscale decoders.
pub mod black_is_zero;

/// 'RGBPalette' color map decoder.
pub mod palette;

/// Interleaved 'RGB' decoders.
pub mod rgb;

/// 'WhiteIsZero' grayscale decoders.
pub mod white_is_zero;

pub use bit_reader::BitReader;
pub use palette::PaletteDecoder;

/// Byte order of multi-byte samples, taken from the TIFF header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first ("MM").
    BigEndian,
    /// Least significant byte first ("II").
    #[default]
    LittleEndian,
}

impl ByteOrder {
    /// Read a 16-bit sample.
    #[inline]
    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
        }
    }
}

/// Number of bytes a row of `width` samples occupies at `bits_per_pixel`.
#[inline]
pub fn bytes_per_row(width: usize, bits_per_pixel: usize) -> usize {
    width.saturating_mul(bits_per_pixel).div_ceil(8)
}

/// Number of bytes needed to decode `region` at `bits_per_pixel`.
#[inline]
pub fn required_len(region: Region, bits_per_pixel: usize) -> usize {
    bytes_per_row(region.width, bits_per_pixel).saturating_mul(region.height)
}

/// Validate the input and call `f` once per region row with the row's packed
/// bytes and the region's slice of the matching buffer row.
///
/// Nothing is written unless the region fits the buffer and `data` holds enough
/// bytes for every row.
pub(crate) fn for_each_row<P, A, F>(
    data: &[u8],
    pixels: &mut PixelBuffer<P, A>,
    region: Region,
    bits_per_pixel: usize,
    mut f: F,
) -> Result<(), IoError>
where
    P: Pixel,
    A: BufferAllocator,
    F: FnMut(&[u8], &mut [P]) -> Result<(), IoError>,
{
    pixels.check_region(region)?;

    let expected = required_len(region, bits_per_pixel);
    if data.len() < expected {
        return Err(IoError::InsufficientData {
            expected,
            actual: data.len(),
            region,
        });
    }

    if region.is_empty() {
        return Ok(());
    }

    log::trace!("decoding {region} at {bits_per_pixel} bits per pixel");

    let stride = bytes_per_row(region.width, bits_per_pixel);
    let width = pixels.width();
    let rows = pixels
        .as_slice_mut()
        .chunks_exact_mut(width)
        .skip(region.y)
        .take(region.height);

    for (src, dst) in data.chunks_exact(stride).zip(rows) {
        f(src, &mut dst[region.x..region.right()])?;
    }

    Ok(())
}

/// Reject sample widths outside 1 to `max` bits.
pub(crate) fn check_sample_bits(bits: &[u32], max: u32) -> Result<(), IoError> {
    if bits.iter().any(|b| !(1..=max).contains(b)) {
        return Err(IoError::UnsupportedBitsPerSample(
            bits.iter().map(|&b| b as u16).collect(),
        ));
    }
    Ok(())
}

/// A gray pixel of 8-bit intensity `l`, fully opaque.
#[inline]
pub(crate) fn gray8<P: Pixel>(l: u8) -> P {
    P::from_rgba32(Rgba32::new(l, l, l, u8::MAX))
}

/// A gray pixel from a `bits` wide intensity sample, fully opaque.
///
/// Samples of up to 8 bits are expanded exactly to 8 bits; wider samples keep
/// their precision through the scaled vector.
#[inline]
pub(crate) fn gray_sample<P: Pixel>(value: u16, bits: u32) -> P {
    let max = (1u32 << bits) - 1;
    if bits <= 8 {
        gray8(((value as u32 * 255 + max / 2) / max) as u8)
    } else {
        let l = value as f32 / max as f32;
        P::from_scaled_vector4(Vector4::new(l, l, l, 1.0))
    }
}

/// One decoder per bit depth and photometric interpretation.
///
/// The specialised variants (1, 4, 8 and 16 bits) unpack whole bytes at a
/// time; the generic variants read samples of any width through a [`BitReader`].
#[derive(Clone, Debug, PartialEq)]
pub enum PhotometricDecoder {
    /// 1-bit bilevel, a set bit is white.
    BlackIsZero1,
    /// 4-bit grayscale, two samples per byte.
    BlackIsZero4,
    /// 8-bit grayscale.
    BlackIsZero8,
    /// 16-bit grayscale.
    BlackIsZero16(ByteOrder),
    /// Grayscale of any width from 1 to 16 bits.
    BlackIsZero {
        /// Bits per sample.
        bits: u32,
    },
    /// 1-bit bilevel, a set bit is black.
    WhiteIsZero1,
    /// 4-bit inverted grayscale.
    WhiteIsZero4,
    /// 8-bit inverted grayscale.
    WhiteIsZero8,
    /// 16-bit inverted grayscale.
    WhiteIsZero16(ByteOrder),
    /// Inverted grayscale of any width from 1 to 16 bits.
    WhiteIsZero {
        /// Bits per sample.
        bits: u32,
    },
    /// Indices into a color map.
    Palette(PaletteDecoder),
    /// Interleaved 8-bit RGB.
    Rgb888,
    /// Interleaved 16-bit RGB.
    Rgb161616(ByteOrder),
    /// Interleaved RGB with per-channel widths from 1 to 16 bits.
    Rgb {
        /// Bits of the red sample.
        r: u32,
        /// Bits of the green sample.
        g: u32,
        /// Bits of the blue sample.
        b: u32,
    },
}

impl PhotometricDecoder {
    /// Select the decoder for the given TIFF tag values.
    ///
    /// # Arguments
    ///
    /// * `photometric` - The PhotometricInterpretation tag value.
    /// * `bits_per_sample` - The BitsPerSample tag values, one per sample.
    /// * `color_map` - The ColorMap tag values, required for palette images.
    /// * `byte_order` - The byte order of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if no decoder handles the combination.
    ///
    /// # Example
    ///
    /// ```
    /// use pixkit_io::tiff::{ByteOrder, PhotometricDecoder};
    ///
    /// let decoder = PhotometricDecoder::from_tags(1, &[4], None, ByteOrder::LittleEndian).unwrap();
    /// assert_eq!(decoder, PhotometricDecoder::BlackIsZero4);
    /// ```
    pub fn from_tags(
        photometric: u16,
        bits_per_sample: &[u16],
        color_map: Option<&[u16]>,
        byte_order: ByteOrder,
    ) -> Result<Self, IoError> {
        let unsupported_bits = || IoError::UnsupportedBitsPerSample(bits_per_sample.to_vec());
        let valid_width = |bits: u16| (1..=16).contains(&bits);

        let decoder = match PhotometricInterpretation::from_u16(photometric) {
            Some(PhotometricInterpretation::BlackIsZero) => match bits_per_sample {
                [1] => Self::BlackIsZero1,
                [4] => Self::BlackIsZero4,
                [8] => Self::BlackIsZero8,
                [16] => Self::BlackIsZero16(byte_order),
                [bits] if valid_width(*bits) => Self::BlackIsZero { bits: *bits as u32 },
                _ => return Err(unsupported_bits()),
            },
            Some(PhotometricInterpretation::WhiteIsZero) => match bits_per_sample {
                [1] => Self::WhiteIsZero1,
                [4] => Self::WhiteIsZero4,
                [8] => Self::WhiteIsZero8,
                [16] => Self::WhiteIsZero16(byte_order),
                [bits] if valid_width(*bits) => Self::WhiteIsZero { bits: *bits as u32 },
                _ => return Err(unsupported_bits()),
            },
            Some(PhotometricInterpretation::RGBPalette) => match bits_per_sample {
                [bits] if (1..=8).contains(bits) => {
                    let color_map = color_map.ok_or(IoError::MissingColorMap)?;
                    Self::Palette(PaletteDecoder::new(*bits as u32, color_map)?)
                }
                _ => return Err(unsupported_bits()),
            },
            Some(PhotometricInterpretation::RGB) => match bits_per_sample {
                [8, 8, 8] => Self::Rgb888,
                [16, 16, 16] => Self::Rgb161616(byte_order),
                [r, g, b] if valid_width(*r) && valid_width(*g) && valid_width(*b) => Self::Rgb {
                    r: *r as u32,
                    g: *g as u32,
                    b: *b as u32,
                },
                _ => return Err(unsupported_bits()),
            },
            _ => return Err(IoError::UnsupportedPhotometric(photometric)),
        };

        log::debug!(
            "photometric {photometric} with bits {bits_per_sample:?} decodes as {}",
            decoder.name()
        );

        Ok(decoder)
    }

    /// Short name of the decoder, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BlackIsZero1 => "BlackIsZero1",
            Self::BlackIsZero4 => "BlackIsZero4",
            Self::BlackIsZero8 => "BlackIsZero8",
            Self::BlackIsZero16(_) => "BlackIsZero16",
            Self::BlackIsZero { .. } => "BlackIsZero",
            Self::WhiteIsZero1 => "WhiteIsZero1",
            Self::WhiteIsZero4 => "WhiteIsZero4",
            Self::WhiteIsZero8 => "WhiteIsZero8",
            Self::WhiteIsZero16(_) => "WhiteIsZero16",
            Self::WhiteIsZero { .. } => "WhiteIsZero",
            Self::Palette(_) => "Palette",
            Self::Rgb888 => "Rgb888",
            Self::Rgb161616(_) => "Rgb161616",
            Self::Rgb { .. } => "Rgb",
        }
    }

    /// Number of packed bits one pixel occupies in the input stream.
    pub fn bits_per_pixel(&self) -> usize {
        match self {
            Self::BlackIsZero1 | Self::WhiteIsZero1 => 1,
            Self::BlackIsZero4 | Self::WhiteIsZero4 => 4,
            Self::BlackIsZero8 | Self::WhiteIsZero8 => 8,
            Self::BlackIsZero16(_) | Self::WhiteIsZero16(_) => 16,
            Self::BlackIsZero { bits } | Self::WhiteIsZero { bits } => *bits as usize,
            Self::Palette(palette) => palette.bits() as usize,
            Self::Rgb888 => 24,
            Self::Rgb161616(_) => 48,
            Self::Rgb { r, g, b } => (r + g + b) as usize,
        }
    }

    /// Number of input bytes needed to decode `region`.
    pub fn required_len(&self, region: Region) -> usize {
        required_len(region, self.bits_per_pixel())
    }

    /// Decode the packed samples of `data` into `region` of `pixels`.
    ///
    /// # Arguments
    ///
    /// * `data` - The packed sample bytes, at least [`Self::required_len`] long.
    /// * `pixels` - The buffer to write pixels to.
    /// * `region` - The block of the buffer the samples cover.
    ///
    /// # Errors
    ///
    /// Fails without writing any pixel if the region does not fit the buffer or
    /// `data` is too short.
    pub fn decode<P: Pixel, A: BufferAllocator>(
        &self,
        data: &[u8],
        pixels: &mut PixelBuffer<P, A>,
        region: Region,
    ) -> Result<(), IoError> {
        match self {
            Self::BlackIsZero1 => black_is_zero::decode_1bit(data, pixels, region),
            Self::BlackIsZero4 => black_is_zero::decode_4bit(data, pixels, region),
            Self::BlackIsZero8 => black_is_zero::decode_8bit(data, pixels, region),
            Self::BlackIsZero16(order) => {
                black_is_zero::decode_16bit(data, pixels, region, *order)
            }
            Self::BlackIsZero { bits } => black_is_zero::decode(data, pixels, region, *bits),
            Self::WhiteIsZero1 => white_is_zero::decode_1bit(data, pixels, region),
            Self::WhiteIsZero4 => white_is_zero::decode_4bit(data, pixels, region),
            Self::WhiteIsZero8 => white_is_zero::decode_8bit(data, pixels, region),
            Self::WhiteIsZero16(order) => {
                white_is_zero::decode_16bit(data, pixels, region, *order)
            }
            Self::WhiteIsZero { bits } => white_is_zero::decode(data, pixels, region, *bits),
            Self::Palette(palette) => palette.decode(data, pixels, region),
            Self::Rgb888 => rgb::decode_888(data, pixels, region),
            Self::Rgb161616(order) => rgb::decode_161616(data, pixels, region, *order),
            Self::Rgb { r, g, b } => rgb::decode(data, pixels, region, [*r, *g, *b]),
        }
    }
}
