//! Pixel formats and the canonical channel vector they convert through.
//!
//! Every concrete pixel type implements [`Pixel`], which maps the native bit
//! layout to and from a four channel [`Vector4`]. All cross-format logic (decoders,
//! row processing) only ever talks to that vector, so a new format only has to
//! provide the two conversions.

use std::ops;

use num_traits::{Bounded, NumCast, ToPrimitive};

mod float;
mod gray;
mod packed;
mod rgba;
mod rgba16;

pub use float::RgbaF32;
pub use gray::{La16, La32, L16, L8};
pub use packed::{Bgr565, Bgra4444, Bgra5551};
pub use rgba::{Argb32, Bgr24, Bgra32, Rgb24, Rgba32, Rgba32Premultiplied};
pub use rgba16::{Rgb48, Rgba64};

/// The canonical four channel color value: red, green, blue and alpha.
///
/// Depending on the conversion used, the channels either live in the `[0, 1]`
/// range (scaled) or in the native range of the pixel type they came from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector4 {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Vector4 {
    /// Fully transparent black.
    pub const ZERO: Vector4 = Vector4::new(0.0, 0.0, 0.0, 0.0);

    /// Fully opaque white in the scaled range.
    pub const ONE: Vector4 = Vector4::new(1.0, 1.0, 1.0, 1.0);

    /// Create a new vector from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a vector with all four channels set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Returns the channels as an array in RGBA order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clamp every channel to `[0, 1]`. NaN channels become zero.
    pub fn clamp01(self) -> Self {
        Self::new(
            clamp_unit(self.r),
            clamp_unit(self.g),
            clamp_unit(self.b),
            clamp_unit(self.a),
        )
    }

    /// Apply `f` to the color channels, leaving alpha untouched.
    pub fn map_rgb(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Vector4> for [f32; 4] {
    fn from(v: Vector4) -> Self {
        v.to_array()
    }
}

impl ops::Add for Vector4 {
    type Output = Vector4;

    fn add(self, rhs: Vector4) -> Vector4 {
        Vector4::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl ops::Sub for Vector4 {
    type Output = Vector4;

    fn sub(self, rhs: Vector4) -> Vector4 {
        Vector4::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl ops::Mul<f32> for Vector4 {
    type Output = Vector4;

    fn mul(self, rhs: f32) -> Vector4 {
        Vector4::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl ops::Div<f32> for Vector4 {
    type Output = Vector4;

    fn div(self, rhs: f32) -> Vector4 {
        Vector4::new(self.r / rhs, self.g / rhs, self.b / rhs, self.a / rhs)
    }
}

/// The pixel format capability.
///
/// Converts between a type's native bit layout and the canonical [`Vector4`].
/// The conversions into the native type are total: out of range and NaN
/// channels are clamped, never rejected.
///
/// Implementations must satisfy the round-trip law: for every value `v` the
/// format can represent, `P::from_scaled_vector4(v.to_scaled_vector4()) == v`.
///
/// Send and Sync are required to process rows of a buffer in parallel.
pub trait Pixel: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Upper bound of every channel in the unscaled vector range.
    const VECTOR_MAX: f32;

    /// Whether the format stores an alpha channel.
    const HAS_ALPHA: bool;

    /// Bits stored by the widest channel.
    ///
    /// Formats with 8 or fewer convert losslessly through [`Rgba32`].
    const BITS_PER_CHANNEL: u32;

    /// Build a pixel from a vector whose channels are in `[0, 1]`.
    fn from_scaled_vector4(v: Vector4) -> Self;

    /// Expand the pixel into a vector whose channels are in `[0, 1]`.
    fn to_scaled_vector4(&self) -> Vector4;

    /// Build a pixel from a vector in the unscaled `[0, VECTOR_MAX]` range.
    fn from_vector4(v: Vector4) -> Self {
        Self::from_scaled_vector4(v / Self::VECTOR_MAX)
    }

    /// Expand the pixel into a vector in the unscaled `[0, VECTOR_MAX]` range.
    fn to_vector4(&self) -> Vector4 {
        self.to_scaled_vector4() * Self::VECTOR_MAX
    }

    /// Build a pixel from 8-bit channels.
    fn from_rgba32(c: Rgba32) -> Self {
        Self::from_scaled_vector4(c.to_scaled_vector4())
    }

    /// Reduce the pixel to 8-bit channels.
    fn to_rgba32(&self) -> Rgba32 {
        Rgba32::from_scaled_vector4(self.to_scaled_vector4())
    }
}

/// Clamp to `[0, 1]`, mapping NaN to zero.
#[inline]
pub(crate) fn clamp_unit(v: f32) -> f32 {
    // f32::max ignores a NaN operand
    v.max(0.0).min(1.0)
}

/// Quantize a scaled channel to an unsigned normalized integer, rounding to nearest.
#[inline]
pub(crate) fn to_unorm<T>(v: f32) -> T
where
    T: Bounded + NumCast + ToPrimitive,
{
    let max = T::max_value().to_f32().unwrap_or(1.0);
    NumCast::from((clamp_unit(v) * max).round()).unwrap_or_else(T::min_value)
}

/// Expand an unsigned normalized integer to a scaled channel.
#[inline]
pub(crate) fn from_unorm<T>(x: T) -> f32
where
    T: Bounded + ToPrimitive,
{
    let max = T::max_value().to_f32().unwrap_or(1.0);
    x.to_f32().unwrap_or(0.0) / max
}

/// Quantize a scaled channel to an unsigned integer of `bits` width.
#[inline]
pub(crate) fn to_unorm_bits(v: f32, bits: u32) -> u16 {
    let max = ((1u32 << bits) - 1) as f32;
    (clamp_unit(v) * max).round() as u16
}

/// Expand an unsigned integer of `bits` width to a scaled channel.
#[inline]
pub(crate) fn from_unorm_bits(x: u16, bits: u32) -> f32 {
    let max = ((1u32 << bits) - 1) as f32;
    x as f32 / max
}

/// Replicate an 8-bit value to 16 bits so that 0xff maps to 0xffff.
#[inline]
pub(crate) fn upscale_8_to_16(x: u8) -> u16 {
    (x as u16) * 257
}

/// Reduce a 16-bit value to 8 bits, rounding to nearest.
#[inline]
pub(crate) fn downscale_16_to_8(x: u16) -> u8 {
    ((x as u32 * 255 + 32895) >> 16) as u8
}

// BT.709 luma weights
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// BT.709 luminance of a scaled vector.
#[inline]
pub(crate) fn luminance(v: Vector4) -> f32 {
    LUMA_R * v.r + LUMA_G * v.g + LUMA_B * v.b
}

/// BT.709 luminance of 8-bit channels using integer arithmetic.
#[inline]
pub(crate) fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 2126 + g as u32 * 7152 + b as u32 * 722 + 5000) / 10000) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn assert_round_trip<P: Pixel>(v: P) {
        let back = P::from_scaled_vector4(v.to_scaled_vector4());
        assert_eq!(back, v, "scaled round trip failed for {v:?}");
        let back = P::from_vector4(v.to_vector4());
        assert_eq!(back, v, "unscaled round trip failed for {v:?}");
    }

    #[test]
    fn unorm_quantization() {
        assert_eq!(to_unorm::<u8>(1.0), 255);
        assert_eq!(to_unorm::<u8>(0.0), 0);
        assert_eq!(to_unorm::<u8>(2.0), 255);
        assert_eq!(to_unorm::<u8>(-1.0), 0);
        assert_eq!(to_unorm::<u8>(f32::NAN), 0);
        assert_eq!(to_unorm::<u16>(1.0), 65535);
        assert_eq!(to_unorm_bits(1.0, 5), 31);
        assert_eq!(to_unorm_bits(0.5, 4), 8);
    }

    #[test]
    fn eight_to_sixteen_bits() {
        for x in 0..=255u8 {
            assert_eq!(downscale_16_to_8(upscale_8_to_16(x)), x);
        }
        assert_eq!(upscale_8_to_16(255), 65535);
    }

    #[test]
    fn luminance_weights() {
        approx::assert_relative_eq!(luminance(Vector4::ONE), 1.0, epsilon = 1e-6);
        approx::assert_relative_eq!(luminance(Vector4::new(1.0, 0.0, 0.0, 1.0)), 0.2126);
        approx::assert_relative_eq!(luminance(Vector4::new(0.0, 1.0, 0.0, 1.0)), 0.7152);
    }

    #[test]
    fn luminance_of_gray_is_identity() {
        for x in 0..=255u8 {
            assert_eq!(luminance_u8(x, x, x), x);
        }
    }

    #[test]
    fn round_trip_sampled() {
        let mut rng = rand::rng();
        for _ in 0..2048 {
            let [r, g, b, a]: [u8; 4] = rng.random();
            assert_round_trip(Rgba32::new(r, g, b, a));
            assert_round_trip(Bgra32::new(r, g, b, a));
            assert_round_trip(Argb32::new(r, g, b, a));
            assert_round_trip(Rgb24::new(r, g, b));
            assert_round_trip(Bgr24::new(r, g, b));
            assert_round_trip(L8::new(r));
            assert_round_trip(La16::new(r, a));

            let [r16, g16, b16, a16]: [u16; 4] = rng.random();
            assert_round_trip(Rgba64::new(r16, g16, b16, a16));
            assert_round_trip(Rgb48::new(r16, g16, b16));
            assert_round_trip(L16::new(r16));
            assert_round_trip(La32::new(r16, a16));
            assert_round_trip(Bgr565(r16));
            assert_round_trip(Bgra4444(r16));
            assert_round_trip(Bgra5551(r16));

            let [rf, gf, bf, af]: [f32; 4] = rng.random();
            assert_round_trip(RgbaF32::new(rf, gf, bf, af));

            assert_round_trip(Rgba32Premultiplied::new(r, g, b, a));
        }
    }

    #[test]
    fn rgba32_exchange_is_exact_for_8bit_types() {
        let c = Rgba32::new(1, 2, 3, 4);
        assert_eq!(Bgra32::from_rgba32(c).to_rgba32(), c);
        assert_eq!(Argb32::from_rgba32(c).to_rgba32(), c);
        assert_eq!(Rgba64::from_rgba32(c).to_rgba32(), c);
        assert_eq!(
            Rgb24::from_rgba32(c).to_rgba32(),
            Rgba32::new(1, 2, 3, 255)
        );
    }

    #[test]
    fn vector_ops() {
        let v = Vector4::new(0.25, 0.5, 0.75, 1.0);
        assert_eq!(v * 2.0, Vector4::new(0.5, 1.0, 1.5, 2.0));
        assert_eq!((v * 2.0) / 2.0, v);
        assert_eq!(Vector4::ONE - v, Vector4::new(0.75, 0.5, 0.25, 0.0));
        assert_eq!(v.map_rgb(|c| c * 0.0), Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(
            Vector4::new(-1.0, f32::NAN, 2.0, 0.5).clamp01(),
            Vector4::new(0.0, 0.0, 1.0, 0.5)
        );
    }
}
