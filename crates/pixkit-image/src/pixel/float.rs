use super::{Pixel, Vector4};

/// Four 32-bit floating point channels in red, green, blue, alpha order.
///
/// Channels are stored in the scaled `[0, 1]` range; conversions clamp.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RgbaF32 {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl RgbaF32 {
    /// Create a new pixel from its channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Pixel for RgbaF32 {
    const VECTOR_MAX: f32 = 1.0;
    const HAS_ALPHA: bool = true;
    const BITS_PER_CHANNEL: u32 = 32;

    fn from_scaled_vector4(v: Vector4) -> Self {
        let v = v.clamp01();
        Self::new(v.r, v.g, v.b, v.a)
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        Vector4::new(self.r, self.g, self.b, self.a)
    }
}
