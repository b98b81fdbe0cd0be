use super::{downscale_16_to_8, from_unorm, to_unorm, upscale_8_to_16, Pixel, Rgba32, Vector4};

/// Three 16-bit channels in red, green, blue order.
///
/// The format has no alpha channel; it reads back as fully opaque.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb48 {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
}

impl Rgb48 {
    /// Create a new pixel from its channels.
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }
}

impl Pixel for Rgb48 {
    const VECTOR_MAX: f32 = 65535.0;
    const HAS_ALPHA: bool = false;
    const BITS_PER_CHANNEL: u32 = 16;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self::new(to_unorm(v.r), to_unorm(v.g), to_unorm(v.b))
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        Vector4::new(from_unorm(self.r), from_unorm(self.g), from_unorm(self.b), 1.0)
    }

    fn from_rgba32(c: Rgba32) -> Self {
        Self::new(upscale_8_to_16(c.r), upscale_8_to_16(c.g), upscale_8_to_16(c.b))
    }

    fn to_rgba32(&self) -> Rgba32 {
        Rgba32::new(
            downscale_16_to_8(self.r),
            downscale_16_to_8(self.g),
            downscale_16_to_8(self.b),
            u8::MAX,
        )
    }
}

/// Four 16-bit channels in red, green, blue, alpha order.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba64 {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
    /// Alpha channel.
    pub a: u16,
}

impl Rgba64 {
    /// Create a new pixel from its channels.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }
}

impl Pixel for Rgba64 {
    const VECTOR_MAX: f32 = 65535.0;
    const HAS_ALPHA: bool = true;
    const BITS_PER_CHANNEL: u32 = 16;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self::new(to_unorm(v.r), to_unorm(v.g), to_unorm(v.b), to_unorm(v.a))
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        Vector4::new(
            from_unorm(self.r),
            from_unorm(self.g),
            from_unorm(self.b),
            from_unorm(self.a),
        )
    }

    fn from_rgba32(c: Rgba32) -> Self {
        Self::new(
            upscale_8_to_16(c.r),
            upscale_8_to_16(c.g),
            upscale_8_to_16(c.b),
            upscale_8_to_16(c.a),
        )
    }

    fn to_rgba32(&self) -> Rgba32 {
        Rgba32::new(
            downscale_16_to_8(self.r),
            downscale_16_to_8(self.g),
            downscale_16_to_8(self.b),
            downscale_16_to_8(self.a),
        )
    }
}
