use super::{
    downscale_16_to_8, from_unorm, luminance, luminance_u8, to_unorm, upscale_8_to_16, Pixel,
    Rgba32, Vector4,
};

/// 8-bit luminance.
///
/// Color input is reduced with BT.709 luma weights; alpha is dropped.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct L8 {
    /// Luminance.
    pub l: u8,
}

impl L8 {
    /// Create a new pixel.
    pub const fn new(l: u8) -> Self {
        Self { l }
    }
}

impl Pixel for L8 {
    const VECTOR_MAX: f32 = 255.0;
    const HAS_ALPHA: bool = false;
    const BITS_PER_CHANNEL: u32 = 8;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self::new(to_unorm(luminance(v)))
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        let l = from_unorm(self.l);
        Vector4::new(l, l, l, 1.0)
    }

    fn from_rgba32(c: Rgba32) -> Self {
        Self::new(luminance_u8(c.r, c.g, c.b))
    }

    fn to_rgba32(&self) -> Rgba32 {
        Rgba32::new(self.l, self.l, self.l, u8::MAX)
    }
}

/// 16-bit luminance.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct L16 {
    /// Luminance.
    pub l: u16,
}

impl L16 {
    /// Create a new pixel.
    pub const fn new(l: u16) -> Self {
        Self { l }
    }
}

impl Pixel for L16 {
    const VECTOR_MAX: f32 = 65535.0;
    const HAS_ALPHA: bool = false;
    const BITS_PER_CHANNEL: u32 = 16;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self::new(to_unorm(luminance(v)))
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        let l = from_unorm(self.l);
        Vector4::new(l, l, l, 1.0)
    }

    fn from_rgba32(c: Rgba32) -> Self {
        Self::new(upscale_8_to_16(luminance_u8(c.r, c.g, c.b)))
    }

    fn to_rgba32(&self) -> Rgba32 {
        let l = downscale_16_to_8(self.l);
        Rgba32::new(l, l, l, u8::MAX)
    }
}

/// 8-bit luminance with 8-bit alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct La16 {
    /// Luminance.
    pub l: u8,
    /// Alpha.
    pub a: u8,
}

impl La16 {
    /// Create a new pixel.
    pub const fn new(l: u8, a: u8) -> Self {
        Self { l, a }
    }
}

impl Pixel for La16 {
    const VECTOR_MAX: f32 = 255.0;
    const HAS_ALPHA: bool = true;
    const BITS_PER_CHANNEL: u32 = 8;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self::new(to_unorm(luminance(v)), to_unorm(v.a))
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        let l = from_unorm(self.l);
        Vector4::new(l, l, l, from_unorm(self.a))
    }

    fn from_rgba32(c: Rgba32) -> Self {
        Self::new(luminance_u8(c.r, c.g, c.b), c.a)
    }

    fn to_rgba32(&self) -> Rgba32 {
        Rgba32::new(self.l, self.l, self.l, self.a)
    }
}

/// 16-bit luminance with 16-bit alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct La32 {
    /// Luminance.
    pub l: u16,
    /// Alpha.
    pub a: u16,
}

impl La32 {
    /// Create a new pixel.
    pub const fn new(l: u16, a: u16) -> Self {
        Self { l, a }
    }
}

impl Pixel for La32 {
    const VECTOR_MAX: f32 = 65535.0;
    const HAS_ALPHA: bool = true;
    const BITS_PER_CHANNEL: u32 = 16;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self::new(to_unorm(luminance(v)), to_unorm(v.a))
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        let l = from_unorm(self.l);
        Vector4::new(l, l, l, from_unorm(self.a))
    }
}
