use super::{from_unorm_bits, to_unorm_bits, Pixel, Vector4};

/// Packed 16-bit color: 5 bits red (bits 11-15), 6 bits green (bits 5-10), 5 bits blue (bits 0-4).
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgr565(pub u16);

impl Pixel for Bgr565 {
    const VECTOR_MAX: f32 = 1.0;
    const HAS_ALPHA: bool = false;
    const BITS_PER_CHANNEL: u32 = 6;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self(to_unorm_bits(v.r, 5) << 11 | to_unorm_bits(v.g, 6) << 5 | to_unorm_bits(v.b, 5))
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        Vector4::new(
            from_unorm_bits((self.0 >> 11) & 0x1f, 5),
            from_unorm_bits((self.0 >> 5) & 0x3f, 6),
            from_unorm_bits(self.0 & 0x1f, 5),
            1.0,
        )
    }
}

/// Packed 16-bit color with 4 bits per channel: alpha, red, green, blue from the high bits down.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgra4444(pub u16);

impl Pixel for Bgra4444 {
    const VECTOR_MAX: f32 = 1.0;
    const HAS_ALPHA: bool = true;
    const BITS_PER_CHANNEL: u32 = 4;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self(
            to_unorm_bits(v.a, 4) << 12
                | to_unorm_bits(v.r, 4) << 8
                | to_unorm_bits(v.g, 4) << 4
                | to_unorm_bits(v.b, 4),
        )
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        Vector4::new(
            from_unorm_bits((self.0 >> 8) & 0xf, 4),
            from_unorm_bits((self.0 >> 4) & 0xf, 4),
            from_unorm_bits(self.0 & 0xf, 4),
            from_unorm_bits((self.0 >> 12) & 0xf, 4),
        )
    }
}

/// Packed 16-bit color: 1 bit alpha (bit 15) and 5 bits each for red, green and blue.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bgra5551(pub u16);

impl Pixel for Bgra5551 {
    const VECTOR_MAX: f32 = 1.0;
    const HAS_ALPHA: bool = true;
    const BITS_PER_CHANNEL: u32 = 5;

    fn from_scaled_vector4(v: Vector4) -> Self {
        Self(
            to_unorm_bits(v.a, 1) << 15
                | to_unorm_bits(v.r, 5) << 10
                | to_unorm_bits(v.g, 5) << 5
                | to_unorm_bits(v.b, 5),
        )
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        Vector4::new(
            from_unorm_bits((self.0 >> 10) & 0x1f, 5),
            from_unorm_bits((self.0 >> 5) & 0x1f, 5),
            from_unorm_bits(self.0 & 0x1f, 5),
            from_unorm_bits(self.0 >> 15, 1),
        )
    }
}
