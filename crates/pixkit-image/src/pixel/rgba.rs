use super::{from_unorm, to_unorm, Pixel, Vector4};

/// Macro to define a four channel 8-bit pixel type with a given memory order
macro_rules! define_rgba8 {
    ($name:ident, [$($field:ident),+], $doc:expr) => {
        #[doc = $doc]
        #[repr(C)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            $(
                #[doc = concat!("The `", stringify!($field), "` channel.")]
                pub $field: u8,
            )+
        }

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " pixel from its channels.")]
            pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
                Self { r, g, b, a }
            }
        }

        impl Pixel for $name {
            const VECTOR_MAX: f32 = 255.0;
            const HAS_ALPHA: bool = true;
            const BITS_PER_CHANNEL: u32 = 8;

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
                Self::new(c.r, c.g, c.b, c.a)
            }

            fn to_rgba32(&self) -> Rgba32 {
                Rgba32::new(self.r, self.g, self.b, self.a)
            }
        }
    };
}

/// Macro to define a three channel 8-bit pixel type with a given memory order
macro_rules! define_rgb8 {
    ($name:ident, [$($field:ident),+], $doc:expr) => {
        #[doc = $doc]
        ///
        /// The format has no alpha channel; it reads back as fully opaque.
        #[repr(C)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            $(
                #[doc = concat!("The `", stringify!($field), "` channel.")]
                pub $field: u8,
            )+
        }

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " pixel from its channels.")]
            pub const fn new(r: u8, g: u8, b: u8) -> Self {
                Self { r, g, b }
            }
        }

        impl Pixel for $name {
            const VECTOR_MAX: f32 = 255.0;
            const HAS_ALPHA: bool = false;
            const BITS_PER_CHANNEL: u32 = 8;

            fn from_scaled_vector4(v: Vector4) -> Self {
                Self::new(to_unorm(v.r), to_unorm(v.g), to_unorm(v.b))
            }

            fn to_scaled_vector4(&self) -> Vector4 {
                Vector4::new(from_unorm(self.r), from_unorm(self.g), from_unorm(self.b), 1.0)
            }

            fn from_rgba32(c: Rgba32) -> Self {
                Self::new(c.r, c.g, c.b)
            }

            fn to_rgba32(&self) -> Rgba32 {
                Rgba32::new(self.r, self.g, self.b, u8::MAX)
            }
        }
    };
}

define_rgba8!(
    Rgba32,
    [r, g, b, a],
    "Four 8-bit channels in red, green, blue, alpha order.\n\nAlso the byte-range canonical form every format can be exchanged through."
);
define_rgba8!(
    Bgra32,
    [b, g, r, a],
    "Four 8-bit channels in blue, green, red, alpha order."
);
define_rgba8!(
    Argb32,
    [a, r, g, b],
    "Four 8-bit channels in alpha, red, green, blue order."
);

define_rgb8!(
    Rgb24,
    [r, g, b],
    "Three 8-bit channels in red, green, blue order."
);
define_rgb8!(
    Bgr24,
    [b, g, r],
    "Three 8-bit channels in blue, green, red order."
);

/// Four 8-bit channels whose color channels are premultiplied by alpha.
///
/// Conversions to the canonical vector divide the color channels by alpha, and
/// conversions from it multiply them back. A fully transparent pixel stores
/// zero color channels.
///
/// Only pixels whose color channels do not exceed alpha are representable.
/// [`Rgba32Premultiplied::new`] enforces this; values written directly to the
/// fields that break it are read back with their color channels capped at alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba32Premultiplied {
    /// Red channel, premultiplied by alpha.
    pub r: u8,
    /// Green channel, premultiplied by alpha.
    pub g: u8,
    /// Blue channel, premultiplied by alpha.
    pub b: u8,
    /// The `a` channel.
    pub a: u8,
}

impl Rgba32Premultiplied {
    /// Create a new pixel from already premultiplied channels.
    ///
    /// Color channels larger than `a` are capped at `a`.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: cap(r, a),
            g: cap(g, a),
            b: cap(b, a),
            a,
        }
    }
}

const fn cap(c: u8, a: u8) -> u8 {
    if c > a {
        a
    } else {
        c
    }
}

impl Pixel for Rgba32Premultiplied {
    const VECTOR_MAX: f32 = 255.0;
    const HAS_ALPHA: bool = true;
    const BITS_PER_CHANNEL: u32 = 8;

    fn from_scaled_vector4(v: Vector4) -> Self {
        let v = v.clamp01();
        Self::new(
            to_unorm(v.r * v.a),
            to_unorm(v.g * v.a),
            to_unorm(v.b * v.a),
            to_unorm(v.a),
        )
    }

    fn to_scaled_vector4(&self) -> Vector4 {
        if self.a == 0 {
            return Vector4::ZERO;
        }
        let a = self.a as f32;
        Vector4::new(
            (self.r as f32 / a).min(1.0),
            (self.g as f32 / a).min(1.0),
            (self.b as f32 / a).min(1.0),
            from_unorm(self.a),
        )
    }
}
