use std::ops::{BitOr, BitOrAssign};

use pixkit_image::{Pixel, Vector4};

use crate::error::ProcessError;

/// Flags controlling how pixels are presented to a row operator.
///
/// With no flags the operator sees the pixel type's native range, that is the
/// scaled vector multiplied by [`Pixel::VECTOR_MAX`]. The flags are applied in
/// order when reading a pixel (companding, premultiplication, scaling) and
/// undone in reverse order when writing it back.
///
/// # Example
///
/// ```
/// use pixkit_imgproc::ConversionModifiers;
///
/// let modifiers = ConversionModifiers::SCALE | ConversionModifiers::PREMULTIPLY;
/// assert!(modifiers.contains(ConversionModifiers::SCALE));
/// assert!(modifiers.validate().is_ok());
/// assert!(ConversionModifiers::COMPAND.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConversionModifiers(u8);

impl ConversionModifiers {
    /// No modification.
    pub const NONE: Self = Self(0);

    /// Present channels in `[0, 1]` instead of the native range.
    pub const SCALE: Self = Self(1);

    /// Multiply color channels by alpha on read and divide on write.
    pub const PREMULTIPLY: Self = Self(1 << 1);

    /// Expand sRGB color channels to linear on read and compress on write.
    ///
    /// Only valid together with [`Self::SCALE`].
    pub const COMPAND: Self = Self(1 << 2);

    const ALL: u8 = Self::SCALE.0 | Self::PREMULTIPLY.0 | Self::COMPAND.0;

    /// Create modifiers from raw bits.
    ///
    /// # Errors
    ///
    /// Returns an error if `bits` has flags that do not exist.
    pub fn from_bits(bits: u8) -> Result<Self, ProcessError> {
        if bits & !Self::ALL != 0 {
            return Err(ProcessError::UnknownModifierBits(bits));
        }
        Ok(Self(bits))
    }

    /// The raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check the flags can be applied together.
    pub fn validate(self) -> Result<(), ProcessError> {
        if self.contains(Self::COMPAND) && !self.contains(Self::SCALE) {
            return Err(ProcessError::InvalidModifiers(self.0));
        }
        Ok(())
    }

    /// Convert a pixel to the vector an operator sees.
    #[inline]
    pub fn to_operator<P: Pixel>(self, px: &P) -> Vector4 {
        let mut v = px.to_scaled_vector4();

        if self.contains(Self::COMPAND) {
            v = v.map_rgb(srgb_to_linear);
        }

        if self.contains(Self::PREMULTIPLY) {
            v = premultiply(v);
        }

        if !self.contains(Self::SCALE) {
            v = v * P::VECTOR_MAX;
        }

        v
    }

    /// Convert an operator vector back to a pixel.
    #[inline]
    pub fn from_operator<P: Pixel>(self, mut v: Vector4) -> P {
        if !self.contains(Self::SCALE) {
            v = v / P::VECTOR_MAX;
        }

        if self.contains(Self::PREMULTIPLY) {
            v = unpremultiply(v);
        }

        if self.contains(Self::COMPAND) {
            v = v.map_rgb(linear_to_srgb);
        }

        P::from_scaled_vector4(v)
    }
}

impl BitOr for ConversionModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ConversionModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Display for ConversionModifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let names = [
            (Self::SCALE, "SCALE"),
            (Self::PREMULTIPLY, "PREMULTIPLY"),
            (Self::COMPAND, "COMPAND"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect::<Vec<_>>();
        write!(f, "{}", names.join(" | "))
    }
}

/// Multiply the color channels by alpha. Pixels with zero alpha are unchanged.
#[inline]
pub fn premultiply(v: Vector4) -> Vector4 {
    if v.a == 0.0 {
        return v;
    }
    Vector4::new(v.r * v.a, v.g * v.a, v.b * v.a, v.a)
}

/// Divide the color channels by alpha. Pixels with zero alpha are unchanged.
#[inline]
pub fn unpremultiply(v: Vector4) -> Vector4 {
    if v.a == 0.0 {
        return v;
    }
    Vector4::new(v.r / v.a, v.g / v.a, v.b / v.a, v.a)
}

/// Convert an sRGB encoded channel in `[0, 1]` to linear light.
#[inline]
pub fn srgb_to_linear(s: f32) -> f32 {
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a linear light channel in `[0, 1]` to sRGB encoding.
#[inline]
pub fn linear_to_srgb(l: f32) -> f32 {
    if l <= 0.04045 / 12.92 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}
