#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for decoding operations.
///
/// Defines [`error::IoError`] variants for short sample streams, unsupported tag
/// combinations and payload allocation failures.
pub mod error;

/// TIFF photometric interpretation decoders.
///
/// Unpack bit-packed grayscale, palette and RGB samples into any pixel type.
/// See [`tiff::PhotometricDecoder::from_tags`] to select a decoder from TIFF tags.
pub mod tiff;

/// WebP optional feature container.
///
/// Feature flags of the extended format and the owned alpha payload.
pub mod webp;

pub use crate::error::IoError;
