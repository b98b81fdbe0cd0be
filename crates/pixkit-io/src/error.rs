use pixkit_image::Region;

/// An error type for the io module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum IoError {
    /// The sample stream is shorter than the region requires.
    #[error("Not enough sample data for {region}: expected {expected} bytes, got {actual}")]
    InsufficientData {
        /// Number of bytes the region requires.
        expected: usize,
        /// Number of bytes provided.
        actual: usize,
        /// The region being decoded.
        region: Region,
    },

    /// Error from the target image, such as a region outside its bounds.
    #[error("Failed to write the image. {0}")]
    ImageError(#[from] pixkit_image::ImageError),

    /// The photometric interpretation has no decoder.
    #[error("Unsupported photometric interpretation: {0}")]
    UnsupportedPhotometric(u16),

    /// The bits per sample combination has no decoder.
    #[error("Unsupported bits per sample {0:?}")]
    UnsupportedBitsPerSample(Vec<u16>),

    /// A palette image was given no color map.
    #[error("Palette image has no color map")]
    MissingColorMap,

    /// The color map length does not match the palette bit depth.
    #[error("Color map has {actual} entries, expected {expected}")]
    InvalidColorMap {
        /// Number of entries required by the bit depth.
        expected: usize,
        /// Number of entries provided.
        actual: usize,
    },

    /// Error to allocate a feature payload.
    #[error("Failed to allocate the payload. {0}")]
    AllocationError(#[from] pixkit_image::AllocatorError),
}
