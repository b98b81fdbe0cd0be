use pixkit_image::{ImageError, ImageSize};

/// An error type for pixel processing operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProcessError {
    /// The modifier combination cannot be applied.
    #[error("Invalid conversion modifiers {0:#05b}: companding requires scaling")]
    InvalidModifiers(u8),

    /// The modifier bits contain flags that do not exist.
    #[error("Unknown conversion modifier bits {0:#010b}")]
    UnknownModifierBits(u8),

    /// The requested thread count is invalid.
    #[error("Thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The thread pool failed to build.
    #[error("Failed to build thread pool: {0}")]
    BuildError(String),

    /// Source and destination buffers differ in size.
    #[error("Source size {0} does not match destination size {1}")]
    SizeMismatch(ImageSize, ImageSize),

    /// Error from the target buffer, such as a region outside its bounds.
    #[error(transparent)]
    ImageError(#[from] ImageError),
}
