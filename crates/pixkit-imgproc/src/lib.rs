#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// pixel format conversion between buffers.
pub mod convert;

/// Error types for the processing module.
pub mod error;

/// conversion modifiers applied around row operators.
pub mod modifiers;

/// module containing parallelization utilities.
pub mod parallel;

/// row transformation engine.
pub mod pixel_rows;

pub use crate::convert::convert_pixels;
pub use crate::error::ProcessError;
pub use crate::modifiers::ConversionModifiers;
pub use crate::parallel::ExecutionStrategy;
pub use crate::pixel_rows::{
    map_pixels, map_pixels_with_position, process_pixel_rows, RowOptions,
};
