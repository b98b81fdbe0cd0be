//! WebP container features.
//!
//! Only the feature flags and the alpha payload of the extended format are
//! modelled here; bitstream decoding is out of scope.

mod alpha;
mod features;

pub use alpha::{AlphaChunkHeader, AlphaCompression, AlphaData, AlphaFilter};
pub use features::WebpFeatures;
