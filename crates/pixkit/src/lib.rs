#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use pixkit_image as image;

#[doc(inline)]
pub use pixkit_imgproc as imgproc;

#[doc(inline)]
pub use pixkit_io as io;
