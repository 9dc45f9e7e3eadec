#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use chromata_image as image;

#[doc(inline)]
pub use chromata_imgproc as imgproc;
