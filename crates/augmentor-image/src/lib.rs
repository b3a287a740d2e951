#![deny(missing_docs)]
//! Image types and traits consumed by the stochastic transforms

/// image representation and pixel access contract.
pub mod image;

/// color space tags carried by images.
pub mod color_space;

/// Error types for the image module.
pub mod error;

pub use crate::color_space::ColorSpace;
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize, PixelImage};
