#![deny(missing_docs)]
#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use augmentor_image as image;

#[doc(inline)]
pub use augmentor_imgproc as imgproc;

/// blur operations.
pub mod blur;

/// error types of the operations.
pub mod error;

/// resize, crop, rotate, zoom and flip operations.
pub mod geometric;

/// the operation contract and its probability gate.
pub mod operation;

/// pixel value operations.
pub mod photometric;

/// chaining of operations.
pub mod pipeline;

/// seeded uniform random sources.
pub mod random;

pub use crate::blur::{BoxBlurOperation, FastGaussianBlurOperation, GaussianBlurOperation};
pub use crate::error::AugmentError;
pub use crate::geometric::{
    CropOperation, FlipAxis, FlipOperation, ResizeOperation, RotateOperation, RotateRange,
    ZoomFactor, ZoomOperation,
};
pub use crate::operation::{Gate, Operation, OperationConfig};
pub use crate::photometric::{InvertOperation, RandomEraseOperation};
pub use crate::pipeline::Pipeline;
pub use crate::random::{UniformDomain, UniformGenerator, NULL_SEED};
