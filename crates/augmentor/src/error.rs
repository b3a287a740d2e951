use augmentor_image::{ImageError, ImageSize};

/// An error type for the augmentation operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AugmentError {
    /// Error when an operation is configured with a degenerate parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when a discrete mode is not recognised.
    #[error("Unsupported option: {0}")]
    UnsupportedOption(String),

    /// Error when a crop window does not fit in the image.
    #[error("Crop of {crop} does not fit in image of {image}")]
    CropOutOfBounds {
        /// The requested crop size.
        crop: ImageSize,
        /// The size of the image being cropped.
        image: ImageSize,
    },

    /// Error raised by the image or its processing kernels.
    #[error(transparent)]
    Image(#[from] ImageError),
}
