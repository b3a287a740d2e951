/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image has no pixels.
    #[error("Image size must be non-zero, got {0}x{1}")]
    ZeroSizedImage(usize, usize),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes are not valid.
    #[error("Invalid image size ({0}, {1}) and ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the samples of an image do not fit in memory.
    #[error("Image of size {0}x{1} with {2} channels is too large to allocate")]
    ImageTooLarge(usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a pixel value does not carry one sample per channel.
    #[error("Pixel length ({0}) does not match the number of channels ({1})")]
    InvalidPixelLength(usize, usize),

    /// Error when the color space cannot hold the requested channels.
    #[error("Color space {0} does not have {1} channels")]
    InvalidColorSpace(String, usize),

    /// Error when the kernel length is not valid.
    #[error("Invalid kernel length {0}")]
    InvalidKernelLength(usize),

    /// Error when the kernel sigma is not a positive finite number.
    #[error("Invalid kernel sigma {0}")]
    InvalidSigma(f64),

    /// Error when a filter cascade is requested with no passes.
    #[error("Invalid number of filter passes {0}")]
    InvalidPassCount(usize),
}
