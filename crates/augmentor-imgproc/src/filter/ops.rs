use augmentor_image::{ImageError, PixelImage};

use super::{
    kernels::{BoxFilter, GaussianKernel},
    separable_filter, sliding_box_filter,
};

/// Blur an image in place using a gaussian blur filter
///
/// # Arguments
///
/// * `image` - The image to blur, with shape (H, W, C).
/// * `kernel` - The gaussian kernel, applied along both axes.
///
/// # Example
///
/// ```
/// use augmentor_image::{Image, ImageSize};
/// use augmentor_imgproc::filter::{gaussian_blur, kernels::GaussianKernel};
///
/// let mut image = Image::<u8>::gray(ImageSize { width: 4, height: 3 }, vec![50; 12]).unwrap();
///
/// gaussian_blur(&mut image, &GaussianKernel::from_sigma(1.0).unwrap()).unwrap();
///
/// assert_eq!(image.as_slice(), &[50; 12]);
/// ```
pub fn gaussian_blur<I: PixelImage>(
    image: &mut I,
    kernel: &GaussianKernel,
) -> Result<(), ImageError> {
    separable_filter(image, kernel.as_slice(), kernel.as_slice())
}

/// Blur an image in place using a box blur filter
///
/// The cost per pixel does not depend on the filter width.
///
/// # Arguments
///
/// * `image` - The image to blur, with shape (H, W, C).
/// * `filter` - The box filter, applied along both axes.
pub fn box_blur<I: PixelImage>(image: &mut I, filter: &BoxFilter) -> Result<(), ImageError> {
    sliding_box_filter(image, filter)
}

/// Blur an image using a box blur filter multiple times to achieve a near gaussian blur
///
/// # Arguments
///
/// * `image` - The image to blur, with shape (H, W, C).
/// * `filters` - The cascade of box filters, see [`BoxFilter::pseudo_gaussian`].
pub fn box_blur_fast<I: PixelImage>(
    image: &mut I,
    filters: &[BoxFilter],
) -> Result<(), ImageError> {
    for filter in filters {
        sliding_box_filter(image, filter)?;
    }
    Ok(())
}
