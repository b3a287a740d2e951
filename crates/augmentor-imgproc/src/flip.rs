use augmentor_image::{ImageError, PixelImage};
use num_traits::Zero;

/// Exchange the pixels at `a` and `b` using two scratch buffers.
fn swap_pixels<I: PixelImage>(
    image: &mut I,
    a: (usize, usize),
    b: (usize, usize),
    scratch_a: &mut [I::Dtype],
    scratch_b: &mut [I::Dtype],
) -> Result<(), ImageError> {
    scratch_a.copy_from_slice(image.pixel(a.0, a.1)?);
    scratch_b.copy_from_slice(image.pixel(b.0, b.1)?);
    image.set_pixel(a.0, a.1, scratch_b)?;
    image.set_pixel(b.0, b.1, scratch_a)
}

/// Flip the input image horizontally, in place.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W, C).
///
/// # Example
///
/// ```
/// use augmentor_image::{Image, ImageSize};
/// use augmentor_imgproc::flip::horizontal_flip;
///
/// let mut image = Image::<u8>::gray(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
///
/// horizontal_flip(&mut image).unwrap();
///
/// assert_eq!(image.as_slice(), &[3, 2, 1]);
/// ```
pub fn horizontal_flip<I: PixelImage>(image: &mut I) -> Result<(), ImageError> {
    let cols = image.width();
    let mut left = vec![I::Dtype::zero(); image.num_channels()];
    let mut right = left.clone();

    for y in 0..image.height() {
        for x in 0..cols / 2 {
            swap_pixels(image, (x, y), (cols - x - 1, y), &mut left, &mut right)?;
        }
    }

    Ok(())
}

/// Flip the input image vertically, in place.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W, C).
pub fn vertical_flip<I: PixelImage>(image: &mut I) -> Result<(), ImageError> {
    let rows = image.height();
    let mut top = vec![I::Dtype::zero(); image.num_channels()];
    let mut bottom = top.clone();

    for y in 0..rows / 2 {
        for x in 0..image.width() {
            swap_pixels(image, (x, y), (x, rows - y - 1), &mut top, &mut bottom)?;
        }
    }

    Ok(())
}
