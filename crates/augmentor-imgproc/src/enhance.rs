use augmentor_image::{ImageError, PixelImage};
use num_traits::{Bounded, Zero};

/// Invert every sample of an image in place, `max - value` per channel.
///
/// # Arguments
///
/// * `image` - The image with shape (H, W, C).
///
/// # Example
///
/// ```
/// use augmentor_image::{Image, ImageSize};
/// use augmentor_imgproc::enhance::invert;
///
/// let mut image = Image::<u8>::gray(ImageSize { width: 3, height: 1 }, vec![0, 100, 255]).unwrap();
///
/// invert(&mut image).unwrap();
///
/// assert_eq!(image.as_slice(), &[255, 155, 0]);
/// ```
pub fn invert<I: PixelImage>(image: &mut I) -> Result<(), ImageError> {
    let max = <I::Dtype as Bounded>::max_value();
    let mut inverted = vec![I::Dtype::zero(); image.num_channels()];

    for y in 0..image.height() {
        for x in 0..image.width() {
            for (out, &p) in inverted.iter_mut().zip(image.pixel(x, y)?.iter()) {
                *out = max - p;
            }
            image.set_pixel(x, y, &inverted)?;
        }
    }

    Ok(())
}
