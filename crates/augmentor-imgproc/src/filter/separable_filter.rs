use augmentor_image::{ImageDtype, ImageError, PixelImage};
use num_traits::Zero;

use super::clamp_index;

/// Added to weighted sums before truncating them back to samples.
///
/// Normalized kernels only sum to one up to rounding, so a flat region of 100
/// would otherwise come out as 99. The rounding error grows with the magnitude
/// of the sum, hence a relative tolerance.
const TRUNCATION_TOLERANCE: f64 = 1e-12;

/// Weighted sum nudged past the rounding error before truncation.
#[inline]
fn with_tolerance(x: f64) -> f64 {
    x + TRUNCATION_TOLERANCE * x.abs().max(1.0)
}

/// Convolve a scan line of `len` pixels with a weighted kernel.
///
/// The kernel is centred on its `len / 2` sample and positions outside the
/// line read the nearest edge pixel.
fn convolve_line<'a, T, R, W>(
    len: usize,
    kernel: &[f64],
    read: R,
    mut write: W,
    acc: &mut [f64],
    out: &mut [T],
) -> Result<(), ImageError>
where
    T: ImageDtype,
    R: Fn(usize) -> Result<&'a [T], ImageError>,
    W: FnMut(usize, &[T]) -> Result<(), ImageError>,
{
    let half = (kernel.len() / 2) as isize;

    for i in 0..len {
        acc.fill(0.0);

        for (k, &weight) in kernel.iter().enumerate() {
            let pixel = read(clamp_index(i as isize + k as isize - half, len))?;
            for (acc_val, &p) in acc.iter_mut().zip(pixel.iter()) {
                *acc_val += p.into_f64() * weight;
            }
        }

        for (out_val, &acc_val) in out.iter_mut().zip(acc.iter()) {
            *out_val = T::from_f64_truncated(with_tolerance(acc_val));
        }

        write(i, out)?;
    }

    Ok(())
}

/// Apply a separable filter to an image in place.
///
/// The image is first convolved along the height axis with `kernel_y` into a
/// transient image of the same shape, which is then convolved along the width
/// axis with `kernel_x` back into `image`. Weighted sums are accumulated in
/// `f64` and truncated to the sample type.
///
/// # Arguments
///
/// * `image` - The image to filter, with shape (H, W, C).
/// * `kernel_x` - The kernel applied along the width axis.
/// * `kernel_y` - The kernel applied along the height axis.
///
/// # Errors
///
/// If one of the kernels is empty.
pub fn separable_filter<I: PixelImage>(
    image: &mut I,
    kernel_x: &[f64],
    kernel_y: &[f64],
) -> Result<(), ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(0));
    }

    let cols = image.width();
    let rows = image.height();
    let num_channels = image.num_channels();

    let mut transient = image.zeros_like()?;
    let mut acc = vec![0.0f64; num_channels];
    let mut out = vec![I::Dtype::zero(); num_channels];

    // height axis: image -> transient
    {
        let src: &I = image;
        for x in 0..cols {
            convolve_line(
                rows,
                kernel_y,
                move |y| src.pixel(x, y),
                |y, pixel| transient.set_pixel(x, y, pixel),
                &mut acc,
                &mut out,
            )?;
        }
    }

    // width axis: transient -> image
    let src = &transient;
    for y in 0..rows {
        convolve_line(
            cols,
            kernel_x,
            move |x| src.pixel(x, y),
            |x, pixel| image.set_pixel(x, y, pixel),
            &mut acc,
            &mut out,
        )?;
    }

    Ok(())
}
