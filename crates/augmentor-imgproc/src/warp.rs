use augmentor_image::{ImageError, PixelImage};

/// Rotate an image about its centre.
///
/// Every destination pixel is mapped back into `src` by the rotation and takes
/// the value of the nearest source pixel. Destination pixels that map outside
/// `src` are left untouched, so `dst` is usually zero-initialised.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `dst` - The output image with the same shape as `src`.
/// * `degrees` - The rotation angle in degrees.
///
/// # Errors
///
/// If `src` and `dst` have different sizes.
pub fn rotate<I: PixelImage>(src: &I, dst: &mut I, degrees: f64) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let cols = src.width() as isize;
    let rows = src.height() as isize;
    let half_cols = cols / 2;
    let half_rows = rows / 2;

    let (sin, cos) = degrees.to_radians().sin_cos();

    for y in 0..rows {
        for x in 0..cols {
            let xt = (x - half_cols) as f64;
            let yt = (y - half_rows) as f64;

            let xs = (cos * xt - sin * yt).round() as isize + half_cols;
            let ys = (sin * xt + cos * yt).round() as isize + half_rows;

            if (0..cols).contains(&xs) && (0..rows).contains(&ys) {
                dst.set_pixel(x as usize, y as usize, src.pixel(xs as usize, ys as usize)?)?;
            }
        }
    }

    Ok(())
}
