use augmentor_image::{ImageError, ImageSize, PixelImage};

/// Crop an image to a specified region.
///
/// The region has the size of `dst` and its top-left corner at `(x, y)`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// If the region does not fit in `src`.
///
/// # Examples
///
/// ```rust
/// use augmentor_image::{Image, ImageSize, PixelImage};
/// use augmentor_imgproc::crop::crop_image;
///
/// let image = Image::<u8>::gray(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = image.zeros_with_size(ImageSize { width: 2, height: 2 }).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<I: PixelImage>(
    src: &I,
    dst: &mut I,
    x: usize,
    y: usize,
) -> Result<(), ImageError> {
    if x + dst.width() > src.width() || y + dst.height() > src.height() {
        return Err(ImageError::InvalidImageSize(
            x + dst.width(),
            y + dst.height(),
            src.width(),
            src.height(),
        ));
    }

    for j in 0..dst.height() {
        for i in 0..dst.width() {
            dst.set_pixel(i, j, src.pixel(x + i, y + j)?)?;
        }
    }

    Ok(())
}

/// Top-left corner of a window of size `crop` centred in an image of size `size`.
pub fn center_crop_origin(size: ImageSize, crop: ImageSize) -> (usize, usize) {
    (
        (size.width / 2).saturating_sub(crop.width / 2),
        (size.height / 2).saturating_sub(crop.height / 2),
    )
}

#[cfg(test)]
mod tests {
    use augmentor_image::{ColorSpace, Image, ImageError, ImageSize, PixelImage};

    #[test]
    fn test_crop() -> Result<(), ImageError> {
        let image_size = ImageSize {
            width: 2,
            height: 3,
        };

        #[rustfmt::skip]
        let image = Image::<u8>::new(
            image_size,
            3,
            ColorSpace::Rgb,
            vec![
                0u8, 1, 2, 3, 4, 5,
                6u8, 7, 8, 9, 10, 11,
                12u8, 13, 14, 15, 16, 17,
            ],
        )?;

        let data_expected = vec![9u8, 10, 11, 15, 16, 17];

        let crop_size = ImageSize {
            width: 1,
            height: 2,
        };

        let mut cropped = image.zeros_with_size(crop_size)?;

        super::crop_image(&image, &mut cropped, 1, 1)?;

        assert_eq!(cropped.as_slice(), &data_expected);

        Ok(())
    }

    #[test]
    fn test_crop_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8>::gray(ImageSize::from([3, 3]), vec![0; 9])?;
        let mut cropped = image.zeros_with_size(ImageSize::from([2, 2]))?;

        assert_eq!(
            super::crop_image(&image, &mut cropped, 2, 0),
            Err(ImageError::InvalidImageSize(4, 2, 3, 3))
        );
        Ok(())
    }

    #[test]
    fn test_center_crop_origin() {
        let size = ImageSize {
            width: 5,
            height: 4,
        };
        assert_eq!(super::center_crop_origin(size, ImageSize::from([3, 2])), (1, 1));
        assert_eq!(super::center_crop_origin(size, ImageSize::from([5, 4])), (0, 0));
        assert_eq!(super::center_crop_origin(size, ImageSize::from([2, 2])), (1, 1));
    }
}
