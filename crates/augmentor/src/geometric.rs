use std::{fmt, str::FromStr};

use augmentor_image::{ImageSize, PixelImage};
use augmentor_imgproc::{
    crop::{center_crop_origin, crop_image},
    flip::{horizontal_flip, vertical_flip},
    warp::rotate,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AugmentError,
    operation::{Gate, Operation, OperationConfig},
};

/// Linear interpolation between two sizes, truncated per axis.
fn interpolate_size(lower: ImageSize, upper: ImageSize, factor: f64) -> ImageSize {
    let lerp = |lo: usize, hi: usize| ((hi - lo) as f64 * factor) as usize + lo;
    ImageSize {
        width: lerp(lower.width, upper.width),
        height: lerp(lower.height, upper.height),
    }
}

fn check_size_range(lower: ImageSize, upper: ImageSize) -> Result<(), AugmentError> {
    if lower.is_empty() || upper.is_empty() {
        return Err(AugmentError::InvalidParameter(format!(
            "sizes must be non-zero, got {lower} and {upper}"
        )));
    }
    if !lower.fits_in(&upper) {
        return Err(AugmentError::InvalidParameter(format!(
            "lower size {lower} exceeds upper size {upper}"
        )));
    }
    Ok(())
}

/// Resize to a size drawn between two bounds.
///
/// A single draw moves both axes together, so the aspect ratio follows the
/// line between `lower` and `upper`.
#[derive(Clone, Debug)]
pub struct ResizeOperation {
    gate: Gate,
    lower: ImageSize,
    upper: ImageSize,
}

impl ResizeOperation {
    /// Create a resize to a size within `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// If a size is empty or `lower` exceeds `upper` on an axis.
    pub fn new(
        lower: ImageSize,
        upper: ImageSize,
        config: OperationConfig,
    ) -> Result<Self, AugmentError> {
        check_size_range(lower, upper)?;
        Ok(Self {
            gate: Gate::new(config)?,
            lower,
            upper,
        })
    }
}

impl<I: PixelImage> Operation<I> for ResizeOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }

        let factor = self.gate.uniform_random_number();
        let size = interpolate_size(self.lower, self.upper, factor);
        log::trace!("resize {} -> {size}", image.size());

        image.resize(size)?;
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "Resize"
    }
}

/// Crop a fixed size window out of the image.
#[derive(Clone, Debug)]
pub struct CropOperation {
    gate: Gate,
    size: ImageSize,
    center: bool,
}

impl CropOperation {
    /// Create a crop of `size` pixels.
    ///
    /// With `center` the window is centred in the image, otherwise its
    /// top-left corner is drawn uniformly among the positions that keep the
    /// window inside the image.
    pub fn new(size: ImageSize, center: bool, config: OperationConfig) -> Result<Self, AugmentError> {
        if size.is_empty() {
            return Err(AugmentError::InvalidParameter(format!(
                "crop size must be non-zero, got {size}"
            )));
        }
        Ok(Self {
            gate: Gate::new(config)?,
            size,
            center,
        })
    }

    /// The size of the cropped window.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    fn origin(&mut self, image_size: ImageSize) -> (usize, usize) {
        if self.center {
            return center_crop_origin(image_size, self.size);
        }

        let max_x = image_size.width - self.size.width;
        let max_y = image_size.height - self.size.height;
        let x = (max_x as f64 * self.gate.uniform_random_number()).round() as usize;
        let y = (max_y as f64 * self.gate.uniform_random_number()).round() as usize;
        (x.min(max_x), y.min(max_y))
    }
}

impl<I: PixelImage> Operation<I> for CropOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }

        let image_size = image.size();
        if !self.size.fits_in(&image_size) {
            return Err(AugmentError::CropOutOfBounds {
                crop: self.size,
                image: image_size,
            });
        }

        let (x, y) = self.origin(image_size);
        log::trace!("crop {} at ({x}, {y}) out of {image_size}", self.size);

        let mut cropped = image.zeros_with_size(self.size)?;
        crop_image(&*image, &mut cropped, x, y)?;
        *image = cropped;

        Ok(image)
    }

    fn name(&self) -> &'static str {
        "Crop"
    }
}

/// Range of rotation angles, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotateRange {
    /// Smallest angle.
    pub min: f64,
    /// Largest angle.
    pub max: f64,
}

/// Rotate about the image centre by an angle drawn from a range.
///
/// Pixels rotated in from outside the image are zero.
#[derive(Clone, Debug)]
pub struct RotateOperation {
    gate: Gate,
    range: RotateRange,
}

impl RotateOperation {
    /// Create a rotation by an angle within `range`.
    ///
    /// # Errors
    ///
    /// If a bound is not finite or `min > max`.
    pub fn new(range: RotateRange, config: OperationConfig) -> Result<Self, AugmentError> {
        if !(range.min.is_finite() && range.max.is_finite() && range.min <= range.max) {
            return Err(AugmentError::InvalidParameter(format!(
                "invalid rotation range [{}, {}]",
                range.min, range.max
            )));
        }
        Ok(Self {
            gate: Gate::new(config)?,
            range,
        })
    }

    /// The range of angles.
    pub fn range(&self) -> RotateRange {
        self.range
    }
}

impl<I: PixelImage> Operation<I> for RotateOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }

        let degrees = self
            .gate
            .uniform_random_number_in(self.range.min, self.range.max);
        log::trace!("rotate by {degrees:.3} degrees");

        let mut rotated = image.zeros_like()?;
        rotate(&*image, &mut rotated, degrees)?;
        *image = rotated;

        Ok(image)
    }

    fn name(&self) -> &'static str {
        "Rotate"
    }
}

/// Range of zoom factors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoomFactor {
    /// Smallest factor, at least `1.0`.
    pub min: f64,
    /// Largest factor.
    pub max: f64,
}

/// Zoom into the image centre, keeping the image size.
///
/// The image is enlarged by a factor drawn from the range, truncated to one
/// decimal, then the centre window of the original size is cropped back out.
#[derive(Clone, Debug)]
pub struct ZoomOperation {
    gate: Gate,
    factor: ZoomFactor,
}

impl ZoomOperation {
    /// Create a zoom by a factor within `factor`.
    ///
    /// # Errors
    ///
    /// If `factor.min < 1.0`, `min > max` or a bound is not finite.
    pub fn new(factor: ZoomFactor, config: OperationConfig) -> Result<Self, AugmentError> {
        if !(factor.max.is_finite() && factor.min >= 1.0 && factor.min <= factor.max) {
            return Err(AugmentError::InvalidParameter(format!(
                "zoom factors must satisfy 1 <= min <= max, got [{}, {}]",
                factor.min, factor.max
            )));
        }
        Ok(Self {
            gate: Gate::new(config)?,
            factor,
        })
    }

    /// The range of zoom factors.
    pub fn factor(&self) -> ZoomFactor {
        self.factor
    }
}

impl<I: PixelImage> Operation<I> for ZoomOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }

        let level = self
            .gate
            .uniform_random_number_in(self.factor.min, self.factor.max);
        let level = (level * 10.0).trunc() / 10.0;

        let size = image.size();
        let zoomed_size = ImageSize {
            width: (size.width as f64 * level) as usize,
            height: (size.height as f64 * level) as usize,
        };
        log::trace!("zoom by {level:.1} to {zoomed_size}");

        let mut cropped = image.zeros_like()?;
        image.resize(zoomed_size)?;

        // a level of at least one keeps the zoomed image as large as the crop
        let (x, y) = center_crop_origin(zoomed_size, size);
        crop_image(&*image, &mut cropped, x, y)?;
        *image = cropped;

        Ok(image)
    }

    fn name(&self) -> &'static str {
        "Zoom"
    }
}

/// Axis an image is mirrored about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipAxis {
    /// Mirror left and right.
    Horizontal,
    /// Mirror top and bottom.
    Vertical,
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipAxis::Horizontal => write!(f, "Horizontal"),
            FlipAxis::Vertical => write!(f, "Vertical"),
        }
    }
}

impl FromStr for FlipAxis {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Horizontal" => Ok(FlipAxis::Horizontal),
            "Vertical" => Ok(FlipAxis::Vertical),
            other => Err(AugmentError::UnsupportedOption(format!(
                "unknown flip axis {other:?}"
            ))),
        }
    }
}

/// Mirror the image about an axis.
#[derive(Clone, Debug)]
pub struct FlipOperation {
    gate: Gate,
    axis: FlipAxis,
}

impl FlipOperation {
    /// Create a flip about `axis`.
    pub fn new(axis: FlipAxis, config: OperationConfig) -> Result<Self, AugmentError> {
        Ok(Self {
            gate: Gate::new(config)?,
            axis,
        })
    }

    /// The flip axis.
    pub fn axis(&self) -> FlipAxis {
        self.axis
    }
}

impl<I: PixelImage> Operation<I> for FlipOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }

        match self.axis {
            FlipAxis::Horizontal => horizontal_flip(image)?,
            FlipAxis::Vertical => vertical_flip(image)?,
        }
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "Flip"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmentor_image::{ColorSpace, Image, ImageError};

    fn config(probability: f64) -> OperationConfig {
        OperationConfig::new(probability, 23)
    }

    /// An image whose samples count up in row major order.
    fn ramp(width: usize, height: usize) -> Result<Image<u8>, AugmentError> {
        let data = (0..width * height).map(|v| v as u8).collect();
        Ok(Image::gray(ImageSize { width, height }, data)?)
    }

    #[test]
    fn test_resize_fixed_size() -> Result<(), AugmentError> {
        let mut image = ramp(4, 3)?;
        let size = ImageSize {
            width: 7,
            height: 5,
        };
        let mut op = ResizeOperation::new(size, size, config(1.0))?;

        op.perform(&mut image)?;
        assert_eq!(image.size(), size);
        Ok(())
    }

    #[test]
    fn test_resize_within_bounds() -> Result<(), AugmentError> {
        let lower = ImageSize {
            width: 2,
            height: 4,
        };
        let upper = ImageSize {
            width: 10,
            height: 8,
        };
        let mut op = ResizeOperation::new(lower, upper, config(1.0))?;

        for _ in 0..20 {
            let mut image = ramp(5, 5)?;
            op.perform(&mut image)?;
            assert!(lower.fits_in(&image.size()));
            assert!(image.size().fits_in(&upper));
        }
        Ok(())
    }

    #[test]
    fn test_resize_invalid_bounds() {
        let small = ImageSize {
            width: 2,
            height: 2,
        };
        let large = ImageSize {
            width: 4,
            height: 4,
        };
        assert!(ResizeOperation::new(large, small, config(1.0)).is_err());
        assert!(ResizeOperation::new(ImageSize::default(), large, config(1.0)).is_err());
    }

    #[test]
    fn test_center_crop() -> Result<(), AugmentError> {
        let mut image = ramp(4, 4)?;
        let size = ImageSize {
            width: 2,
            height: 2,
        };

        CropOperation::new(size, true, config(1.0))?.perform(&mut image)?;

        assert_eq!(image.size(), size);
        assert_eq!(image.as_slice(), &[5, 6, 9, 10]);
        Ok(())
    }

    #[test]
    fn test_random_crop_stays_inside() -> Result<(), AugmentError> {
        let (width, height) = (6, 5);
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let mut op = CropOperation::new(size, false, config(1.0))?;

        for _ in 0..20 {
            let mut image = ramp(width, height)?;
            op.perform(&mut image)?;

            let origin = image.as_slice()[0] as usize;
            let (x, y) = (origin % width, origin / width);
            assert!(x + size.width <= width && y + size.height <= height);

            let expected: Vec<u8> = (0..size.height)
                .flat_map(|j| (0..size.width).map(move |i| ((y + j) * width + x + i) as u8))
                .collect();
            assert_eq!(image.as_slice(), expected.as_slice());
        }
        Ok(())
    }

    #[test]
    fn test_crop_out_of_bounds() -> Result<(), AugmentError> {
        let original = ramp(3, 3)?;
        let mut image = original.clone();
        let size = ImageSize {
            width: 4,
            height: 2,
        };

        let result = CropOperation::new(size, true, config(1.0))?.perform(&mut image);
        assert_eq!(
            result.map(|i| i.size()),
            Err(AugmentError::CropOutOfBounds {
                crop: size,
                image: original.size(),
            })
        );
        assert_eq!(image, original);
        Ok(())
    }

    #[test]
    fn test_rotate_half_turn() -> Result<(), AugmentError> {
        let mut image = ramp(3, 3)?;
        let range = RotateRange {
            min: 180.0,
            max: 180.0,
        };

        RotateOperation::new(range, config(1.0))?.perform(&mut image)?;

        assert_eq!(image.as_slice(), &[8, 7, 6, 5, 4, 3, 2, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_rotate_keeps_shape() -> Result<(), AugmentError> {
        let mut image = Image::<u8>::from_size_val([5, 3].into(), 3, ColorSpace::Rgb, 9)?;
        let range = RotateRange {
            min: -30.0,
            max: 30.0,
        };

        RotateOperation::new(range, config(1.0))?.perform(&mut image)?;

        assert_eq!(
            image.size(),
            ImageSize {
                width: 5,
                height: 3
            }
        );
        assert_eq!(image.num_channels(), 3);
        assert!(image.as_slice().iter().all(|&v| v == 0 || v == 9));
        Ok(())
    }

    #[test]
    fn test_zoom_twice() -> Result<(), AugmentError> {
        let mut image = ramp(4, 4)?;
        let factor = ZoomFactor { min: 2.0, max: 2.0 };

        ZoomOperation::new(factor, config(1.0))?.perform(&mut image)?;

        #[rustfmt::skip]
        assert_eq!(
            image.as_slice(),
            &[
                5, 5, 6, 6,
                5, 5, 6, 6,
                9, 9, 10, 10,
                9, 9, 10, 10,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_zoom_keeps_size() -> Result<(), AugmentError> {
        let factor = ZoomFactor { min: 1.0, max: 3.0 };
        let mut op = ZoomOperation::new(factor, config(1.0))?;

        for _ in 0..10 {
            let mut image = ramp(7, 5)?;
            op.perform(&mut image)?;
            assert_eq!(
                image.size(),
                ImageSize {
                    width: 7,
                    height: 5
                }
            );
        }
        Ok(())
    }

    #[test]
    fn test_zoom_rejects_shrinking() {
        let factor = ZoomFactor { min: 0.5, max: 2.0 };
        assert!(matches!(
            ZoomOperation::new(factor, config(1.0)),
            Err(AugmentError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_zoom_too_large_fails() -> Result<(), AugmentError> {
        let original = ramp(4, 4)?;

        // 4e9 x 4e9 fits in usize but not in memory, 4e12 x 4e12 overflows
        for level in [1e9, 1e12] {
            let mut image = original.clone();
            let factor = ZoomFactor {
                min: level,
                max: level,
            };
            let result = ZoomOperation::new(factor, config(1.0))?
                .perform(&mut image)
                .map(|_| ());
            assert!(matches!(
                result,
                Err(AugmentError::Image(ImageError::ImageTooLarge(..)))
            ));
            assert_eq!(image, original);
        }
        Ok(())
    }

    #[test]
    fn test_flip() -> Result<(), AugmentError> {
        let mut image = ramp(3, 2)?;

        FlipOperation::new(FlipAxis::Horizontal, config(1.0))?.perform(&mut image)?;
        assert_eq!(image.as_slice(), &[2, 1, 0, 5, 4, 3]);

        FlipOperation::new(FlipAxis::Vertical, config(1.0))?.perform(&mut image)?;
        assert_eq!(image.as_slice(), &[5, 4, 3, 2, 1, 0]);
        Ok(())
    }

    #[test]
    fn test_flip_axis_from_str() {
        assert_eq!("Horizontal".parse::<FlipAxis>(), Ok(FlipAxis::Horizontal));
        assert_eq!("Vertical".parse::<FlipAxis>(), Ok(FlipAxis::Vertical));
        assert!(matches!(
            "Diagonal".parse::<FlipAxis>(),
            Err(AugmentError::UnsupportedOption(_))
        ));
        assert_eq!(FlipAxis::Vertical.to_string(), "Vertical");
    }

    #[test]
    fn test_operation_names() -> Result<(), AugmentError> {
        let op = FlipOperation::new(FlipAxis::Vertical, config(0.5))?;
        assert_eq!(Operation::<Image<u8>>::name(&op), "Flip");
        Ok(())
    }
}
