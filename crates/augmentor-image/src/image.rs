use std::fmt::Debug;

use num_traits::{PrimInt, Unsigned, Zero};
use serde::{Deserialize, Serialize};

use crate::{color_space::ColorSpace, error::ImageError};

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels. It is also used as
/// the lower and upper bound of size-randomised transforms.
///
/// # Examples
///
/// ```
/// use augmentor_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Whether one of the two dimensions is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a window of this size fits inside `other`.
    pub fn fits_in(&self, other: &ImageSize) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for pixel sample types.
///
/// Samples are fixed-range unsigned integers. Filters accumulate them in wider
/// types and convert back through this trait.
pub trait ImageDtype: PrimInt + Unsigned + Default + Debug + Send + Sync + 'static {
    /// Widen the sample for integer accumulation.
    fn into_u64(self) -> u64;

    /// Narrow an accumulated value back to a sample, saturating at the maximum.
    fn from_u64_saturating(x: u64) -> Self;

    /// Widen the sample for weighted accumulation.
    fn into_f64(self) -> f64;

    /// Truncate a weighted sum towards zero and clamp it to the sample range.
    fn from_f64_truncated(x: f64) -> Self;
}

macro_rules! impl_image_dtype {
    ($($t:ty),*) => {
        $(
            impl ImageDtype for $t {
                fn into_u64(self) -> u64 {
                    self as u64
                }

                fn from_u64_saturating(x: u64) -> Self {
                    x.min(<$t>::MAX as u64) as $t
                }

                fn into_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64_truncated(x: f64) -> Self {
                    x.trunc().clamp(0.0, <$t>::MAX as f64) as $t
                }
            }
        )*
    };
}

impl_image_dtype!(u8, u16, u32);

/// Pixel level access to an image.
///
/// This is the whole surface the transforms rely on: shape queries, indexed
/// pixel get/set of a channel vector, allocation of a same-shaped buffer and
/// in-place resize. Coordinates are `(x, y)` with `x` along the width.
pub trait PixelImage: Sized {
    /// The sample type of every channel.
    type Dtype: ImageDtype;

    /// Create an image with every sample set to `val`.
    fn from_size_val(
        size: ImageSize,
        num_channels: usize,
        color_space: ColorSpace,
        val: Self::Dtype,
    ) -> Result<Self, ImageError>;

    /// Get the size of the image in pixels.
    fn size(&self) -> ImageSize;

    /// Number of samples per pixel.
    fn num_channels(&self) -> usize;

    /// The color space tag of the image.
    fn color_space(&self) -> ColorSpace;

    /// Get the channel vector at `(x, y)`.
    fn pixel(&self, x: usize, y: usize) -> Result<&[Self::Dtype], ImageError>;

    /// Replace the channel vector at `(x, y)`.
    fn set_pixel(&mut self, x: usize, y: usize, pixel: &[Self::Dtype]) -> Result<(), ImageError>;

    /// Resample the image in place to a new size.
    fn resize(&mut self, size: ImageSize) -> Result<(), ImageError>;

    /// Get the width of the image in pixels.
    fn width(&self) -> usize {
        self.size().width
    }

    /// Get the height of the image in pixels.
    fn height(&self) -> usize {
        self.size().height
    }

    /// Allocate a zero-filled image with this image's layout and a new size.
    fn zeros_with_size(&self, size: ImageSize) -> Result<Self, ImageError> {
        Self::from_size_val(
            size,
            self.num_channels(),
            self.color_space(),
            Self::Dtype::zero(),
        )
    }

    /// Allocate a zero-filled image with the same shape and layout.
    fn zeros_like(&self) -> Result<Self, ImageError> {
        self.zeros_with_size(self.size())
    }
}

/// Represents an image with pixel data.
///
/// Samples are stored row major with interleaved channels, i.e. with shape
/// (H, W, C). The number of channels is a runtime property and must agree
/// with the color space.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    num_channels: usize,
    color_space: ColorSpace,
    data: Vec<T>,
}

impl<T: ImageDtype> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `num_channels` - The number of samples per pixel.
    /// * `color_space` - The color space tag, which must have `num_channels` channels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the size is empty, the color space disagrees with the channel count
    /// or the length of the pixel data does not match the image size.
    ///
    /// # Examples
    ///
    /// ```
    /// use augmentor_image::{ColorSpace, Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     3,
    ///     ColorSpace::Rgb,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(
        size: ImageSize,
        num_channels: usize,
        color_space: ColorSpace,
        data: Vec<T>,
    ) -> Result<Self, ImageError> {
        if size.is_empty() {
            return Err(ImageError::ZeroSizedImage(size.width, size.height));
        }

        if color_space.num_channels() != num_channels {
            return Err(ImageError::InvalidColorSpace(
                color_space.to_string(),
                num_channels,
            ));
        }

        let expected = sample_count(size, num_channels)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            num_channels,
            color_space,
            data,
        })
    }

    /// Create a single channel image from pixel data.
    pub fn gray(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        Self::new(size, 1, ColorSpace::Gray, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Get the color space tag of the image.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Get the raw samples of the image.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the raw samples of the image mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn pixel_offset(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        Ok((y * self.size.width + x) * self.num_channels)
    }
}

impl<T: ImageDtype> PixelImage for Image<T> {
    type Dtype = T;

    fn from_size_val(
        size: ImageSize,
        num_channels: usize,
        color_space: ColorSpace,
        val: T,
    ) -> Result<Self, ImageError> {
        let len = sample_count(size, num_channels)?;
        let mut data = try_with_capacity(len, size, num_channels)?;
        data.resize(len, val);
        Image::new(size, num_channels, color_space, data)
    }

    fn size(&self) -> ImageSize {
        self.size
    }

    fn num_channels(&self) -> usize {
        self.num_channels
    }

    fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    fn pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        let offset = self.pixel_offset(x, y)?;
        Ok(&self.data[offset..offset + self.num_channels])
    }

    fn set_pixel(&mut self, x: usize, y: usize, pixel: &[T]) -> Result<(), ImageError> {
        if pixel.len() != self.num_channels {
            return Err(ImageError::InvalidPixelLength(
                pixel.len(),
                self.num_channels,
            ));
        }
        let offset = self.pixel_offset(x, y)?;
        self.data[offset..offset + self.num_channels].copy_from_slice(pixel);
        Ok(())
    }

    /// Nearest neighbour resampling on a grid spanning both image corners.
    fn resize(&mut self, size: ImageSize) -> Result<(), ImageError> {
        if size.is_empty() {
            return Err(ImageError::ZeroSizedImage(size.width, size.height));
        }

        if size == self.size {
            return Ok(());
        }

        let c = self.num_channels;
        let mut data = try_with_capacity(sample_count(size, c)?, size, c)?;

        let src_x = nearest_grid(self.size.width, size.width, size, c)?;
        let src_y = nearest_grid(self.size.height, size.height, size, c)?;
        for &sy in &src_y {
            for &sx in &src_x {
                let offset = (sy * self.size.width + sx) * c;
                data.extend_from_slice(&self.data[offset..offset + c]);
            }
        }

        self.size = size;
        self.data = data;
        Ok(())
    }
}

/// Number of samples of an image, checking for overflow.
fn sample_count(size: ImageSize, num_channels: usize) -> Result<usize, ImageError> {
    size.width
        .checked_mul(size.height)
        .and_then(|n| n.checked_mul(num_channels))
        .ok_or(ImageError::ImageTooLarge(
            size.width,
            size.height,
            num_channels,
        ))
}

/// Allocate an empty buffer for `len` elements, failing instead of aborting.
fn try_with_capacity<V>(
    len: usize,
    size: ImageSize,
    num_channels: usize,
) -> Result<Vec<V>, ImageError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| ImageError::ImageTooLarge(size.width, size.height, num_channels))?;
    Ok(buffer)
}

/// Source index of every destination index, sampling `0..=src-1` evenly.
fn nearest_grid(
    src: usize,
    dst: usize,
    size: ImageSize,
    num_channels: usize,
) -> Result<Vec<usize>, ImageError> {
    let mut grid = try_with_capacity(dst, size, num_channels)?;
    if dst == 1 {
        grid.push(0);
        return Ok(grid);
    }
    let step = (src - 1) as f64 / (dst - 1) as f64;
    grid.extend((0..dst).map(|i| ((i as f64 * step).round() as usize).min(src - 1)));
    Ok(grid)
}
