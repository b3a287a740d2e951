use augmentor_image::{ImageSize, PixelImage};
use augmentor_imgproc::enhance::invert;

use crate::{
    error::AugmentError,
    operation::{Gate, Operation, OperationConfig},
    random::{UniformDomain, UniformGenerator, NULL_SEED},
};

/// Replace every sample `v` by `max - v`.
#[derive(Clone, Debug)]
pub struct InvertOperation {
    gate: Gate,
}

impl InvertOperation {
    /// Create an inversion.
    pub fn new(config: OperationConfig) -> Result<Self, AugmentError> {
        Ok(Self {
            gate: Gate::new(config)?,
        })
    }
}

impl<I: PixelImage> Operation<I> for InvertOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }
        invert(image)?;
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "Invert"
    }
}

/// Overwrite a random rectangle of the image with uniform noise.
///
/// The rectangle size lies between `lower` and `upper`, both clamped to the
/// image, and its position is uniform over the positions keeping it inside.
/// Positions and noise come from two generators of their own, separate from
/// the gate, so each can be seeded independently.
///
/// # Example
///
/// ```
/// use augmentor::{
///     image::{Image, ImageSize},
///     Operation, OperationConfig, RandomEraseOperation,
/// };
///
/// let size = ImageSize { width: 8, height: 8 };
/// let mut image = Image::<u8>::gray(size, vec![0; 64])?;
///
/// let mask = ImageSize { width: 2, height: 3 };
/// let mut erase = RandomEraseOperation::<u8>::new(mask, mask, OperationConfig::new(1.0, 1))?
///     .with_seeds(2, 3);
/// erase.perform(&mut image)?;
/// # Ok::<(), augmentor::AugmentError>(())
/// ```
#[derive(Clone, Debug)]
pub struct RandomEraseOperation<T: UniformDomain> {
    gate: Gate,
    xy_generator: UniformGenerator<usize>,
    noise_generator: UniformGenerator<T>,
    lower: ImageSize,
    upper: ImageSize,
}

impl<T: UniformDomain> RandomEraseOperation<T> {
    /// Create an erase of a rectangle between `lower` and `upper`.
    ///
    /// The position and noise generators are seeded from the clock, see
    /// [`RandomEraseOperation::with_seeds`].
    ///
    /// # Errors
    ///
    /// If `lower` exceeds `upper` on an axis or the config is invalid.
    pub fn new(
        lower: ImageSize,
        upper: ImageSize,
        config: OperationConfig,
    ) -> Result<Self, AugmentError> {
        if !lower.fits_in(&upper) {
            return Err(AugmentError::InvalidParameter(format!(
                "lower erase size {lower} exceeds upper erase size {upper}"
            )));
        }

        Ok(Self {
            gate: Gate::new(config)?,
            xy_generator: UniformGenerator::new(NULL_SEED),
            noise_generator: UniformGenerator::new(NULL_SEED),
            lower,
            upper,
        })
    }

    /// Reseed the position and noise generators.
    pub fn with_seeds(mut self, xy_seed: u64, noise_seed: u64) -> Self {
        self.xy_generator = UniformGenerator::new(xy_seed);
        self.noise_generator = UniformGenerator::new(noise_seed);
        self
    }

    fn erase_size(&mut self, image_size: ImageSize) -> ImageSize {
        let clamp = |size: ImageSize| ImageSize {
            width: size.width.min(image_size.width),
            height: size.height.min(image_size.height),
        };
        let lower = clamp(self.lower);
        let upper = clamp(self.upper);

        let factor = self.gate.uniform_random_number();
        let lerp = |lo: usize, hi: usize| ((hi - lo) as f64 * factor) as usize + lo;
        ImageSize {
            width: lerp(lower.width, upper.width),
            height: lerp(lower.height, upper.height),
        }
    }
}

impl<I> Operation<I> for RandomEraseOperation<I::Dtype>
where
    I: PixelImage,
    I::Dtype: UniformDomain,
{
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }

        let size = image.size();
        let erase = self.erase_size(size);

        let top = self.xy_generator.sample() % (size.height - erase.height + 1);
        let left = self.xy_generator.sample() % (size.width - erase.width + 1);
        log::trace!("erase {erase} at ({left}, {top})");

        let mut noise = vec![I::Dtype::default(); image.num_channels()];
        for x in left..left + erase.width {
            for y in top..top + erase.height {
                noise
                    .iter_mut()
                    .for_each(|v| *v = self.noise_generator.sample());
                image.set_pixel(x, y, &noise)?;
            }
        }

        Ok(image)
    }

    fn name(&self) -> &'static str {
        "RandomErase"
    }
}
