use augmentor_image::{ImageError, PixelImage};
use augmentor_imgproc::filter::{
    box_blur, gaussian_blur,
    kernels::{BoxFilter, GaussianKernel},
};

use crate::{
    error::AugmentError,
    operation::{Gate, Operation, OperationConfig},
};

/// Kernel construction failures are configuration errors of the operation.
fn invalid_parameter(err: ImageError) -> AugmentError {
    AugmentError::InvalidParameter(err.to_string())
}

/// Blur with a discrete gaussian kernel applied along both axes.
#[derive(Clone, Debug)]
pub struct GaussianBlurOperation {
    gate: Gate,
    kernel: GaussianKernel,
}

impl GaussianBlurOperation {
    /// Create a gaussian blur whose kernel covers three sigmas on each side.
    ///
    /// # Errors
    ///
    /// If `sigma` is not positive or the config is invalid.
    pub fn new(sigma: f64, config: OperationConfig) -> Result<Self, AugmentError> {
        Ok(Self {
            kernel: GaussianKernel::from_sigma(sigma).map_err(invalid_parameter)?,
            gate: Gate::new(config)?,
        })
    }

    /// Create a gaussian blur with an explicit number of kernel samples.
    pub fn with_kernel_size(
        sigma: f64,
        kernel_size: usize,
        config: OperationConfig,
    ) -> Result<Self, AugmentError> {
        Ok(Self {
            kernel: GaussianKernel::new(sigma, kernel_size).map_err(invalid_parameter)?,
            gate: Gate::new(config)?,
        })
    }

    /// The precomputed kernel.
    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }
}

impl<I: PixelImage> Operation<I> for GaussianBlurOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }
        gaussian_blur(image, &self.kernel)?;
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "GaussianBlur"
    }
}

/// Blur with a moving average of `width` pixels along both axes.
#[derive(Clone, Debug)]
pub struct BoxBlurOperation {
    gate: Gate,
    filter: BoxFilter,
}

impl BoxBlurOperation {
    /// Create a box blur averaging `width` pixels.
    ///
    /// # Errors
    ///
    /// If `width` is zero or the config is invalid.
    pub fn new(width: usize, config: OperationConfig) -> Result<Self, AugmentError> {
        let filter = BoxFilter::new(width).map_err(invalid_parameter)?;
        Self::from_filter(filter, config)
    }

    /// Create a box blur from an existing filter.
    pub fn from_filter(filter: BoxFilter, config: OperationConfig) -> Result<Self, AugmentError> {
        Ok(Self {
            gate: Gate::new(config)?,
            filter,
        })
    }

    /// The box filter.
    pub fn filter(&self) -> &BoxFilter {
        &self.filter
    }
}

impl<I: PixelImage> Operation<I> for BoxBlurOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }
        box_blur(image, &self.filter)?;
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "BoxBlur"
    }
}

/// Approximate gaussian blur by a cascade of box blurs.
///
/// The cost is independent of sigma. Two or more passes approximate the
/// gaussian far better than one, but every pass floors its mean, so the
/// output darkens by up to one level per pass.
#[derive(Clone, Debug)]
pub struct FastGaussianBlurOperation {
    gate: Gate,
    box_blurs: Vec<BoxBlurOperation>,
}

impl FastGaussianBlurOperation {
    /// Create a fast gaussian blur of `sigma` made of `passes` box blurs.
    ///
    /// # Errors
    ///
    /// If `sigma` is not positive, `passes` is zero or the config is invalid.
    pub fn new(sigma: f64, passes: usize, config: OperationConfig) -> Result<Self, AugmentError> {
        let gate = Gate::new(config)?;

        // the outer gate decides, every pass always runs
        let seed = gate.seed();
        let box_blurs = BoxFilter::pseudo_gaussian(sigma, passes)
            .map_err(invalid_parameter)?
            .into_iter()
            .zip(1u64..)
            .map(|(filter, i)| BoxBlurOperation {
                gate: Gate::always(seed.wrapping_add(i)),
                filter,
            })
            .collect();

        Ok(Self { gate, box_blurs })
    }

    /// The widths of the box blur passes, in order of application.
    pub fn box_widths(&self) -> Vec<usize> {
        self.box_blurs.iter().map(|op| op.filter.width()).collect()
    }
}

impl<I: PixelImage> Operation<I> for FastGaussianBlurOperation {
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError> {
        if !self.gate.operate_this_time() {
            return Ok(image);
        }
        for box_blur in self.box_blurs.iter_mut() {
            box_blur.perform(&mut *image)?;
        }
        Ok(image)
    }

    fn name(&self) -> &'static str {
        "FastGaussianBlur"
    }
}
