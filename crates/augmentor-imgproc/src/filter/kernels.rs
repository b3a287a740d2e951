use std::ops::Index;

use augmentor_image::ImageError;

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
///
/// # Errors
///
/// If the kernel cannot be allocated.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Result<Vec<f64>, ImageError> {
    let mut kernel = Vec::new();
    kernel
        .try_reserve_exact(kernel_size)
        .map_err(|_| ImageError::InvalidKernelLength(kernel_size))?;

    let mean = (kernel_size as f64 - 1.0) / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f64 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Kernel size covering three standard deviations on each side of the centre.
///
/// Returns `None` when the size does not fit in `usize`.
pub fn gaussian_kernel_size(sigma: f64) -> Option<usize> {
    let half = (3.0 * sigma).ceil();
    if !(half >= 0.0 && half < usize::MAX as f64) {
        return None;
    }
    (half as usize).checked_mul(2)?.checked_add(1)
}

/// A fixed size discrete gaussian kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    sigma: f64,
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Create a gaussian kernel with an explicit number of samples.
    ///
    /// # Errors
    ///
    /// If `sigma` is not a positive finite number or `kernel_size` is zero.
    pub fn new(sigma: f64, kernel_size: usize) -> Result<Self, ImageError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ImageError::InvalidSigma(sigma));
        }

        if kernel_size == 0 {
            return Err(ImageError::InvalidKernelLength(kernel_size));
        }

        Ok(Self {
            sigma,
            weights: gaussian_kernel_1d(kernel_size, sigma)?,
        })
    }

    /// Create a gaussian kernel sized from its sigma, see [`gaussian_kernel_size`].
    pub fn from_sigma(sigma: f64) -> Result<Self, ImageError> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(ImageError::InvalidSigma(sigma));
        }
        let kernel_size = gaussian_kernel_size(sigma).ok_or(ImageError::InvalidSigma(sigma))?;
        Self::new(sigma, kernel_size)
    }

    /// The standard deviation of the kernel.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// The number of samples of the kernel.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false, kernels hold at least one sample.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The kernel weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

impl Index<usize> for GaussianKernel {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.weights[index]
    }
}

/// A box filter, i.e. an unweighted moving average over `width` samples.
///
/// The window is centred on the target sample. For even widths the centre
/// sits on the lower half, so the window of sample `j` covers
/// `j - width / 2 ..= j - width / 2 + width - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxFilter {
    width: usize,
}

impl BoxFilter {
    /// Create a box filter averaging `width` samples.
    ///
    /// # Errors
    ///
    /// If `width` is zero.
    pub fn new(width: usize) -> Result<Self, ImageError> {
        if width == 0 {
            return Err(ImageError::InvalidKernelLength(width));
        }
        Ok(Self { width })
    }

    /// The number of samples averaged.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Offset from the target sample to the first sample of the window.
    pub fn half_width(&self) -> usize {
        self.width / 2
    }

    /// Design a cascade of box filters approximating a gaussian.
    ///
    /// See [`box_blur_fast_kernels_1d`].
    pub fn pseudo_gaussian(sigma: f64, passes: usize) -> Result<Vec<BoxFilter>, ImageError> {
        box_blur_fast_kernels_1d(sigma, passes)?
            .into_iter()
            .map(BoxFilter::new)
            .collect()
    }
}

/// Compute the box widths of a cascade approximating a gaussian blur.
///
/// Repeated box filtering converges to a gaussian. A box of width `w` has
/// variance `(w² - 1) / 12`, so `passes` boxes are chosen among two
/// consecutive odd widths `wl` and `wl + 2` such that the total variance is
/// as close as possible to `sigma²`. The narrow boxes come first.
///
/// # Arguments
///
/// * `sigma` - The sigma of the gaussian to approximate.
/// * `passes` - The number of box filters in the cascade.
///
/// # Returns
///
/// `passes` odd box widths.
///
/// # Errors
///
/// If `sigma` is not a positive finite number or `passes` is zero.
pub fn box_blur_fast_kernels_1d(sigma: f64, passes: usize) -> Result<Vec<usize>, ImageError> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageError::InvalidSigma(sigma));
    }

    if passes == 0 {
        return Err(ImageError::InvalidPassCount(passes));
    }

    let n = passes as f64;
    let variance = 12.0 * sigma * sigma;

    // ideal width if all the boxes were equal
    let w_ideal = (variance / n + 1.0).sqrt();
    let mut wl = w_ideal.floor() as usize;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wu = wl + 2;

    // number of passes using the lower width
    let wl_f = wl as f64;
    let m_ideal = (variance - n * wl_f * wl_f - 4.0 * n * wl_f - 3.0 * n) / (-4.0 * wl_f - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    Ok((0..passes).map(|i| if i < m { wl } else { wu }).collect())
}
