//! Seeded uniform random number generation.
//!
//! Every operation owns its generators. A generator constructed with the same
//! non-zero seed and bounds always yields the same sequence, which is what
//! makes an augmentation run reproducible.

use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{distr::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};

use crate::error::AugmentError;

/// Seed value asking for a seed derived from the wall clock.
pub const NULL_SEED: u64 = 0;

/// Numeric domain a [`UniformGenerator`] can sample from.
///
/// Real types default to the unit range `[0, 1]`, integer types to their full
/// representable range.
pub trait UniformDomain: SampleUniform + PartialOrd + Copy + Debug {
    /// The range sampled when no explicit bounds are given.
    fn default_bounds() -> (Self, Self);

    /// Whether `self` can bound a range.
    fn is_valid_bound(&self) -> bool {
        true
    }
}

macro_rules! impl_real_domain {
    ($($t:ty),*) => {
        $(
            impl UniformDomain for $t {
                fn default_bounds() -> (Self, Self) {
                    (0.0, 1.0)
                }

                fn is_valid_bound(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

macro_rules! impl_integer_domain {
    ($($t:ty),*) => {
        $(
            impl UniformDomain for $t {
                fn default_bounds() -> (Self, Self) {
                    (<$t>::MIN, <$t>::MAX)
                }
            }
        )*
    };
}

impl_real_domain!(f32, f64);
impl_integer_domain!(u8, u16, u32, u64, usize, i8, i16, i32, i64);

/// A seeded generator of uniformly distributed numbers in a closed range.
///
/// # Example
///
/// ```
/// use augmentor::random::UniformGenerator;
///
/// let mut a = UniformGenerator::<f64>::new(7);
/// let mut b = UniformGenerator::<f64>::new(7);
///
/// let x = a.sample();
/// assert!((0.0..=1.0).contains(&x));
/// assert_eq!(x, b.sample());
/// ```
#[derive(Clone, Debug)]
pub struct UniformGenerator<T: UniformDomain> {
    rng: StdRng,
    seed: u64,
    lower: T,
    upper: T,
}

impl<T: UniformDomain> UniformGenerator<T> {
    /// Create a generator over the default range of `T`.
    ///
    /// A seed of [`NULL_SEED`] is replaced by one derived from the current time.
    pub fn new(seed: u64) -> Self {
        let (lower, upper) = T::default_bounds();
        Self::from_parts(seed, lower, upper)
    }

    /// Create a generator over `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// If a bound is not finite or `lower > upper`.
    pub fn with_range(seed: u64, lower: T, upper: T) -> Result<Self, AugmentError> {
        if !lower.is_valid_bound() || !upper.is_valid_bound() || lower > upper {
            return Err(AugmentError::InvalidParameter(format!(
                "uniform range [{lower:?}, {upper:?}] is empty or not finite"
            )));
        }
        Ok(Self::from_parts(seed, lower, upper))
    }

    fn from_parts(seed: u64, lower: T, upper: T) -> Self {
        let seed = resolve_seed(seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            lower,
            upper,
        }
    }

    /// Draw the next number.
    pub fn sample(&mut self) -> T {
        self.rng.random_range(self.lower..=self.upper)
    }

    /// The seed the generator was started from, after clock seeding.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The closed range the generator samples from.
    pub fn bounds(&self) -> (T, T) {
        (self.lower, self.upper)
    }
}

impl<T: UniformDomain> Iterator for UniformGenerator<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.sample())
    }
}

fn resolve_seed(seed: u64) -> u64 {
    if seed != NULL_SEED {
        return seed;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let seed = nanos.max(1);
    log::debug!("seeding uniform generator from the clock with {seed}");
    seed
}
