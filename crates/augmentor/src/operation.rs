use augmentor_image::PixelImage;
use serde::{Deserialize, Serialize};

use crate::{
    error::AugmentError,
    random::{UniformGenerator, NULL_SEED},
};

/// Parameters shared by every operation.
///
/// # Example
///
/// ```
/// use augmentor::operation::OperationConfig;
///
/// let config = OperationConfig {
///     probability: 0.5,
///     ..Default::default()
/// };
/// assert_eq!(config.seed, 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationConfig {
    /// Probability of applying the operation on a given call, in `[0, 1]`.
    pub probability: f64,
    /// Seed of the operation's random source, `0` seeds from the clock.
    pub seed: u64,
}

impl Default for OperationConfig {
    fn default() -> Self {
        Self {
            probability: 1.0,
            seed: NULL_SEED,
        }
    }
}

impl OperationConfig {
    /// Create a config from a probability and a seed.
    pub fn new(probability: f64, seed: u64) -> Self {
        Self { probability, seed }
    }
}

/// The bernoulli gate every operation consults before touching an image.
///
/// The gate owns the operation's random source, so the same generator also
/// provides the random parameters of the operation.
#[derive(Clone, Debug)]
pub struct Gate {
    probability: f64,
    generator: UniformGenerator<f64>,
}

impl Gate {
    /// Create a gate from an operation config.
    ///
    /// # Errors
    ///
    /// If the probability is not within `[0, 1]`.
    pub fn new(config: OperationConfig) -> Result<Self, AugmentError> {
        if !(0.0..=1.0).contains(&config.probability) {
            return Err(AugmentError::InvalidParameter(format!(
                "probability must be in [0, 1], got {}",
                config.probability
            )));
        }

        Ok(Self {
            probability: config.probability,
            generator: UniformGenerator::new(config.seed),
        })
    }

    /// A gate that always lets the operation run.
    ///
    /// Its generator starts at `seed`, or at one if `seed` is [`NULL_SEED`], so
    /// it never reads the clock.
    pub fn always(seed: u64) -> Self {
        Self {
            probability: 1.0,
            generator: UniformGenerator::new(seed.max(1)),
        }
    }

    /// Decide whether the operation runs on this call.
    ///
    /// Draws one number in `[0, 1]` and passes when it is not above the
    /// probability. A zero probability never passes.
    pub fn operate_this_time(&mut self) -> bool {
        let draw = self.generator.sample();
        let pass = self.probability > 0.0 && draw <= self.probability;
        log::trace!("gate draw {draw:.6} against {}: {pass}", self.probability);
        pass
    }

    /// Draw a number in `[0, 1]`.
    pub fn uniform_random_number(&mut self) -> f64 {
        self.generator.sample()
    }

    /// Draw a number in `[lower, upper]`.
    pub fn uniform_random_number_in(&mut self, lower: f64, upper: f64) -> f64 {
        (upper - lower) * self.generator.sample() + lower
    }

    /// The probability of passing.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The seed of the gate's random source.
    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }
}

/// A stochastic transform applied to one image at a time.
///
/// Implementations first consult their [`Gate`]. When it does not pass, the
/// image is returned untouched. Otherwise the image is transformed in place.
/// Either way the same image handle is returned, so calls can be chained.
/// An error leaves the image unmodified.
pub trait Operation<I: PixelImage> {
    /// Apply the operation to `image`.
    fn perform<'a>(&mut self, image: &'a mut I) -> Result<&'a mut I, AugmentError>;

    /// A short human readable name of the operation.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_always_and_never() -> Result<(), AugmentError> {
        let mut always = Gate::new(OperationConfig::new(1.0, 3))?;
        let mut never = Gate::new(OperationConfig::new(0.0, 3))?;
        for _ in 0..1000 {
            assert!(always.operate_this_time());
            assert!(!never.operate_this_time());
        }
        Ok(())
    }

    #[test]
    fn test_always_gate_is_seeded() {
        let mut gate = Gate::always(8);
        assert_eq!(gate.seed(), 8);
        assert!((0..100).all(|_| gate.operate_this_time()));

        assert_eq!(Gate::always(NULL_SEED).seed(), 1);
    }

    #[test]
    fn test_gate_frequency() -> Result<(), AugmentError> {
        let mut gate = Gate::new(OperationConfig::new(0.3, 11))?;
        let passes = (0..10_000).filter(|_| gate.operate_this_time()).count();
        assert!((2_700..3_300).contains(&passes), "{passes} passes");
        Ok(())
    }

    #[test]
    fn test_gate_reproducible() -> Result<(), AugmentError> {
        let mut a = Gate::new(OperationConfig::new(0.5, 99))?;
        let mut b = Gate::new(OperationConfig::new(0.5, 99))?;
        for _ in 0..100 {
            assert_eq!(a.operate_this_time(), b.operate_this_time());
            assert_eq!(
                a.uniform_random_number_in(-3.0, 5.0),
                b.uniform_random_number_in(-3.0, 5.0)
            );
        }
        assert_eq!(a.seed(), 99);
        Ok(())
    }

    #[test]
    fn test_uniform_random_number_in_range() -> Result<(), AugmentError> {
        let mut gate = Gate::new(OperationConfig::new(1.0, 5))?;
        for _ in 0..1000 {
            let x = gate.uniform_random_number_in(10.0, 20.0);
            assert!((10.0..=20.0).contains(&x));
            let u = gate.uniform_random_number();
            assert!((0.0..=1.0).contains(&u));
        }
        Ok(())
    }

    #[test]
    fn test_invalid_probability() {
        assert!(Gate::new(OperationConfig::new(1.5, 1)).is_err());
        assert!(Gate::new(OperationConfig::new(-0.1, 1)).is_err());
        assert!(Gate::new(OperationConfig::new(f64::NAN, 1)).is_err());
    }

    #[test]
    fn test_config_from_json() -> Result<(), serde_json::Error> {
        let config: OperationConfig = serde_json::from_str(r#"{ "probability": 0.25 }"#)?;
        assert_eq!(config, OperationConfig::new(0.25, NULL_SEED));

        let config: OperationConfig = serde_json::from_str("{}")?;
        assert_eq!(config, OperationConfig::default());
        Ok(())
    }
}
