//! Uniform sampling primitives shared by the estimators
use crate::traits::Sampleable;
use rand::Rng;
use rand_distr::Standard;
use std::fmt;

/// Draw from the continuous uniform distribution on [0, 1)
///
/// # Example
///
/// ```
/// use montecarlo::sampler::uniform01;
///
/// let mut rng = rand::thread_rng();
/// let u = uniform01(&mut rng);
/// assert!((0.0..1.0).contains(&u));
/// ```
#[inline]
pub fn uniform01<R: Rng>(rng: &mut R) -> f64 {
    rng.sample(Standard)
}

/// Draw a fair boolean
#[inline]
pub fn random_bool<R: Rng>(rng: &mut R) -> bool {
    rng.sample(Standard)
}

/// The continuous uniform distribution on [0, 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unit01;

impl Sampleable<f64> for Unit01 {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        uniform01(rng)
    }
}

/// A fair coin, `true` and `false` with probability 1/2 each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FairCoin;

impl Sampleable<bool> for FairCoin {
    fn draw<R: Rng>(&self, rng: &mut R) -> bool {
        random_bool(rng)
    }
}

impl fmt::Display for Unit01 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U[0, 1)")
    }
}

impl fmt::Display for FairCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FairCoin")
    }
}
