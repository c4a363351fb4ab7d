//! Circle-area approximation of π
//!
//! Points drawn uniformly in the unit square land inside the inscribed
//! circle of radius 1/2 with probability equal to the ratio of the areas:
//!
//! ```text
//!  A_circle      π * (1/2)^2     π         # in circle
//! ----------  =  ------------ = ---  => 4 ------------- ~= π
//!  A_square           1          4         # in square
//! ```
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{CIRCLE_CENTER, CIRCLE_RADIUS_SQUARED};
use crate::result::{Error, Result};
use crate::sampler::uniform01;
use crate::traits::Sampleable;
use log::debug;
use rand::Rng;
use std::fmt;

/// A point in the unit square
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

impl SamplePoint {
    /// Squared distance from the center of the unit square, (0.5, 0.5)
    #[inline]
    pub fn dist2_from_center(&self) -> f64 {
        (self.x - CIRCLE_CENTER).powi(2) + (self.y - CIRCLE_CENTER).powi(2)
    }

    /// `true` if the point lies inside the inscribed circle. Points on the
    /// boundary count as inside.
    ///
    /// # Example
    ///
    /// ```
    /// use montecarlo::pi::SamplePoint;
    ///
    /// assert!(SamplePoint { x: 0.5, y: 0.5 }.is_inside_circle());
    /// assert!(SamplePoint { x: 0.0, y: 0.5 }.is_inside_circle());
    /// assert!(!SamplePoint { x: 0.0, y: 0.0 }.is_inside_circle());
    /// ```
    #[inline]
    pub fn is_inside_circle(&self) -> bool {
        self.dist2_from_center() <= CIRCLE_RADIUS_SQUARED
    }
}

/// Uniform distribution over the unit square, [0, 1) x [0, 1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitSquare;

impl Sampleable<SamplePoint> for UnitSquare {
    fn draw<R: Rng>(&self, rng: &mut R) -> SamplePoint {
        let x = uniform01(rng);
        let y = uniform01(rng);
        SamplePoint { x, y }
    }
}

/// Circle-area estimator of π using a fixed number of points
///
/// # Example
///
/// ```
/// use montecarlo::pi::CircleArea;
///
/// let mut rng = rand::thread_rng();
/// let estimator = CircleArea::new(100_000).unwrap();
///
/// let pi_est = estimator.estimate(&mut rng);
/// assert!((pi_est - std::f64::consts::PI).abs() < 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct CircleArea {
    n_points: usize,
}

impl CircleArea {
    /// Create a new estimator drawing `n_points` points
    pub fn new(n_points: usize) -> Result<Self> {
        if n_points == 0 {
            Err(Error::invalid_argument("number of points was zero"))
        } else {
            Ok(CircleArea { n_points })
        }
    }

    /// Creates a new CircleArea without checking whether `n_points` is
    /// valid.
    #[inline]
    pub fn new_unchecked(n_points: usize) -> Self {
        CircleArea { n_points }
    }

    /// Get the number of points
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Draw `n_points` points and count those inside the circle
    pub fn count_inside<R: Rng>(&self, rng: &mut R) -> usize {
        UnitSquare
            .sample_stream(rng)
            .take(self.n_points)
            .filter(SamplePoint::is_inside_circle)
            .count()
    }

    /// Estimate π as four times the fraction of points inside the circle
    pub fn estimate<R: Rng>(&self, rng: &mut R) -> f64 {
        let inside = self.count_inside(rng);
        let pi_est = 4.0 * (inside as f64 / self.n_points as f64);
        debug!(
            "{} of {} points inside the circle; π ~ {}",
            inside, self.n_points, pi_est
        );
        pi_est
    }
}

impl fmt::Display for CircleArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CircleArea(n_points: {})", self.n_points)
    }
}

/// Approximate π with `n` uniformly drawn points
///
/// Fails with `InvalidArgument` if `n` is zero.
///
/// # Example
///
/// ```
/// use montecarlo::estimate_pi;
///
/// let mut rng = rand::thread_rng();
/// let pi_est = estimate_pi(1000, &mut rng).unwrap();
/// assert!((0.0..=4.0).contains(&pi_est));
/// ```
pub fn estimate_pi<R: Rng>(n: usize, rng: &mut R) -> Result<f64> {
    CircleArea::new(n).map(|est| est.estimate(rng))
}
