//! Productions: one simulated batch of faulty/good chips
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::result::{Error, Result};
use crate::sampler::FairCoin;
use crate::traits::Sampleable;
use rand::seq::index;
use rand::Rng;
use std::fmt;

/// One manufacturing run. `true` marks a faulty chip.
///
/// A production always holds at least one chip.
///
/// # Example
///
/// ```
/// use montecarlo::factory::Production;
///
/// let production = Production::new(vec![true, false, true, false]).unwrap();
///
/// assert_eq!(production.len(), 4);
/// assert_eq!(production.faulty_chips(), 2);
/// assert_eq!(production.faulty_orders(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(transparent))]
pub struct Production(Vec<bool>);

impl Production {
    /// Wrap a chip sequence. Fails with `InvalidArgument` if it is empty.
    pub fn new(chips: Vec<bool>) -> Result<Self> {
        if chips.is_empty() {
            Err(Error::invalid_argument("production has no chips"))
        } else {
            Ok(Production(chips))
        }
    }

    /// Wrap a chip sequence without checking that it is non-empty
    #[inline]
    pub fn new_unchecked(chips: Vec<bool>) -> Self {
        Production(chips)
    }

    /// Total number of chips
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn chips(&self) -> &[bool] {
        &self.0
    }

    /// Number of faulty chips
    pub fn faulty_chips(&self) -> usize {
        self.0.iter().filter(|&&faulty| faulty).count()
    }

    /// Number of faulty orders, see [`count_faulty_orders`]
    pub fn faulty_orders(&self) -> usize {
        faulty_orders_unchecked(&self.0)
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl AsRef<[bool]> for Production {
    fn as_ref(&self) -> &[bool] {
        &self.0
    }
}

impl From<Production> for Vec<bool> {
    fn from(production: Production) -> Vec<bool> {
        production.0
    }
}

impl TryFrom<Vec<bool>> for Production {
    type Error = Error;

    fn try_from(chips: Vec<bool>) -> Result<Self> {
        Production::new(chips)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // faulty chips as 'x', good chips as '.'
        let chips: String = self
            .0
            .iter()
            .map(|&faulty| if faulty { 'x' } else { '.' })
            .collect();
        write!(f, "Production({})", chips)
    }
}

fn faulty_orders_unchecked(chips: &[bool]) -> usize {
    let n = chips.len();
    // position i pairs with its predecessor; position 0 wraps to n - 1
    (0..n)
        .filter(|&i| chips[(i + n - 1) % n] && !chips[i])
        .count()
}

/// Count the faulty orders in a chip sequence
///
/// The sequence is read as a circle: each chip is paired with the one after
/// it and the last chip with the first. A faulty order is a pair whose first
/// chip is faulty and whose second chip is good.
///
/// Fails with `InvalidArgument` for an empty sequence.
///
/// # Example
///
/// ```
/// use montecarlo::count_faulty_orders;
///
/// assert_eq!(count_faulty_orders(&[true, false]).unwrap(), 1);
/// assert_eq!(count_faulty_orders(&[true, true, true]).unwrap(), 0);
/// assert!(count_faulty_orders(&[]).is_err());
/// ```
pub fn count_faulty_orders(production: &[bool]) -> Result<usize> {
    if production.is_empty() {
        Err(Error::invalid_argument(
            "faulty orders are undefined for an empty production",
        ))
    } else {
        Ok(faulty_orders_unchecked(production))
    }
}

/// Productions of a fixed length, one fair coin flip per chip
///
/// # Example
///
/// ```
/// use montecarlo::factory::ProductionSampler;
/// use montecarlo::traits::*;
///
/// let mut rng = rand::thread_rng();
/// let sampler = ProductionSampler::new(28).unwrap();
///
/// let production = sampler.draw(&mut rng);
/// assert_eq!(production.len(), 28);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionSampler {
    length: usize,
}

impl ProductionSampler {
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            Err(Error::invalid_argument("production length was zero"))
        } else {
            Ok(ProductionSampler { length })
        }
    }

    #[inline]
    pub fn new_unchecked(length: usize) -> Self {
        ProductionSampler { length }
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Sampleable<Production> for ProductionSampler {
    fn draw<R: Rng>(&self, rng: &mut R) -> Production {
        Production(FairCoin.sample(self.length, rng))
    }
}

/// Productions of a fixed length with exactly `faulty` faulty chips
///
/// Every one of the `C(length, faulty)` arrangements is equally likely, so
/// the draws follow the same distribution as rejection sampling from
/// [`ProductionSampler`] conditioned on the faulty chip count.
///
/// # Example
///
/// ```
/// use montecarlo::factory::FixedWeightSampler;
/// use montecarlo::traits::*;
///
/// let mut rng = rand::thread_rng();
/// let sampler = FixedWeightSampler::new(28, 9).unwrap();
///
/// let production = sampler.draw(&mut rng);
/// assert_eq!(production.faulty_chips(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWeightSampler {
    length: usize,
    faulty: usize,
}

impl FixedWeightSampler {
    pub fn new(length: usize, faulty: usize) -> Result<Self> {
        if length == 0 {
            Err(Error::invalid_argument("production length was zero"))
        } else if faulty > length {
            Err(Error::invalid_argument(&format!(
                "faulty chips ({}) exceed production length ({})",
                faulty, length
            )))
        } else {
            Ok(FixedWeightSampler { length, faulty })
        }
    }

    #[inline]
    pub fn new_unchecked(length: usize, faulty: usize) -> Self {
        FixedWeightSampler { length, faulty }
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn faulty(&self) -> usize {
        self.faulty
    }
}

impl Sampleable<Production> for FixedWeightSampler {
    fn draw<R: Rng>(&self, rng: &mut R) -> Production {
        let mut chips = vec![false; self.length];
        index::sample(rng, self.length, self.faulty)
            .iter()
            .for_each(|ix| chips[ix] = true);
        Production(chips)
    }
}

/// Draw a production of `length` fair chips
///
/// No constraint is placed on the number of faulty chips. Fails with
/// `InvalidArgument` if `length` is zero.
///
/// # Example
///
/// ```
/// use montecarlo::generate_production;
///
/// let mut rng = rand::thread_rng();
/// let production = generate_production(10, &mut rng).unwrap();
/// assert_eq!(production.len(), 10);
/// ```
pub fn generate_production<R: Rng>(
    length: usize,
    rng: &mut R,
) -> Result<Production> {
    ProductionSampler::new(length).map(|sampler| sampler.draw(rng))
}
