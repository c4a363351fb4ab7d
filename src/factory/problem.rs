//! Probability of a number of faulty orders across simulated productions
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::production::{FixedWeightSampler, Production, ProductionSampler};
use crate::consts::{
    CHIPS_PER_PRODUCTION, FAULTY_CHIPS_PER_PRODUCTION, N_PRODUCTIONS,
    TARGET_FAULTY_ORDERS,
};
use crate::misc::ln_binom;
use crate::result::{Error, Result};
use crate::traits::Sampleable;
use log::{debug, trace, warn};
use rand::Rng;
use std::f64::consts::LN_2;
use std::fmt;

/// Acceptance probabilities below this trigger a warning for uncapped
/// rejection sampling
const LOW_ACCEPTANCE_WARN: f64 = 1E-6;

/// How accepted productions are obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ProductionStrategy {
    /// Draw fair productions and discard them until one has exactly the
    /// required number of faulty chips
    #[default]
    Rejection,
    /// Place exactly the required number of faulty chips uniformly at random
    FixedWeight,
}

/// Parameters of the faulty-order simulation
///
/// # Example
///
/// Estimate the probability that a production of 4 chips, 2 of them
/// faulty, contains 2 faulty orders. Two of the six arrangements (`x.x.`
/// and `.x.x`) qualify.
///
/// ```
/// use montecarlo::factory::FactoryProblem;
///
/// let mut rng = rand::thread_rng();
/// let problem = FactoryProblem::new(2, 4, 2, 20_000).unwrap();
///
/// let est = problem.estimate(&mut rng).unwrap();
/// assert!((est.probability - 1.0 / 3.0).abs() < 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "FactoryProblemConfig"))]
pub struct FactoryProblem {
    /// Number of faulty orders searched for
    target_faulty_orders: usize,
    /// Total number of chips per production
    chips_per_production: usize,
    /// Exact number of faulty chips in every accepted production
    faulty_chips_per_production: usize,
    /// Number of productions to simulate
    production_count: usize,
    /// Maximum raw draws per accepted production. `None` is unbounded.
    max_attempts: Option<usize>,
    strategy: ProductionStrategy,
}

/// Unvalidated mirror of [`FactoryProblem`]. Deserialized configs pass
/// through [`FactoryProblem::new`] and [`FactoryProblem::with_max_attempts`].
#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct FactoryProblemConfig {
    target_faulty_orders: usize,
    chips_per_production: usize,
    faulty_chips_per_production: usize,
    production_count: usize,
    #[serde(default)]
    max_attempts: Option<usize>,
    #[serde(default)]
    strategy: ProductionStrategy,
}

#[cfg(feature = "serde1")]
impl TryFrom<FactoryProblemConfig> for FactoryProblem {
    type Error = Error;

    fn try_from(config: FactoryProblemConfig) -> Result<Self> {
        let problem = FactoryProblem::new(
            config.target_faulty_orders,
            config.chips_per_production,
            config.faulty_chips_per_production,
            config.production_count,
        )?
        .with_strategy(config.strategy);

        match config.max_attempts {
            Some(max_attempts) => problem.with_max_attempts(max_attempts),
            None => Ok(problem),
        }
    }
}

/// Outcome of a faulty-order simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactoryEstimate {
    /// Fraction of productions with the target number of faulty orders
    pub probability: f64,
    /// Number of productions with the target number of faulty orders
    pub matched: usize,
    /// Number of accepted productions
    pub productions: usize,
    /// Number of raw productions drawn, rejected ones included. Productions
    /// with no faulty chips or only faulty chips are built without drawing
    /// and count as one attempt each.
    pub attempts: usize,
}

impl FactoryProblem {
    /// Create a new simulation
    ///
    /// # Arguments
    ///
    /// - target_faulty_orders: the number of faulty orders to search for
    /// - chips_per_production: total chips in each production
    /// - faulty_chips_per_production: faulty chips in each production
    /// - production_count: how many productions to simulate
    pub fn new(
        target_faulty_orders: usize,
        chips_per_production: usize,
        faulty_chips_per_production: usize,
        production_count: usize,
    ) -> Result<Self> {
        if chips_per_production == 0 {
            Err(Error::invalid_argument("chips per production was zero"))
        } else if production_count == 0 {
            Err(Error::invalid_argument("production count was zero"))
        } else if faulty_chips_per_production > chips_per_production {
            Err(Error::invalid_argument(&format!(
                "faulty chips per production ({}) exceed chips per \
                 production ({})",
                faulty_chips_per_production, chips_per_production
            )))
        } else {
            Ok(Self::new_unchecked(
                target_faulty_orders,
                chips_per_production,
                faulty_chips_per_production,
                production_count,
            ))
        }
    }

    /// Creates a new FactoryProblem without checking whether the parameters
    /// are valid.
    #[inline]
    pub fn new_unchecked(
        target_faulty_orders: usize,
        chips_per_production: usize,
        faulty_chips_per_production: usize,
        production_count: usize,
    ) -> Self {
        FactoryProblem {
            target_faulty_orders,
            chips_per_production,
            faulty_chips_per_production,
            production_count,
            max_attempts: None,
            strategy: ProductionStrategy::Rejection,
        }
    }

    /// Cap the number of raw productions drawn for each accepted production.
    /// Estimation fails with `ResourceExhausted` once a production uses up
    /// the cap. Only affects [`ProductionStrategy::Rejection`].
    ///
    /// # Example
    ///
    /// ```
    /// use montecarlo::factory::FactoryProblem;
    /// use montecarlo::ErrorKind;
    ///
    /// let mut rng = rand::thread_rng();
    ///
    /// // one faulty chip in 40 is accepted about once in 27 billion draws
    /// let problem = FactoryProblem::new(1, 40, 1, 10)
    ///     .unwrap()
    ///     .with_max_attempts(100)
    ///     .unwrap();
    ///
    /// let err = problem.estimate(&mut rng).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
    /// ```
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Result<Self> {
        if max_attempts == 0 {
            Err(Error::invalid_argument("max attempts was zero"))
        } else {
            self.max_attempts = Some(max_attempts);
            Ok(self)
        }
    }

    /// Set how accepted productions are drawn
    pub fn with_strategy(mut self, strategy: ProductionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn target_faulty_orders(&self) -> usize {
        self.target_faulty_orders
    }

    #[inline]
    pub fn chips_per_production(&self) -> usize {
        self.chips_per_production
    }

    #[inline]
    pub fn faulty_chips_per_production(&self) -> usize {
        self.faulty_chips_per_production
    }

    #[inline]
    pub fn production_count(&self) -> usize {
        self.production_count
    }

    #[inline]
    pub fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }

    #[inline]
    pub fn strategy(&self) -> ProductionStrategy {
        self.strategy
    }

    /// Probability that a single fair production has exactly the required
    /// number of faulty chips, `C(n, k) / 2^n`. The expected number of raw
    /// draws per accepted production is its reciprocal.
    ///
    /// # Example
    ///
    /// ```
    /// use montecarlo::factory::FactoryProblem;
    ///
    /// let problem = FactoryProblem::new(1, 4, 2, 10).unwrap();
    /// assert!((problem.acceptance_probability() - 6.0 / 16.0).abs() < 1E-12);
    /// ```
    pub fn acceptance_probability(&self) -> f64 {
        let n = self.chips_per_production as f64;
        let k = self.faulty_chips_per_production as f64;
        (ln_binom(n, k) - n * LN_2).exp()
    }

    /// Run the simulation
    pub fn estimate<R: Rng>(&self, rng: &mut R) -> Result<FactoryEstimate> {
        debug!("estimating {}", self);
        if let Some(p_accept) = self.low_acceptance() {
            warn!(
                "uncapped rejection sampling accepts a production with \
                 probability {:e}; expect about {:.0} draws each",
                p_accept,
                p_accept.recip()
            );
        }

        let mut matched = 0;
        let mut attempts = 0;
        for ix in 0..self.production_count {
            let (production, n_drawn) = self.accepted_production(rng)?;
            attempts += n_drawn;
            let orders = production.faulty_orders();
            trace!(
                "production {}: {} after {} draws, {} faulty orders",
                ix,
                production,
                n_drawn,
                orders
            );
            if orders == self.target_faulty_orders {
                matched += 1;
            }
        }

        let probability = matched as f64 / self.production_count as f64;
        debug!(
            "{} of {} productions had {} faulty orders ({} draws)",
            matched, self.production_count, self.target_faulty_orders, attempts
        );
        Ok(FactoryEstimate {
            probability,
            matched,
            productions: self.production_count,
            attempts,
        })
    }

    /// The acceptance probability if estimation will run uncapped rejection
    /// sampling with an acceptance probability low enough to warn about
    fn low_acceptance(&self) -> Option<f64> {
        if self.strategy != ProductionStrategy::Rejection
            || self.max_attempts.is_some()
            || self.is_degenerate()
        {
            return None;
        }
        let p_accept = self.acceptance_probability();
        (p_accept < LOW_ACCEPTANCE_WARN).then_some(p_accept)
    }

    /// All-good and all-faulty productions admit a single arrangement
    #[inline]
    fn is_degenerate(&self) -> bool {
        let faulty = self.faulty_chips_per_production;
        faulty == 0 || faulty == self.chips_per_production
    }

    /// Draw one production with exactly the required number of faulty chips
    /// along with the number of raw draws it took
    fn accepted_production<R: Rng>(
        &self,
        rng: &mut R,
    ) -> Result<(Production, usize)> {
        let length = self.chips_per_production;
        let faulty = self.faulty_chips_per_production;

        if self.is_degenerate() {
            return Ok((Production::new_unchecked(vec![faulty > 0; length]), 1));
        }

        match self.strategy {
            ProductionStrategy::FixedWeight => {
                let sampler = FixedWeightSampler::new_unchecked(length, faulty);
                Ok((sampler.draw(rng), 1))
            }
            ProductionStrategy::Rejection => {
                let sampler = ProductionSampler::new_unchecked(length);
                let mut n_drawn = 0;
                loop {
                    if self.max_attempts == Some(n_drawn) {
                        return Err(Error::resource_exhausted(&format!(
                            "no production with {} faulty chips in {} draws",
                            faulty, n_drawn
                        )));
                    }
                    n_drawn += 1;
                    let production = sampler.draw(rng);
                    if production.faulty_chips() == faulty {
                        return Ok((production, n_drawn));
                    }
                }
            }
        }
    }
}

impl Default for FactoryProblem {
    fn default() -> Self {
        FactoryProblem::new_unchecked(
            TARGET_FAULTY_ORDERS,
            CHIPS_PER_PRODUCTION,
            FAULTY_CHIPS_PER_PRODUCTION,
            N_PRODUCTIONS,
        )
    }
}

impl From<&FactoryProblem> for String {
    fn from(problem: &FactoryProblem) -> String {
        format!(
            "FactoryProblem(target: {}, chips: {}, faulty: {}, productions: {})",
            problem.target_faulty_orders,
            problem.chips_per_production,
            problem.faulty_chips_per_production,
            problem.production_count
        )
    }
}

impl fmt::Display for FactoryProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from(self))
    }
}

/// Estimate the probability of finding `target_faulty_orders` faulty orders
/// in a production
///
/// Simulates `production_count` productions of `chips_per_production`
/// chips, each holding exactly `faulty_chips_per_production` faulty chips,
/// and returns the fraction whose faulty-order count equals the target.
/// Accepted productions are found by unbounded rejection sampling.
///
/// Fails with `InvalidArgument` if `chips_per_production` or
/// `production_count` is zero, or if there are more faulty chips than chips.
///
/// # Example
///
/// ```
/// use montecarlo::estimate_faulty_order_probability;
///
/// let mut rng = rand::thread_rng();
///
/// let p = estimate_faulty_order_probability(5, 28, 9, 200, &mut rng).unwrap();
/// assert!((0.0..=1.0).contains(&p));
///
/// assert!(estimate_faulty_order_probability(1, 5, 6, 10, &mut rng).is_err());
/// ```
pub fn estimate_faulty_order_probability<R: Rng>(
    target_faulty_orders: usize,
    chips_per_production: usize,
    faulty_chips_per_production: usize,
    production_count: usize,
    rng: &mut R,
) -> Result<f64> {
    FactoryProblem::new(
        target_faulty_orders,
        chips_per_production,
        faulty_chips_per_production,
        production_count,
    )?
    .estimate(rng)
    .map(|est| est.probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ErrorKind;
    use crate::test_basic_impls;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;
    use test_log::test;

    const TOL: f64 = 1E-12;

    test_basic_impls!(FactoryProblem::default());

    #[test]
    fn new_should_reject_zero_chips() {
        let err = FactoryProblem::new(1, 0, 0, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn new_should_reject_zero_productions() {
        let err = FactoryProblem::new(1, 5, 2, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn new_should_reject_more_faulty_chips_than_chips() {
        let err = FactoryProblem::new(1, 5, 6, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut rng = rand::thread_rng();
        let err = estimate_faulty_order_probability(1, 5, 6, 10, &mut rng)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn with_max_attempts_should_reject_zero() {
        let problem = FactoryProblem::new(1, 5, 2, 10).unwrap();
        assert!(problem.clone().with_max_attempts(0).is_err());
        assert_eq!(
            problem.with_max_attempts(3).unwrap().max_attempts(),
            Some(3)
        );
    }

    #[test]
    fn default_uses_the_default_constants() {
        let problem = FactoryProblem::default();
        assert_eq!(problem.target_faulty_orders(), TARGET_FAULTY_ORDERS);
        assert_eq!(problem.chips_per_production(), CHIPS_PER_PRODUCTION);
        assert_eq!(
            problem.faulty_chips_per_production(),
            FAULTY_CHIPS_PER_PRODUCTION
        );
        assert_eq!(problem.production_count(), N_PRODUCTIONS);
        assert_eq!(problem.max_attempts(), None);
        assert_eq!(problem.strategy(), ProductionStrategy::Rejection);
    }

    #[test]
    fn acceptance_probability() {
        let p = |n, k| FactoryProblem::new(1, n, k, 1).unwrap();
        assert::close(p(4, 2).acceptance_probability(), 0.375, TOL);
        assert::close(p(10, 0).acceptance_probability(), 1.0 / 1024.0, TOL);
        assert::close(
            p(28, 9).acceptance_probability(),
            0.025_730_207_562_446_594,
            1E-9,
        );
    }

    #[test]
    fn no_faulty_chips_means_no_faulty_orders() {
        let mut rng = Xoshiro256Plus::seed_from_u64(31);
        let p0 = estimate_faulty_order_probability(0, 28, 0, 50, &mut rng)
            .unwrap();
        assert::close(p0, 1.0, TOL);

        let p1 = estimate_faulty_order_probability(1, 28, 0, 50, &mut rng)
            .unwrap();
        assert::close(p1, 0.0, TOL);
    }

    #[test]
    fn all_faulty_chips_means_no_faulty_orders() {
        let mut rng = Xoshiro256Plus::seed_from_u64(32);
        let est = FactoryProblem::new(0, 12, 12, 40)
            .unwrap()
            .estimate(&mut rng)
            .unwrap();
        assert::close(est.probability, 1.0, TOL);
        assert_eq!(est.attempts, 40);
    }

    #[test]
    fn target_above_chip_count_is_never_matched() {
        let mut rng = Xoshiro256Plus::seed_from_u64(33);
        let p = estimate_faulty_order_probability(9, 8, 4, 100, &mut rng)
            .unwrap();
        assert::close(p, 0.0, TOL);
    }

    #[test]
    fn estimate_counts_productions_and_attempts() {
        let mut rng = Xoshiro256Plus::seed_from_u64(34);
        let est = FactoryProblem::new(3, 10, 5, 100)
            .unwrap()
            .estimate(&mut rng)
            .unwrap();
        assert_eq!(est.productions, 100);
        assert!(est.attempts >= 100);
        assert!(est.matched <= 100);
        assert::close(est.probability, est.matched as f64 / 100.0, TOL);
    }

    #[test]
    fn rejection_estimate_matches_exact_probability() {
        // of the six arrangements of two faulty chips in four, two have
        // two faulty orders
        let mut rng = Xoshiro256Plus::seed_from_u64(35);
        let p = estimate_faulty_order_probability(2, 4, 2, 30_000, &mut rng)
            .unwrap();
        assert!((p - 1.0 / 3.0).abs() < 0.02);
    }

    #[test]
    fn fixed_weight_estimate_matches_exact_probability() {
        let mut rng = Xoshiro256Plus::seed_from_u64(36);
        let est = FactoryProblem::new(1, 4, 2, 30_000)
            .unwrap()
            .with_strategy(ProductionStrategy::FixedWeight)
            .estimate(&mut rng)
            .unwrap();
        assert!((est.probability - 2.0 / 3.0).abs() < 0.02);
        assert_eq!(est.attempts, 30_000);
    }

    #[test]
    fn rejection_and_fixed_weight_agree() {
        let mut rng = Xoshiro256Plus::seed_from_u64(37);
        let problem = FactoryProblem::new(3, 12, 5, 20_000).unwrap();
        let p_rejection = problem.estimate(&mut rng).unwrap().probability;
        let p_fixed = problem
            .with_strategy(ProductionStrategy::FixedWeight)
            .estimate(&mut rng)
            .unwrap()
            .probability;
        assert!((p_rejection - p_fixed).abs() < 0.03);
    }

    #[test]
    fn capped_rejection_is_exhausted() {
        let mut rng = Xoshiro256Plus::seed_from_u64(38);
        let err = FactoryProblem::new(1, 40, 1, 10)
            .unwrap()
            .with_max_attempts(50)
            .unwrap()
            .estimate(&mut rng)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceExhausted);
    }

    #[test]
    fn low_acceptance_is_flagged_for_uncapped_rejection() {
        let problem = FactoryProblem::new(1, 40, 1, 3).unwrap();
        let p_accept = problem.low_acceptance().unwrap();
        assert::close(p_accept, 40.0 / 2_f64.powi(40), 1E-18);

        assert!(problem
            .clone()
            .with_max_attempts(10)
            .unwrap()
            .low_acceptance()
            .is_none());
        assert!(problem
            .with_strategy(ProductionStrategy::FixedWeight)
            .low_acceptance()
            .is_none());
        assert!(FactoryProblem::new(5, 28, 9, 3)
            .unwrap()
            .low_acceptance()
            .is_none());
    }

    #[test]
    fn degenerate_productions_are_not_flagged_as_low_acceptance() {
        // 2^-40 acceptance, but the single arrangement is built directly
        let all_good = FactoryProblem::new(0, 40, 0, 3).unwrap();
        let all_faulty = FactoryProblem::new(0, 40, 40, 3).unwrap();
        assert!(all_good.low_acceptance().is_none());
        assert!(all_faulty.low_acceptance().is_none());

        let mut rng = Xoshiro256Plus::seed_from_u64(40);
        let est = all_good.estimate(&mut rng).unwrap();
        assert::close(est.probability, 1.0, TOL);
        assert_eq!(est.attempts, 3);
    }

    #[test]
    fn cap_does_not_apply_to_fixed_weight() {
        let mut rng = Xoshiro256Plus::seed_from_u64(39);
        let est = FactoryProblem::new(1, 40, 1, 10)
            .unwrap()
            .with_max_attempts(1)
            .unwrap()
            .with_strategy(ProductionStrategy::FixedWeight)
            .estimate(&mut rng)
            .unwrap();
        // a single faulty chip always forms exactly one faulty order
        assert::close(est.probability, 1.0, TOL);
    }

    #[test]
    fn display() {
        let problem = FactoryProblem::new(5, 28, 9, 200).unwrap();
        assert_eq!(
            format!("{}", problem),
            "FactoryProblem(target: 5, chips: 28, faulty: 9, productions: 200)"
        );
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn deserialize_from_json_with_defaults() {
        let problem: FactoryProblem = serde_json::from_str(
            r#"{
                "target_faulty_orders": 5,
                "chips_per_production": 28,
                "faulty_chips_per_production": 9,
                "production_count": 200
            }"#,
        )
        .unwrap();
        assert_eq!(problem, FactoryProblem::default());

        let capped: FactoryProblem = serde_json::from_str(
            r#"{
                "target_faulty_orders": 1,
                "chips_per_production": 4,
                "faulty_chips_per_production": 2,
                "production_count": 10,
                "max_attempts": 100,
                "strategy": "fixed_weight"
            }"#,
        )
        .unwrap();
        assert_eq!(capped.max_attempts(), Some(100));
        assert_eq!(capped.strategy(), ProductionStrategy::FixedWeight);
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn deserialize_should_reject_invalid_configs() {
        let configs = [
            // no productions
            r#"{
                "target_faulty_orders": 1,
                "chips_per_production": 3,
                "faulty_chips_per_production": 0,
                "production_count": 0
            }"#,
            // more faulty chips than chips
            r#"{
                "target_faulty_orders": 1,
                "chips_per_production": 3,
                "faulty_chips_per_production": 5,
                "production_count": 2
            }"#,
            // no chips
            r#"{
                "target_faulty_orders": 0,
                "chips_per_production": 0,
                "faulty_chips_per_production": 0,
                "production_count": 2
            }"#,
            // zero attempt cap
            r#"{
                "target_faulty_orders": 1,
                "chips_per_production": 4,
                "faulty_chips_per_production": 2,
                "production_count": 10,
                "max_attempts": 0
            }"#,
        ];

        for config in configs {
            let res = serde_json::from_str::<FactoryProblem>(config);
            assert!(res.is_err(), "accepted {}", config);
        }
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn serialized_problem_deserializes_to_itself() {
        let problem = FactoryProblem::new(2, 12, 4, 30)
            .unwrap()
            .with_max_attempts(500)
            .unwrap()
            .with_strategy(ProductionStrategy::FixedWeight);
        let json = serde_json::to_string(&problem).unwrap();
        let back: FactoryProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(problem, back);
    }
}
