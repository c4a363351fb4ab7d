//! Monte Carlo estimators
//!
//! Two estimators answering questions by repeated random sampling instead
//! of closed-form computation:
//!
//! - [`estimate_pi`] approximates π from the fraction of uniformly drawn
//!   points of the unit square that land in its inscribed circle.
//! - [`estimate_faulty_order_probability`] simulates manufacturing runs with
//!   a fixed number of faulty chips and estimates how likely a given number
//!   of faulty orders is.
//!
//! Every estimator borrows its random number generator from the caller, so
//! reproducible runs only need a seeded generator.
//!
//! # Example
//!
//! ```
//! use montecarlo::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//!
//! let pi_est = estimate_pi(10_000, &mut rng).unwrap();
//! assert!((pi_est - std::f64::consts::PI).abs() < 0.2);
//!
//! let p = estimate_faulty_order_probability(5, 28, 9, 200, &mut rng).unwrap();
//! assert!((0.0..=1.0).contains(&p));
//! ```
pub mod consts;
pub mod factory;
pub mod misc;
pub mod pi;
pub mod prelude;
pub mod result;
pub mod sampler;
pub mod traits;


pub use factory::{
    count_faulty_orders, estimate_faulty_order_probability,
    generate_production,
};
pub use pi::estimate_pi;
pub use result::{Error, ErrorKind, Result};
