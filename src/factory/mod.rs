//! Faulty chip productions
//!
//! A factory turns out productions of a fixed number of chips, some of
//! them faulty. Reading a production as a circle, every faulty chip that is
//! immediately followed by a good one marks a faulty order. The
//! [`FactoryProblem`] estimates how likely a given number of faulty orders
//! is when every production holds a fixed number of faulty chips.
mod problem;
mod production;

pub use problem::{
    estimate_faulty_order_probability, FactoryEstimate, FactoryProblem,
    ProductionStrategy,
};
pub use production::{
    count_faulty_orders, generate_production, FixedWeightSampler, Production,
    ProductionSampler,
};
