//! Default parameters and geometric constants

/// Default number of random points used to approximate π
pub const N_POINTS: usize = 1000;

/// Default number of chips in one production
pub const CHIPS_PER_PRODUCTION: usize = 28;
/// Default number of faulty chips every accepted production contains
pub const FAULTY_CHIPS_PER_PRODUCTION: usize = 9;
/// Default number of faulty orders marking a bad production
pub const TARGET_FAULTY_ORDERS: usize = 5;
/// Default number of simulated productions
pub const N_PRODUCTIONS: usize = 200;

/// Both coordinates of the center of the circle inscribed in the unit square
pub const CIRCLE_CENTER: f64 = 0.5;
/// Squared radius of the circle inscribed in the unit square, (1/2)^2
pub const CIRCLE_RADIUS_SQUARED: f64 = 0.25;
