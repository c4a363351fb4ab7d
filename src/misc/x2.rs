use special::Gamma;

/// Χ<sup>2</sup> (Chi-squared) goodness-of-fit test.
///
/// Returns the statistic and its p-value.
///
/// # Example
///
/// Test whether a run of coin flips was fair.
///
/// ```
/// use montecarlo::misc::x2_test;
///
/// // heads and tails
/// let f_obs: Vec<u32> = vec![508, 492];
///
/// // The probabilty with which each entry should occur
/// let ps: Vec<f64> = vec![0.5; 2];
///
/// let (_stat, p) = x2_test(&f_obs, &ps);
/// assert!(p > 0.05);
/// ```
pub fn x2_test(f_obs: &[u32], ps: &[f64]) -> (f64, f64) {
    let k = f_obs.len();
    let nf = f_obs.iter().fold(0, |acc, ct| acc + ct) as f64;
    let x2 = nf
        * f_obs.iter().zip(ps.iter()).fold(0.0, |acc, (&o, &p)| {
            acc + (f64::from(o) / nf - p).powi(2) / p
        });

    let df = (k - 1) as f64;
    let p = 1.0 - (x2 / 2.0).inc_gamma(df / 2.0);
    (x2, p)
}
