//! Trait definitions
use rand::Rng;

/// A source of random values of type `X`
///
/// Every sampler in this crate borrows the generator from its caller; none
/// of them own or seed one.
pub trait Sampleable<X> {
    /// Single draw
    ///
    /// # Example
    ///
    /// Flip a coin
    ///
    /// ```
    /// use montecarlo::sampler::FairCoin;
    /// use montecarlo::traits::*;
    ///
    /// let mut rng = rand::thread_rng();
    /// let x: bool = FairCoin.draw(&mut rng); // could be true, could be false.
    /// ```
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple draws
    ///
    /// # Example
    ///
    /// Flip a lot of coins
    ///
    /// ```
    /// use montecarlo::sampler::FairCoin;
    /// use montecarlo::traits::*;
    ///
    /// let mut rng = rand::thread_rng();
    /// let xs: Vec<bool> = FairCoin.sample(22, &mut rng);
    ///
    /// assert_eq!(xs.len(), 22);
    /// ```
    fn sample<R: Rng>(&self, n: usize, mut rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(&mut rng)).collect()
    }

    /// Create a never-ending iterator of samples
    ///
    /// # Example
    ///
    /// Estimate the mean of U[0, 1)
    ///
    /// ```
    /// use montecarlo::sampler::Unit01;
    /// use montecarlo::traits::*;
    ///
    /// let mut rng = rand::thread_rng();
    ///
    /// let n = 1_000_000_usize;
    /// let mean = Unit01.sample_stream(&mut rng).take(n).sum::<f64>() / n as f64;
    ///
    /// assert::close(mean, 0.5, 1e-2);
    /// ```
    fn sample_stream<'r, R: Rng>(
        &'r self,
        mut rng: &'r mut R,
    ) -> Box<dyn Iterator<Item = X> + 'r> {
        Box::new(std::iter::repeat_with(move || self.draw(&mut rng)))
    }
}
