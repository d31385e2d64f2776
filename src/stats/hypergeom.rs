//! The hypergeometric distribution with exact tail probabilities
//!
//! All probabilities are calculated from `ln(n choose k)` values
//! so that large populations do not overflow.
use std::cmp;

use statrs::function::factorial::ln_binomial;

use crate::stats::f64_from_u64;
use crate::{EnrichmentError, EnrichmentResult};

/// The hypergeometric distribution
///
/// Describes the number of successes when drawing `draws` items without
/// replacement from a `population` that contains `successes` successes.
///
/// # Examples
///
/// ```
/// use setenrich::stats::Hypergeometric;
///
/// let hyper = Hypergeometric::new(50, 25, 13).unwrap();
///
/// // 8 or more
/// assert!((hyper.upper_tail(8) - 0.260_097_374_777_385_4).abs() < 1e-10);
/// assert!((hyper.lower_tail(7) + hyper.upper_tail(8) - 1.0).abs() < 1e-10);
///
/// assert!(Hypergeometric::new(10, 11, 2).is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hypergeometric {
    population: u64,
    successes: u64,
    draws: u64,
}

impl Hypergeometric {
    /// Constructs a new hypergeometric distribution
    /// with a population (n) of `population`, number
    /// of successes (K) of `successes`, and number of draws
    /// (N) of `draws`
    ///
    /// # Errors
    ///
    /// If `successes > population` or `draws > population`
    pub fn new(population: u64, successes: u64, draws: u64) -> EnrichmentResult<Hypergeometric> {
        if successes > population || draws > population {
            Err(EnrichmentError::InvalidDistribution {
                population,
                successes,
                draws,
            })
        } else {
            Ok(Self::new_unchecked(population, successes, draws))
        }
    }

    /// Constructs the distribution without checking the parameters
    ///
    /// Only used with parameters taken from a valid contingency table
    pub(crate) fn new_unchecked(population: u64, successes: u64, draws: u64) -> Self {
        Hypergeometric {
            population,
            successes,
            draws,
        }
    }

    /// Returns the population size (n)
    pub fn population(&self) -> u64 {
        self.population
    }

    /// Returns the number of successes in the population (K)
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Returns the number of draws (N)
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Returns the smallest possible number of observed successes
    ///
    /// # Formula
    ///
    /// ```text
    /// max(0, N + K - n)
    /// ```
    pub fn min(&self) -> u64 {
        (self.draws + self.successes).saturating_sub(self.population)
    }

    /// Returns the largest possible number of observed successes
    ///
    /// # Formula
    ///
    /// ```text
    /// min(K, N)
    /// ```
    pub fn max(&self) -> u64 {
        cmp::min(self.successes, self.draws)
    }

    /// Returns the expected number of observed successes
    ///
    /// Returns `0.0` for an empty population
    pub fn mean(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            f64_from_u64(self.draws) * f64_from_u64(self.successes) / f64_from_u64(self.population)
        }
    }

    /// Returns the natural logarithm of the probability to observe exactly `x` successes
    ///
    /// Returns `f64::NEG_INFINITY` for `x` outside of `min..=max`
    pub fn ln_pmf(&self, x: u64) -> f64 {
        if x < self.min() || x > self.max() {
            f64::NEG_INFINITY
        } else {
            ln_binomial(self.successes, x)
                + ln_binomial(self.population - self.successes, self.draws - x)
                - ln_binomial(self.population, self.draws)
        }
    }

    /// Returns the probability to observe exactly `x` successes
    pub fn pmf(&self, x: u64) -> f64 {
        self.ln_pmf(x).exp()
    }

    /// Returns the probability to observe `x` or fewer successes
    pub fn cdf(&self, x: u64) -> f64 {
        if x < self.min() {
            0.0
        } else if x >= self.max() {
            1.0
        } else {
            self.sum_pmf(self.min()..=x)
        }
    }

    /// Returns the probability to observe more than `x` successes
    pub fn sf(&self, x: u64) -> f64 {
        if x < self.min() {
            1.0
        } else if x >= self.max() {
            0.0
        } else {
            self.sum_pmf((x + 1)..=self.max())
        }
    }

    /// Returns the probability to observe `x` or more successes
    pub fn upper_tail(&self, x: u64) -> f64 {
        if x <= self.min() {
            1.0
        } else {
            // x > min >= 0
            self.sf(x - 1)
        }
    }

    /// Returns the probability to observe `x` or fewer successes
    pub fn lower_tail(&self, x: u64) -> f64 {
        self.cdf(x)
    }

    fn sum_pmf<I: IntoIterator<Item = u64>>(&self, range: I) -> f64 {
        range
            .into_iter()
            .fold(0.0, |acc, i| acc + self.pmf(i))
            .min(1.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn build() {
        assert!(Hypergeometric::new(2, 2, 2).is_ok());
        assert!(Hypergeometric::new(0, 0, 0).is_ok());
        assert_eq!(
            Hypergeometric::new(2, 3, 2).unwrap_err(),
            EnrichmentError::InvalidDistribution {
                population: 2,
                successes: 3,
                draws: 2
            }
        );
        assert!(Hypergeometric::new(2, 2, 3).is_err());
    }

    #[test]
    fn support() {
        let hyper = Hypergeometric::new(50, 25, 30).unwrap();
        assert_eq!(hyper.min(), 5);
        assert_eq!(hyper.max(), 25);

        let hyper = Hypergeometric::new(50, 40, 30).unwrap();
        assert_eq!(hyper.min(), 20);

        let hyper = Hypergeometric::new(50, 10, 13).unwrap();
        assert_eq!(hyper.min(), 0);
        assert_eq!(hyper.max(), 10);
    }

    #[test]
    fn pmf() {
        // C(3,i) * C(7,4-i) / C(10,4) with C(10,4) = 210
        let hyper = Hypergeometric::new(10, 3, 4).unwrap();
        assert!((hyper.pmf(0) - 35.0 / 210.0).abs() < TOLERANCE);
        assert!((hyper.pmf(1) - 105.0 / 210.0).abs() < TOLERANCE);
        assert!((hyper.pmf(2) - 63.0 / 210.0).abs() < TOLERANCE);
        assert!((hyper.pmf(3) - 7.0 / 210.0).abs() < TOLERANCE);
        assert!(hyper.pmf(4).abs() < f64::EPSILON);
        assert_eq!(hyper.ln_pmf(4), f64::NEG_INFINITY);
    }

    #[test]
    fn tails() {
        // Numbers calculated here https://statisticsbyjim.com/probability/hypergeometric-distribution/
        let hyper = Hypergeometric::new(50, 25, 13).unwrap();

        assert!((hyper.sf(1) - 0.999_618_983_254_245_1).abs() < TOLERANCE);
        assert!((hyper.sf(3) - 0.974_664_479_904_770_2).abs() < TOLERANCE);
        assert!((hyper.upper_tail(8) - 0.260_097_374_777_385_37).abs() < TOLERANCE);
        assert!((hyper.upper_tail(13) - 0.000_014_654_490_222_007_184).abs() < TOLERANCE);
        assert!(hyper.sf(13) < f64::EPSILON);

        for x in 0..=13 {
            assert!((hyper.cdf(x) + hyper.sf(x) - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn degenerate() {
        // term covers the whole population
        let hyper = Hypergeometric::new(10, 10, 4).unwrap();
        assert_eq!(hyper.min(), 4);
        assert_eq!(hyper.max(), 4);
        assert!((hyper.pmf(4) - 1.0).abs() < TOLERANCE);
        assert!((hyper.upper_tail(4) - 1.0).abs() < f64::EPSILON);
        assert!((hyper.lower_tail(4) - 1.0).abs() < f64::EPSILON);

        // nothing drawn
        let hyper = Hypergeometric::new(10, 3, 0).unwrap();
        assert!((hyper.pmf(0) - 1.0).abs() < TOLERANCE);
        assert!(hyper.mean().abs() < f64::EPSILON);

        // empty population
        let hyper = Hypergeometric::new(0, 0, 0).unwrap();
        assert!((hyper.pmf(0) - 1.0).abs() < TOLERANCE);
        assert!(hyper.mean().abs() < f64::EPSILON);
        assert!(!hyper.upper_tail(0).is_nan());
    }

    #[test]
    fn large_population() {
        let hyper = Hypergeometric::new(20_000, 300, 500).unwrap();
        let total: f64 = (hyper.min()..=hyper.max()).map(|x| hyper.pmf(x)).sum();
        assert!((total - 1.0).abs() < 1e-8);
        assert!((hyper.mean() - 7.5).abs() < 1e-12);
        let p = hyper.upper_tail(30);
        assert!(p > 0.0 && p < 1e-6);
    }
}
