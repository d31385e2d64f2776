//! Fisher's exact test on 2x2 contingency tables
use crate::stats::f64_from_u64;
use crate::stats::hypergeom::Hypergeometric;
use crate::{Alternative, EnrichmentError, EnrichmentResult, TWO_SIDED_RELATIVE_TOLERANCE};

/// A 2x2 contingency table
///
/// The table is specified as `[[a, b], [c, d]]`:
///
/// ```text
///            column 1   column 2
/// row 1         a          b
/// row 2         c          d
/// ```
///
/// Under the null hypothesis, `a` follows the hypergeometric distribution with
/// a population of `a + b + c + d`, `a + c` successes and `a + b` draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    cells: [[u64; 2]; 2],
}

impl ContingencyTable {
    /// Constructs a table from its four cells
    pub fn new(cells: [[u64; 2]; 2]) -> Self {
        Self { cells }
    }

    /// Constructs the table of an overlap between two sets
    ///
    /// - `population`: size of the reference set (n)
    /// - `successes`: size of the first set (K)
    /// - `draws`: size of the second set (N)
    /// - `observed`: size of the intersection of both sets (k)
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::InvalidTable`] if the sets cannot be part of the population
    ///
    /// # Examples
    ///
    /// ```
    /// use setenrich::stats::ContingencyTable;
    ///
    /// let table = ContingencyTable::from_counts(10, 3, 4, 2).unwrap();
    /// assert_eq!(table.cells(), [[2, 2], [1, 5]]);
    ///
    /// assert!(ContingencyTable::from_counts(10, 3, 4, 4).is_err());
    /// assert!(ContingencyTable::from_counts(10, 8, 8, 2).is_err());
    /// ```
    pub fn from_counts(
        population: u64,
        successes: u64,
        draws: u64,
        observed: u64,
    ) -> EnrichmentResult<Self> {
        if observed > successes
            || observed > draws
            || successes > population
            || draws > population
            || population + observed < successes + draws
        {
            return Err(EnrichmentError::InvalidTable);
        }
        Ok(Self::new([
            [observed, draws - observed],
            [successes - observed, population + observed - successes - draws],
        ]))
    }

    /// Returns the four cells `[[a, b], [c, d]]`
    pub fn cells(&self) -> [[u64; 2]; 2] {
        self.cells
    }

    /// Returns the top left cell `a`
    pub fn observed(&self) -> u64 {
        self.cells[0][0]
    }

    /// Returns the sum of the first row, `a + b`
    pub fn draws(&self) -> u64 {
        self.cells[0][0] + self.cells[0][1]
    }

    /// Returns the sum of the first column, `a + c`
    pub fn successes(&self) -> u64 {
        self.cells[0][0] + self.cells[1][0]
    }

    /// Returns the sum of all cells
    pub fn population(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    /// Returns the distribution of the top left cell, given the table's margins
    pub fn distribution(&self) -> Hypergeometric {
        Hypergeometric::new_unchecked(self.population(), self.successes(), self.draws())
    }

    /// Returns the sample odds ratio `(a * d) / (b * c)`
    ///
    /// Returns `None` if both products are zero
    pub fn odds_ratio(&self) -> Option<f64> {
        let [[a, b], [c, d]] = self.cells;
        let numerator = f64_from_u64(a) * f64_from_u64(d);
        let denominator = f64_from_u64(b) * f64_from_u64(c);
        if denominator > 0.0 {
            Some(numerator / denominator)
        } else if numerator > 0.0 {
            Some(f64::INFINITY)
        } else {
            None
        }
    }

    /// Calculates the p-value of Fisher's exact test
    ///
    /// - [`Alternative::Greater`]: probability of `a` or larger
    /// - [`Alternative::Less`]: probability of `a` or smaller
    /// - [`Alternative::TwoSided`]: summed probability of all tables
    ///   that are not more likely than the observed one
    pub fn p_value(&self, alternative: Alternative) -> f64 {
        let hyper = self.distribution();
        let observed = self.observed();
        match alternative {
            Alternative::Greater => hyper.upper_tail(observed),
            Alternative::Less => hyper.lower_tail(observed),
            Alternative::TwoSided => two_sided(&hyper, observed),
        }
    }
}

impl From<[[u64; 2]; 2]> for ContingencyTable {
    fn from(cells: [[u64; 2]; 2]) -> Self {
        Self::new(cells)
    }
}

/// Sums the probabilities of all outcomes that are at most as likely as `observed`
fn two_sided(hyper: &Hypergeometric, observed: u64) -> f64 {
    let cutoff = hyper.pmf(observed) * (1.0 + TWO_SIDED_RELATIVE_TOLERANCE);
    (hyper.min()..=hyper.max())
        .map(|x| hyper.pmf(x))
        .filter(|p| *p <= cutoff)
        .sum::<f64>()
        .min(1.0)
}

/// Calculates the p-value of Fisher's exact test for the table `[[a, b], [c, d]]`
///
/// # Examples
///
/// ```
/// use setenrich::Alternative;
/// use setenrich::stats::fisher_exact;
///
/// // Lady tasting tea
/// let p = fisher_exact([[3, 1], [1, 3]], Alternative::TwoSided);
/// assert!((p - 34.0 / 70.0).abs() < 1e-10);
/// ```
pub fn fisher_exact(cells: [[u64; 2]; 2], alternative: Alternative) -> f64 {
    ContingencyTable::new(cells).p_value(alternative)
}

#[cfg(test)]
mod test {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn margins() {
        let table = ContingencyTable::new([[2, 2], [1, 5]]);
        assert_eq!(table.observed(), 2);
        assert_eq!(table.draws(), 4);
        assert_eq!(table.successes(), 3);
        assert_eq!(table.population(), 10);
        assert_eq!(
            table,
            ContingencyTable::from_counts(10, 3, 4, 2).unwrap()
        );
    }

    #[test]
    fn invalid_counts() {
        // more overlap than members
        assert_eq!(
            ContingencyTable::from_counts(10, 2, 4, 3),
            Err(EnrichmentError::InvalidTable)
        );
        // sets larger than the population
        assert!(ContingencyTable::from_counts(10, 11, 4, 3).is_err());
        assert!(ContingencyTable::from_counts(10, 4, 11, 3).is_err());
        // union larger than the population
        assert!(ContingencyTable::from_counts(10, 6, 6, 1).is_err());
        assert!(ContingencyTable::from_counts(10, 6, 6, 2).is_ok());
    }

    #[test]
    fn tea_tasting() {
        let table = ContingencyTable::new([[3, 1], [1, 3]]);
        assert!((table.p_value(Alternative::TwoSided) - 34.0 / 70.0).abs() < TOLERANCE);
        assert!((table.p_value(Alternative::Greater) - 17.0 / 70.0).abs() < TOLERANCE);
        assert!((table.p_value(Alternative::Less) - 69.0 / 70.0).abs() < TOLERANCE);
    }

    #[test]
    fn two_sided_without_overlap() {
        // pmf = [70, 112, 28] / 210, observed = 0
        let table = ContingencyTable::from_counts(10, 2, 4, 0).unwrap();
        assert!((table.p_value(Alternative::TwoSided) - 98.0 / 210.0).abs() < TOLERANCE);
        assert!((table.p_value(Alternative::Greater) - 1.0).abs() < f64::EPSILON);
        assert!((table.p_value(Alternative::Less) - 70.0 / 210.0).abs() < TOLERANCE);
    }

    #[test]
    fn two_sided_keeps_ties() {
        // symmetric distribution, both tails are equally likely
        let p = fisher_exact([[0, 4], [4, 0]], Alternative::TwoSided);
        assert!((p - 2.0 / 70.0).abs() < TOLERANCE);
    }

    #[test]
    fn degenerate_tables() {
        for cells in [[[0, 0], [0, 0]], [[4, 0], [0, 0]], [[0, 0], [0, 6]], [[0, 4], [0, 6]]] {
            for alternative in [Alternative::TwoSided, Alternative::Greater, Alternative::Less] {
                let p = fisher_exact(cells, alternative);
                assert!(!p.is_nan());
                assert!((p - 1.0).abs() < TOLERANCE, "{cells:?} {alternative}: {p}");
            }
        }
    }

    #[test]
    fn odds_ratio() {
        let table = ContingencyTable::new([[3, 1], [1, 3]]);
        assert!((table.odds_ratio().unwrap() - 9.0).abs() < f64::EPSILON);
        let table = ContingencyTable::new([[3, 0], [1, 3]]);
        assert_eq!(table.odds_ratio(), Some(f64::INFINITY));
        let table = ContingencyTable::new([[0, 2], [0, 3]]);
        assert!(table.odds_ratio().is_none());
    }
}
