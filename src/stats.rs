//! Statistics for the enrichment of terms within a query set
//!
//! This module contains the [`Hypergeometric`](hypergeom::Hypergeometric) distribution,
//! the 2x2 [`ContingencyTable`](fisher::ContingencyTable) with Fisher's exact test
//! and the [`Enrichment`] record that is returned for every term by
//! [`SetEnrichmentComputer::get_terms`](crate::SetEnrichmentComputer::get_terms).

pub mod fisher;
pub mod hypergeom;

pub use fisher::{fisher_exact, ContingencyTable};
pub use hypergeom::Hypergeometric;

/// The p-value and overlap counts for a single term
///
/// [`Enrichment`] is returned from [`SetEnrichmentComputer::get_terms`](crate::SetEnrichmentComputer::get_terms).
///
/// The underlying contingency table is
///
/// ```text
///                    in term    not in term
/// in query              k          N - k
/// not in query        K - k     n - N - K + k
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    term: String,
    pvalue: f64,
    table: ContingencyTable,
}

impl Enrichment {
    /// Constructs an `Enrichment` for a term
    pub fn new(term: String, pvalue: f64, table: ContingencyTable) -> Self {
        Self {
            term,
            pvalue,
            table,
        }
    }

    /// Returns the name of the term
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns the p-value of the enrichment
    ///
    /// The p-value indicates the probability that the overlap
    /// occured by chance
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    /// Returns the contingency table the p-value was calculated from
    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    /// Returns the number of query identifiers that belong to the term (`k`)
    pub fn overlap(&self) -> u64 {
        self.table.observed()
    }

    /// Returns the number of identifiers of the term (`K`)
    pub fn term_size(&self) -> u64 {
        self.table.successes()
    }

    /// Returns the number of identifiers in the query set (`N`)
    pub fn query_size(&self) -> u64 {
        self.table.draws()
    }

    /// Returns the number of identifiers in the reference set (`n`)
    pub fn population(&self) -> u64 {
        self.table.population()
    }

    /// Returns the overlap that is expected by chance
    ///
    /// Returns `0.0` for an empty reference set
    pub fn expected(&self) -> f64 {
        self.table.distribution().mean()
    }

    /// Returns the fold enrichment of the observed over the expected overlap
    ///
    /// Returns `None` if no overlap is expected at all
    pub fn fold_enrichment(&self) -> Option<f64> {
        let expected = self.expected();
        if expected > 0.0 {
            Some(f64_from_u64(self.overlap()) / expected)
        } else {
            None
        }
    }

    /// Returns the sample odds ratio of the contingency table
    pub fn odds_ratio(&self) -> Option<f64> {
        self.table.odds_ratio()
    }
}

/// Converts counts to `f64` for divisions
///
/// Counts in this crate are set sizes and stay far below 2^53,
/// where the conversion starts to lose precision.
#[allow(clippy::cast_precision_loss)]
fn f64_from_u64(n: u64) -> f64 {
    n as f64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn enrichment_counts() {
        let table = ContingencyTable::from_counts(10, 3, 4, 2).unwrap();
        let enrichment = Enrichment::new("termA".to_string(), 0.5, table);

        assert_eq!(enrichment.term(), "termA");
        assert_eq!(enrichment.overlap(), 2);
        assert_eq!(enrichment.term_size(), 3);
        assert_eq!(enrichment.query_size(), 4);
        assert_eq!(enrichment.population(), 10);
        assert!((enrichment.expected() - 1.2).abs() < 1e-12);
        assert!((enrichment.fold_enrichment().unwrap() - 2.0 / 1.2).abs() < 1e-12);
        // [[2, 2], [1, 5]]
        assert!((enrichment.odds_ratio().unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn enrichment_without_expectation() {
        let table = ContingencyTable::from_counts(10, 0, 4, 0).unwrap();
        let enrichment = Enrichment::new("empty".to_string(), 1.0, table);
        assert!(enrichment.expected().abs() < f64::EPSILON);
        assert!(enrichment.fold_enrichment().is_none());

        let table = ContingencyTable::from_counts(0, 0, 0, 0).unwrap();
        let enrichment = Enrichment::new("nothing".to_string(), 1.0, table);
        assert!(enrichment.expected().abs() < f64::EPSILON);
        assert!(enrichment.odds_ratio().is_none());
    }
}
