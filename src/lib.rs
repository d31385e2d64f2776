//! `setenrich` tests named groups of identifiers for over- or under-representation
//! within a query set, using Fisher's exact test.
//!
//! The typical use case is gene set enrichment: given the genes that passed an
//! upstream significance threshold (the *query set*), a grouping of genes into
//! named *terms* (pathways, annotation categories) and the *reference set* of all
//! genes that were measured, [`SetEnrichmentComputer`] calculates for every term
//! the probability of observing the overlap between the query set and the term
//! under the hypergeometric null model.
//!
//! # Examples
//!
//! ```
//! use setenrich::{Alternative, Grouping, ReferenceSet, SetEnrichmentComputer};
//!
//! let reference: ReferenceSet = (1..=10).map(|i| format!("g{i}")).collect();
//!
//! let grouping: Grouping = [
//!     ("termA", "g1"), ("termA", "g2"), ("termA", "g3"),
//!     ("termB", "g4"), ("termB", "g5"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let computer = SetEnrichmentComputer::new(grouping, reference, Alternative::TwoSided).unwrap();
//! let result = computer.get_terms(["g1", "g2", "g6", "g7"]).unwrap();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].term(), "termA");
//! assert_eq!(result[0].overlap(), 2);
//! assert!((result[0].pvalue() - 0.5).abs() < 1e-12);
//! assert_eq!(result[1].pvalue(), 1.0);
//! ```
//!
//! The query set is often derived from a table of per-gene statistics:
//!
//! ```
//! use setenrich::{significant, DEFAULT_SIGNIFICANCE_THRESHOLD};
//!
//! let scores = [("g1", 0.001), ("g2", 0.2), ("g3", 0.049)];
//! let query = significant(scores, DEFAULT_SIGNIFICANCE_THRESHOLD);
//! assert_eq!(query.len(), 2);
//! assert!(query.contains("g1"));
//! ```
//!
//! The returned p-values are raw per-term values. Multiple testing correction is
//! left to the caller.
use thiserror::Error;

mod alternative;
mod computer;
mod grouping;
mod query;
mod reference;
pub mod stats;

pub use alternative::Alternative;
pub use computer::SetEnrichmentComputer;
pub use grouping::Grouping;
pub use query::significant;
pub use reference::{IdGroup, MemberId, ReferenceSet};
pub use stats::Enrichment;

/// The threshold that separates significant from non-significant identifiers
/// when deriving a query set with [`significant`]
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Relative tolerance when comparing point probabilities in the two-sided test
///
/// Tables whose probability is within this factor of the observed table are
/// treated as equally extreme, so that floating point noise does not drop
/// tied tables from the sum.
pub const TWO_SIDED_RELATIVE_TOLERANCE: f64 = 1e-7;

/// Number of identifiers an [`IdGroup`] can hold before it spills to the heap
const DEFAULT_NUM_MEMBERS: usize = 30;

/// Errors that can occur when setting up or running an enrichment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    /// A term of the grouping contains an identifier that is not part of the reference set
    #[error("term `{term}` contains `{id}`, which is not part of the reference set")]
    ConfigurationError {
        /// Name of the offending term
        term: String,
        /// The identifier missing from the reference set
        id: String,
    },
    /// The query set contains an identifier that is not part of the reference set
    #[error("query contains `{0}`, which is not part of the reference set")]
    UnknownIdentifier(String),
    /// The alternative hypothesis is not one of `two-sided`, `greater` or `less`
    #[error("invalid alternative hypothesis `{0}`, expected `two-sided`, `greater` or `less`")]
    InvalidAlternative(String),
    /// The parameters do not describe a hypergeometric distribution
    #[error("invalid hypergeometric parameters: population {population}, successes {successes}, draws {draws}")]
    InvalidDistribution {
        /// Population size
        population: u64,
        /// Number of successes in the population
        successes: u64,
        /// Number of draws
        draws: u64,
    },
    /// The counts do not form a 2x2 contingency table
    #[error("counts do not form a contingency table")]
    InvalidTable,
}

impl EnrichmentError {
    /// Returns `true` if the error was caused by an inconsistent grouping and reference set
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, EnrichmentError::ConfigurationError { .. })
    }

    /// Returns `true` if the error was caused by invalid input to a single computation
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EnrichmentError::UnknownIdentifier(_) | EnrichmentError::InvalidAlternative(_)
        )
    }
}

/// Shortcut for `Result<T, EnrichmentError>`
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;
