use tracing::{debug, error};

use crate::reference::{IdGroup, ReferenceSet};
use crate::stats::{ContingencyTable, Enrichment};
use crate::{Alternative, EnrichmentError, EnrichmentResult, Grouping};

/// A term of the grouping with its members interned to the reference set
#[derive(Debug, Clone)]
struct Term {
    name: String,
    members: IdGroup,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `SetEnrichmentComputer` calculates the enrichment of every term of a
/// [`Grouping`] within a query set
///
/// The grouping, the [`ReferenceSet`] and the [`Alternative`] hypothesis are fixed
/// at construction. Afterwards, any number of query sets can be tested with
/// [`SetEnrichmentComputer::get_terms`], also concurrently from several threads.
///
/// ```mermaid
/// graph LR
///     G[Grouping] --> C[SetEnrichmentComputer::new]
///     R[ReferenceSet] --> C
///     A[Alternative] --> C
///     C --> T[get_terms]
///     Q[query set] --> T
///     T --> E[Vec of Enrichment]
/// ```
///
/// For every term with the member set `M`, the overlap with the query set `Q`
/// is summarized in the contingency table
///
/// ```text
///                    in M           not in M
/// in Q              |M ∩ Q|        |Q| - |M ∩ Q|
/// not in Q       |M| - |M ∩ Q|     rest of the reference set
/// ```
///
/// and tested with Fisher's exact test. A term without any overlap always
/// gets a p-value of `1.0` when testing for `greater` or `two-sided`, since
/// it does not show any association in the direction of enrichment.
///
/// # Examples
///
/// ```
/// use setenrich::{Alternative, Grouping, ReferenceSet, SetEnrichmentComputer};
///
/// let reference: ReferenceSet = (1..=10).map(|i| format!("g{i}")).collect();
/// let grouping: Grouping = [
///     ("termA", "g1"), ("termA", "g2"), ("termA", "g3"),
///     ("termB", "g4"), ("termB", "g5"),
/// ]
/// .into_iter()
/// .collect();
///
/// let computer = SetEnrichmentComputer::new(grouping, reference, Alternative::Greater).unwrap();
///
/// let mut result = computer.get_terms(["g1", "g2", "g6", "g7"]).unwrap();
/// // the results follow the order of the grouping
/// result.sort_by(|a, b| a.pvalue().total_cmp(&b.pvalue()));
///
/// assert_eq!(result[0].term(), "termA");
/// assert!((result[0].pvalue() - 1.0 / 3.0).abs() < 1e-12);
///
/// // unknown genes are rejected
/// assert!(computer.get_terms(["g1", "g42"]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SetEnrichmentComputer {
    reference: ReferenceSet,
    terms: Vec<Term>,
    alternative: Alternative,
}

impl SetEnrichmentComputer {
    /// Constructs a new [`SetEnrichmentComputer`]
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::ConfigurationError`] if any term of the `grouping`
    /// contains an identifier that is not part of the `reference` set
    pub fn new(
        grouping: Grouping,
        reference: ReferenceSet,
        alternative: Alternative,
    ) -> EnrichmentResult<Self> {
        let mut terms = Vec::with_capacity(grouping.len());
        for (name, members) in grouping.into_terms() {
            match reference.group(&members) {
                Ok(members) => terms.push(Term { name, members }),
                Err(id) => {
                    error!("Term {} contains {} outside of the reference set", name, id);
                    return Err(EnrichmentError::ConfigurationError {
                        term: name,
                        id: id.clone(),
                    });
                }
            }
        }
        debug!(
            "Enrichment of {} terms over {} reference ids ({})",
            terms.len(),
            reference.len(),
            alternative
        );
        Ok(Self {
            reference,
            terms,
            alternative,
        })
    }

    /// Returns the alternative hypothesis of the test
    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    /// Returns the reference set
    pub fn reference(&self) -> &ReferenceSet {
        &self.reference
    }

    /// Returns the number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if there are no terms to test
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns an iterator of all term names, in the order of the grouping
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|term| term.name.as_str())
    }

    /// Calculates the enrichment of every term within the `query` set
    ///
    /// Returns one [`Enrichment`] per term, in the order of the grouping.
    /// Duplicate identifiers in `query` are counted once.
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::UnknownIdentifier`] if `query` contains an identifier
    /// that is not part of the reference set. No enrichment is calculated in that case.
    pub fn get_terms<I, S>(&self, query: I) -> EnrichmentResult<Vec<Enrichment>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let query = self.reference.group(query).map_err(|id| {
            error!("Query contains {} outside of the reference set", id.as_ref());
            EnrichmentError::UnknownIdentifier(id.as_ref().to_string())
        })?;

        let population = count(self.reference.len());
        let draws = count(query.len());

        let mut res = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            let successes = count(term.members.len());
            let observed = count(term.members.intersection_len(&query));
            let table = ContingencyTable::from_counts(population, successes, draws, observed)?;
            let pvalue = self.pvalue(&table);
            debug!(
                "Term:{}\tPopulation: {}, Successes: {}, Draws: {}, Observed: {}, p: {}",
                term.name, population, successes, draws, observed, pvalue
            );
            res.push(Enrichment::new(term.name.clone(), pvalue, table));
        }
        Ok(res)
    }

    fn pvalue(&self, table: &ContingencyTable) -> f64 {
        match self.alternative {
            Alternative::Greater | Alternative::TwoSided if table.observed() == 0 => 1.0,
            alternative => table.p_value(alternative).clamp(0.0, 1.0),
        }
    }
}

/// Set sizes are bounded by memory, so they always fit into a `u64`
fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}
