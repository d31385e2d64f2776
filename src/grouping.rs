//! Named groups of identifiers
use std::collections::{HashMap, HashSet};

/// A mapping from term name to the identifiers belonging to the term
///
/// Terms keep the order in which they were first inserted, and each
/// identifier appears at most once per term.
///
/// A [`Grouping`] is most easily built from `(term, identifier)` rows:
///
/// ```
/// use setenrich::Grouping;
///
/// let grouping: Grouping = [
///     ("apoptosis", "TP53"),
///     ("apoptosis", "BAX"),
///     ("dna_repair", "BRCA1"),
///     ("apoptosis", "TP53"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(grouping.len(), 2);
/// assert_eq!(grouping.get("apoptosis").unwrap().len(), 2);
///
/// let terms: Vec<&str> = grouping.iter().map(|(term, _)| term).collect();
/// assert_eq!(terms, vec!["apoptosis", "dna_repair"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Grouping {
    terms: Vec<(String, HashSet<String>)>,
    index: HashMap<String, usize>,
}

impl Grouping {
    /// Constructs a new, empty [`Grouping`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term without members, if not already present
    ///
    /// Returns the members of the term
    pub fn insert_term<T: Into<String>>(&mut self, term: T) -> &mut HashSet<String> {
        let term = term.into();
        let idx = match self.index.get(&term) {
            Some(idx) => *idx,
            None => {
                let idx = self.terms.len();
                self.index.insert(term.clone(), idx);
                self.terms.push((term, HashSet::new()));
                idx
            }
        };
        &mut self.terms[idx].1
    }

    /// Adds the identifier `id` to `term`
    ///
    /// Returns whether the identifier was newly added to the term
    pub fn insert<T: Into<String>, I: Into<String>>(&mut self, term: T, id: I) -> bool {
        self.insert_term(term).insert(id.into())
    }

    /// Returns the members of `term`
    ///
    /// Returns `None` if the term is not present
    pub fn get(&self, term: &str) -> Option<&HashSet<String>> {
        self.index.get(term).map(|idx| &self.terms[*idx].1)
    }

    /// Returns `true` if the grouping contains `term`
    pub fn contains_term(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Returns the number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the grouping contains no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns an iterator of all terms and their members, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<String>)> {
        self.terms
            .iter()
            .map(|(term, members)| (term.as_str(), members))
    }

    pub(crate) fn into_terms(self) -> Vec<(String, HashSet<String>)> {
        self.terms
    }
}

impl<T: Into<String>, I: Into<String>> FromIterator<(T, I)> for Grouping {
    fn from_iter<U: IntoIterator<Item = (T, I)>>(iter: U) -> Self {
        let mut grouping = Grouping::new();
        grouping.extend(iter);
        grouping
    }
}

impl<T: Into<String>, I: Into<String>> Extend<(T, I)> for Grouping {
    fn extend<U: IntoIterator<Item = (T, I)>>(&mut self, iter: U) {
        for (term, id) in iter {
            self.insert(term, id);
        }
    }
}

impl From<HashMap<String, HashSet<String>>> for Grouping {
    /// Terms are ordered by name, since the map has no inherent order
    fn from(map: HashMap<String, HashSet<String>>) -> Self {
        let mut terms: Vec<(String, HashSet<String>)> = map.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, (term, _))| (term.clone(), idx))
            .collect();
        Self { terms, index }
    }
}
