//! The reference population of identifiers and groups of interned identifiers
use std::collections::HashMap;
use std::fmt::Display;

use smallvec::SmallVec;

use crate::DEFAULT_NUM_MEMBERS;

/// A dense handle for an identifier of a [`ReferenceSet`]
///
/// `MemberId`s are handed out in insertion order, starting at 0.
#[derive(Clone, Copy, Default, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct MemberId {
    inner: usize,
}

impl MemberId {
    /// Returns the index of the identifier within its [`ReferenceSet`]
    pub fn as_usize(&self) -> usize {
        self.inner
    }
}

impl From<usize> for MemberId {
    fn from(inner: usize) -> Self {
        MemberId { inner }
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MemberId:{}", self.inner)
    }
}

/// The background population of identifiers
///
/// Every identifier is interned to a [`MemberId`], so that term and query
/// sets can be compared as sorted integer groups.
///
/// # Examples
///
/// ```
/// use setenrich::ReferenceSet;
///
/// let mut reference = ReferenceSet::new();
/// assert!(reference.insert("BRCA1"));
/// assert!(reference.insert("TP53"));
/// assert!(!reference.insert("BRCA1"));
///
/// assert_eq!(reference.len(), 2);
/// assert!(reference.contains("TP53"));
/// assert_eq!(reference.member("TP53").unwrap().as_usize(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ReferenceSet {
    ids: HashMap<String, MemberId>,
}

impl ReferenceSet {
    /// Constructs a new, empty [`ReferenceSet`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an identifier to the reference set
    ///
    /// Returns whether the identifier was newly inserted.
    pub fn insert<S: Into<String>>(&mut self, id: S) -> bool {
        let next = MemberId::from(self.ids.len());
        let mut inserted = false;
        self.ids.entry(id.into()).or_insert_with(|| {
            inserted = true;
            next
        });
        inserted
    }

    /// Returns `true` if the identifier is part of the reference set
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Returns the [`MemberId`] of the identifier
    ///
    /// Returns `None` if the identifier is not part of the reference set
    pub fn member(&self, id: &str) -> Option<MemberId> {
        self.ids.get(id).copied()
    }

    /// Returns the number of identifiers in the reference set
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the reference set contains no identifiers
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns an iterator of all identifiers, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// Interns all identifiers into an [`IdGroup`]
    ///
    /// # Errors
    ///
    /// Returns the first identifier that is not part of the reference set
    pub(crate) fn group<I, S>(&self, ids: I) -> Result<IdGroup, S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let iter = ids.into_iter();
        let mut group = IdGroup::with_capacity(iter.size_hint().0);
        for id in iter {
            match self.member(id.as_ref()) {
                Some(member) => {
                    group.insert(member);
                }
                None => return Err(id),
            }
        }
        Ok(group)
    }
}

impl<S: Into<String>> FromIterator<S> for ReferenceSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut reference = ReferenceSet::new();
        reference.extend(iter);
        reference
    }
}

impl<S: Into<String>> Extend<S> for ReferenceSet {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

/// A set of [`MemberId`]s
///
/// Each id can occur only once in the group. The ids are kept sorted,
/// so that the overlap of two groups can be counted in linear time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IdGroup {
    ids: SmallVec<[MemberId; DEFAULT_NUM_MEMBERS]>,
}

impl IdGroup {
    /// Constructs a new, empty [`IdGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`IdGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`MemberId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`MemberId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`MemberId`] to the group
    ///
    /// Returns whether the `MemberId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `MemberId`, true is returned.
    /// - If the group already contained this `MemberId`, false is returned.
    ///
    pub fn insert(&mut self, id: MemberId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the [`MemberId`]
    pub fn contains(&self, id: &MemberId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an iterator of the [`MemberId`]s, in ascending order
    pub fn iter(&self) -> std::slice::Iter<'_, MemberId> {
        self.ids.iter()
    }

    /// Returns the number of [`MemberId`]s present in both groups
    pub fn intersection_len(&self, other: &IdGroup) -> usize {
        let mut lhs = self.ids.iter().peekable();
        let mut rhs = other.ids.iter().peekable();
        let mut count = 0;
        while let (Some(a), Some(b)) = (lhs.peek(), rhs.peek()) {
            match a.cmp(b) {
                std::cmp::Ordering::Less => {
                    lhs.next();
                }
                std::cmp::Ordering::Greater => {
                    rhs.next();
                }
                std::cmp::Ordering::Equal => {
                    count += 1;
                    lhs.next();
                    rhs.next();
                }
            }
        }
        count
    }
}

impl FromIterator<MemberId> for IdGroup {
    fn from_iter<T: IntoIterator<Item = MemberId>>(iter: T) -> Self {
        let mut group = IdGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a IdGroup {
    type Item = &'a MemberId;
    type IntoIter = std::slice::Iter<'a, MemberId>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn intern_in_insertion_order() {
        let reference: ReferenceSet = ["a", "b", "a", "c"].into_iter().collect();
        assert_eq!(reference.len(), 3);
        assert_eq!(reference.member("a"), Some(MemberId::from(0usize)));
        assert_eq!(reference.member("b"), Some(MemberId::from(1usize)));
        assert_eq!(reference.member("c"), Some(MemberId::from(2usize)));
        assert!(reference.member("d").is_none());
    }

    #[test]
    fn group_deduplicates() {
        let reference: ReferenceSet = ["a", "b", "c"].into_iter().collect();
        let group = reference.group(["c", "a", "c", "a"]).unwrap();
        assert_eq!(group.len(), 2);
        let ids: Vec<usize> = group.iter().map(MemberId::as_usize).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn group_rejects_unknown() {
        let reference: ReferenceSet = ["a", "b", "c"].into_iter().collect();
        assert_eq!(reference.group(["a", "x", "y"]).unwrap_err(), "x");
    }

    #[test]
    fn insert_keeps_order() {
        let mut group = IdGroup::new();
        assert!(group.insert(MemberId::from(5usize)));
        assert!(group.insert(MemberId::from(1usize)));
        assert!(group.insert(MemberId::from(3usize)));
        assert!(!group.insert(MemberId::from(1usize)));
        let ids: Vec<usize> = group.iter().map(MemberId::as_usize).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert!(group.contains(&MemberId::from(3usize)));
        assert!(!group.contains(&MemberId::from(4usize)));
    }

    #[test]
    fn intersection() {
        let a: IdGroup = [1usize, 2, 3, 7, 9].into_iter().map(MemberId::from).collect();
        let b: IdGroup = [0usize, 2, 3, 4, 9, 11].into_iter().map(MemberId::from).collect();
        assert_eq!(a.intersection_len(&b), 3);
        assert_eq!(b.intersection_len(&a), 3);
        assert_eq!(a.intersection_len(&IdGroup::new()), 0);
        assert_eq!(a.intersection_len(&a), 5);
    }

    #[test]
    fn spills_to_heap() {
        let group: IdGroup = (0..DEFAULT_NUM_MEMBERS * 3)
            .rev()
            .map(MemberId::from)
            .collect();
        assert_eq!(group.len(), DEFAULT_NUM_MEMBERS * 3);
        assert_eq!(group.iter().next(), Some(&MemberId::from(0usize)));
    }
}
