//! The cohort index: forward map plus per-(dimension, value) inverted
//! index.
//!
//! The forward map owns every live cohort keyed by canonical
//! serialization; the inverted index answers slice queries without
//! scanning all cohorts. Both grow monotonically — cohorts are never
//! deleted, so the index needs no eviction or cleanup path.

use indexmap::{IndexMap, IndexSet};
use std::error::Error;
use std::fmt;
use strata_core::{Cohort, CohortKey, Condition, TagDomain, Tags};

/// Errors from direct index mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// A cohort with the same canonical key is already present.
    DuplicateKey {
        /// The colliding key.
        key: CohortKey,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key } => write!(f, "cohort '{key}' already exists"),
        }
    }
}

impl Error for IndexError {}

/// Owns the full set of live cohorts and the inverted index over their
/// tags.
///
/// Invariant: for every cohort, every `(dimension, value)` pair of its
/// assignment has an inverted-index entry pointing back at the cohort's
/// key, and no entry points at an absent key. All mutation goes through
/// [`insert`](Self::insert) and [`get_or_insert`](Self::get_or_insert),
/// which maintain both structures together.
///
/// Iteration and filtering follow cohort insertion order, so results
/// are deterministic across identical runs.
pub struct CohortIndex {
    cohorts: IndexMap<CohortKey, Cohort>,
    by_tag: IndexMap<String, IndexMap<String, IndexSet<CohortKey>>>,
}

impl CohortIndex {
    /// Create an empty index with an inverted-index slot per declared
    /// dimension.
    pub fn new(domain: &TagDomain) -> Self {
        Self {
            cohorts: IndexMap::new(),
            by_tag: domain
                .dimensions()
                .map(|(dimension, _)| (dimension.to_string(), IndexMap::new()))
                .collect(),
        }
    }

    /// Number of live cohorts.
    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    /// Whether the index holds no cohorts.
    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    /// Whether a cohort with `key` exists.
    pub fn contains(&self, key: &CohortKey) -> bool {
        self.cohorts.contains_key(key)
    }

    /// Look up a cohort by canonical key.
    pub fn get(&self, key: &CohortKey) -> Option<&Cohort> {
        self.cohorts.get(key)
    }

    /// Iterate over `(key, cohort)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&CohortKey, &Cohort)> {
        self.cohorts.iter()
    }

    /// Add a new cohort, updating every inverted-index entry for its
    /// tags.
    ///
    /// Fails if the canonical key already exists; callers wanting
    /// insert-if-absent semantics use [`get_or_insert`](Self::get_or_insert).
    pub fn insert(&mut self, cohort: Cohort) -> Result<(), IndexError> {
        let key = cohort.key();
        if self.cohorts.contains_key(&key) {
            return Err(IndexError::DuplicateKey { key });
        }
        self.link_tags(&key, cohort.tags());
        self.cohorts.insert(key, cohort);
        Ok(())
    }

    /// Look up the cohort for `tags`, lazily materializing it with zero
    /// population when absent.
    ///
    /// Returns the cohort and whether it was created by this call.
    pub(crate) fn get_or_insert(&mut self, tags: Tags) -> (&mut Cohort, bool) {
        let key = tags.canonical_key();
        let created = !self.cohorts.contains_key(&key);
        if created {
            self.link_tags(&key, &tags);
        }
        let cohort = self
            .cohorts
            .entry(key)
            .or_insert_with(|| Cohort::new(tags, 0));
        (cohort, created)
    }

    fn link_tags(&mut self, key: &CohortKey, tags: &Tags) {
        for (dimension, value) in tags.iter() {
            self.by_tag
                .entry(dimension.to_string())
                .or_default()
                .entry(value.to_string())
                .or_default()
                .insert(key.clone());
        }
    }

    /// All cohorts whose assignment is a superset of `condition`.
    ///
    /// Starts from the universal key set and intersects with the
    /// inverted-index entry for each `(dimension, value)` pair of the
    /// condition. The empty condition returns every cohort; a pair never
    /// seen by the index short-circuits to the empty result.
    pub fn filter(&self, condition: &Condition) -> Vec<&Cohort> {
        self.filter_keys(condition)
            .into_iter()
            .filter_map(|key| self.cohorts.get(&key))
            .collect()
    }

    /// [`filter`](Self::filter), returning owned keys.
    ///
    /// The engine snapshots a rule's matching key set with this before
    /// applying the rule, so cohorts materialized by the rule's own
    /// contributions are not revisited within the same pass.
    pub fn filter_keys(&self, condition: &Condition) -> Vec<CohortKey> {
        let mut result: Vec<&CohortKey> = self.cohorts.keys().collect();
        for (dimension, value) in condition.iter() {
            match self.by_tag.get(dimension).and_then(|values| values.get(value)) {
                Some(keys) => result.retain(|key| keys.contains(*key)),
                None => return Vec::new(),
            }
        }
        result.into_iter().cloned().collect()
    }

    /// Commit every cohort: swap pending into current, clear pending.
    pub(crate) fn commit_all(&mut self) {
        for cohort in self.cohorts.values_mut() {
            cohort.commit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap as Map;
    use proptest::prelude::*;

    fn domain() -> TagDomain {
        TagDomain::new(Map::from([
            ("age".to_string(), vec!["0-10".to_string(), "10-20".to_string()]),
            ("gender".to_string(), vec!["M".to_string(), "F".to_string()]),
        ]))
        .unwrap()
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs.iter().copied().collect()
    }

    fn seeded() -> CohortIndex {
        let d = domain();
        let mut index = CohortIndex::new(&d);
        for full in d.expand(&Condition::new()) {
            index.insert(Cohort::new(full, 100)).unwrap();
        }
        index
    }

    #[test]
    fn insert_rejects_duplicate_key() {
        let mut index = CohortIndex::new(&domain());
        let a = tags(&[("age", "0-10"), ("gender", "M")]);
        let b = tags(&[("gender", "M"), ("age", "0-10")]);
        index.insert(Cohort::new(a, 1)).unwrap();
        let err = index.insert(Cohort::new(b.clone(), 2)).unwrap_err();
        assert_eq!(
            err,
            IndexError::DuplicateKey {
                key: b.canonical_key()
            }
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn empty_condition_returns_all() {
        let index = seeded();
        assert_eq!(index.filter(&Condition::new()).len(), 4);
    }

    #[test]
    fn filter_intersects_pairs() {
        let index = seeded();
        let hit = index.filter(&tags(&[("age", "0-10"), ("gender", "F")]));
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].tags().get("gender"), Some("F"));
    }

    #[test]
    fn unseen_value_short_circuits_to_empty() {
        let index = seeded();
        assert!(index.filter(&tags(&[("age", "90-100")])).is_empty());
    }

    #[test]
    fn undeclared_dimension_matches_nothing() {
        let index = seeded();
        assert!(index.filter(&tags(&[("planet", "earth")])).is_empty());
    }

    #[test]
    fn get_or_insert_materializes_once() {
        let mut index = CohortIndex::new(&domain());
        let t = tags(&[("age", "0-10"), ("gender", "M")]);
        let (cohort, created) = index.get_or_insert(t.clone());
        assert!(created);
        assert_eq!(cohort.current(), 0);
        let (_, created_again) = index.get_or_insert(t.clone());
        assert!(!created_again);
        assert_eq!(index.len(), 1);
        // Lazily created cohorts are reachable through the inverted index.
        assert_eq!(index.filter(&tags(&[("age", "0-10")])).len(), 1);
    }

    fn arb_assignments() -> impl Strategy<Value = Vec<Vec<(String, String)>>> {
        proptest::collection::vec(
            proptest::collection::vec(("[ab]", "[xyz]"), 2..3),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn filter_equals_naive_subset_scan(
            assignments in arb_assignments(),
            cond_pairs in proptest::collection::vec(("[ab]", "[xyz]"), 0..3),
        ) {
            let d = TagDomain::new(Map::from([
                ("a".to_string(), vec!["x".to_string(), "y".to_string(), "z".to_string()]),
                ("b".to_string(), vec!["x".to_string(), "y".to_string(), "z".to_string()]),
            ]))
            .unwrap();
            let mut index = CohortIndex::new(&d);
            for pairs in assignments {
                let t: Tags = pairs.into_iter().collect();
                let _ = index.insert(Cohort::new(t, 1));
            }
            let condition: Condition = cond_pairs.into_iter().collect();

            let filtered: Vec<CohortKey> =
                index.filter(&condition).iter().map(|c| c.key()).collect();
            let naive: Vec<CohortKey> = index
                .iter()
                .filter(|(_, c)| condition.is_subset_of(c.tags()))
                .map(|(k, _)| k.clone())
                .collect();
            prop_assert_eq!(filtered, naive);
        }
    }
}
