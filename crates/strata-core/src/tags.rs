//! Tag assignments, partial conditions, and canonical cohort keys.
//!
//! A [`Tags`] value maps dimension names to values. A *full* assignment
//! carries exactly one value per dimension of the governing
//! [`TagDomain`](crate::TagDomain) and identifies a cohort; a *partial*
//! assignment (aliased as [`Condition`]) addresses a whole slice of
//! cohort-space and is expanded or matched against full assignments.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::fmt;

/// Separator between `dim=value` pairs in a canonical key.
pub const KEY_PAIR_SEPARATOR: char = ';';

/// Separator between a dimension name and its value in a canonical key.
pub const KEY_VALUE_SEPARATOR: char = '=';

// ── Tags ───────────────────────────────────────────────────────────

/// An assignment of values to dimensions, in insertion order.
///
/// Equality ignores insertion order: two assignments with identical
/// `(dimension, value)` pairs compare equal and serialize to the same
/// [`CohortKey`] regardless of how they were built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tags {
    entries: IndexMap<String, String>,
}

/// A partial tag assignment used to select or address a slice of
/// cohort-space.
///
/// Structurally identical to [`Tags`]; the alias marks intent at API
/// boundaries (rule pre-filters, contribution destinations).
pub type Condition = Tags;

impl Tags {
    /// Create an empty assignment.
    ///
    /// As a [`Condition`], the empty assignment is unconstrained and
    /// matches every cohort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `dimension` to `value`, replacing any existing value.
    pub fn insert(&mut self, dimension: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(dimension.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// Replacing an existing dimension keeps its position, so overriding
    /// one value of a cloned assignment (e.g. advancing an age band while
    /// keeping every other tag) preserves the source layout.
    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(dimension, value);
        self
    }

    /// The value assigned to `dimension`, if any.
    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.entries.get(dimension).map(String::as_str)
    }

    /// Whether `dimension` is assigned.
    pub fn contains(&self, dimension: &str) -> bool {
        self.entries.contains_key(dimension)
    }

    /// Number of assigned dimensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dimension is assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(dimension, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether every pair of `self` appears in `other`.
    ///
    /// This is the condition-matching test: a cohort with tags `t`
    /// satisfies condition `c` exactly when `c.is_subset_of(t)`.
    /// The empty assignment is a subset of everything.
    pub fn is_subset_of(&self, other: &Tags) -> bool {
        self.iter().all(|(dim, value)| other.get(dim) == Some(value))
    }

    /// The canonical key for this assignment.
    ///
    /// Pairs are sorted by dimension name and encoded `dim=value`,
    /// joined by `;`. The encoding is a total, deterministic function of
    /// the pair set: identical pair sets produce byte-identical keys and
    /// differing sets never collide, provided names and values are free
    /// of the separator characters (enforced by
    /// [`TagDomain`](crate::TagDomain) validation).
    pub fn canonical_key(&self) -> CohortKey {
        let mut pairs: SmallVec<[(&str, &str); 8]> =
            self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        pairs.sort_unstable();

        let cap: usize = pairs.iter().map(|(k, v)| k.len() + v.len() + 2).sum();
        let mut encoded = String::with_capacity(cap);
        for (i, (dim, value)) in pairs.iter().enumerate() {
            if i > 0 {
                encoded.push(KEY_PAIR_SEPARATOR);
            }
            encoded.push_str(dim);
            encoded.push(KEY_VALUE_SEPARATOR);
            encoded.push_str(value);
        }
        CohortKey(encoded)
    }
}

impl FromIterator<(String, String)> for Tags {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Tags {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_key())
    }
}

// ── CohortKey ──────────────────────────────────────────────────────

/// The canonical serialization of a tag assignment.
///
/// Sole means of cohort lookup and identity. Built via
/// [`Tags::canonical_key`]; the format is stable and documented there,
/// so keys remain comparable across runs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CohortKey(String);

impl CohortKey {
    /// The encoded key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
