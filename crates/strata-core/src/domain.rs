//! The declared schema of cohort-space and partial-condition expansion.

use crate::error::{DomainError, SchemaError};
use crate::tags::{Condition, Tags, KEY_PAIR_SEPARATOR, KEY_VALUE_SEPARATOR};
use indexmap::IndexMap;

/// The declared schema: for each dimension, the closed, ordered set of
/// legal values.
///
/// Dimension declaration order fixes the iteration order used by
/// [`expand`](Self::expand) (it affects only enumeration order, never
/// results). Immutable for the engine's lifetime.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use strata_core::TagDomain;
///
/// let domain = TagDomain::new(IndexMap::from([
///     ("age".to_string(), vec!["0-10".to_string(), "10-20".to_string()]),
///     ("gender".to_string(), vec!["M".to_string(), "F".to_string()]),
/// ]))
/// .unwrap();
/// assert_eq!(domain.dimension_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDomain {
    dimensions: IndexMap<String, Vec<String>>,
}

impl TagDomain {
    /// Construct a validated domain.
    ///
    /// Rejects empty dimension names, dimensions with no values,
    /// duplicate values within a dimension, and names or values carrying
    /// the canonical-key separator characters.
    pub fn new(dimensions: IndexMap<String, Vec<String>>) -> Result<Self, DomainError> {
        for (dimension, values) in &dimensions {
            if dimension.is_empty() {
                return Err(DomainError::EmptyDimensionName);
            }
            Self::check_reserved(dimension)?;
            if values.is_empty() {
                return Err(DomainError::NoValues {
                    dimension: dimension.clone(),
                });
            }
            for (i, value) in values.iter().enumerate() {
                Self::check_reserved(value)?;
                if values[..i].contains(value) {
                    return Err(DomainError::DuplicateValue {
                        dimension: dimension.clone(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(Self { dimensions })
    }

    fn check_reserved(text: &str) -> Result<(), DomainError> {
        if text.contains(KEY_VALUE_SEPARATOR) || text.contains(KEY_PAIR_SEPARATOR) {
            return Err(DomainError::ReservedCharacter {
                text: text.to_string(),
            });
        }
        Ok(())
    }

    /// Number of declared dimensions.
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// Whether `dimension` is declared.
    pub fn contains(&self, dimension: &str) -> bool {
        self.dimensions.contains_key(dimension)
    }

    /// The declared values for `dimension`, in declaration order.
    pub fn values(&self, dimension: &str) -> Option<&[String]> {
        self.dimensions.get(dimension).map(Vec::as_slice)
    }

    /// Iterate over `(dimension, values)` in declaration order.
    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.dimensions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Check that `tags` is a full assignment for this domain.
    ///
    /// Only the dimension count is checked, matching the identity rules
    /// of cohort keys: an assignment with the right number of dimensions
    /// is accepted even if individual values fall outside the declared
    /// sets.
    pub fn check_assignment(&self, tags: &Tags) -> Result<(), SchemaError> {
        if tags.len() != self.dimensions.len() {
            return Err(SchemaError::DimensionCountMismatch {
                expected: self.dimensions.len(),
                found: tags.len(),
            });
        }
        Ok(())
    }

    /// Expand a partial condition into every full assignment consistent
    /// with it.
    ///
    /// Breadth-first over the dimensions in declaration order: a
    /// dimension fixed by `condition` contributes its single value, a
    /// free dimension branches over every declared value. The result
    /// length is the product of the free dimensions' cardinalities; a
    /// fully-specified condition expands to exactly itself. Condition
    /// entries naming undeclared dimensions do not participate.
    pub fn expand(&self, condition: &Condition) -> Vec<Tags> {
        let mut frontier = vec![Tags::new()];
        for (dimension, values) in &self.dimensions {
            let fixed = condition.get(dimension);
            let branch = match fixed {
                Some(_) => 1,
                None => values.len(),
            };
            let mut grown = Vec::with_capacity(frontier.len() * branch);
            for partial in &frontier {
                match fixed {
                    Some(value) => grown.push(partial.clone().with(dimension, value)),
                    None => {
                        for value in values {
                            grown.push(partial.clone().with(dimension, value.as_str()));
                        }
                    }
                }
            }
            frontier = grown;
        }
        frontier
    }
}
