//! The contribution: a pending population effect.

use strata_core::Condition;

/// A pending `(condition, amount)` population delta produced by a rule.
///
/// The condition may be partial: the engine expands it over the tag
/// domain and splits `amount` evenly across every matched destination
/// (floor division; the remainder is dropped). Contributions are
/// ephemeral — consumed by the engine in the step that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    /// Destination slice of cohort-space, possibly partial.
    pub condition: Condition,
    /// Signed population delta to distribute across the destinations.
    pub amount: i64,
}

impl Contribution {
    /// Convenience constructor.
    pub fn new(condition: Condition, amount: i64) -> Self {
        Self { condition, amount }
    }
}
