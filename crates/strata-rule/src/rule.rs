//! The [`TransferRule`] and [`GenerativeRule`] traits.

use crate::contribution::Contribution;
use strata_core::{Cohort, Condition, TagDomain, Tags};

/// A cohort-scoped rule moving population out of an existing cohort.
///
/// # Contract
///
/// - `apply()` MUST be deterministic: the same cohort state produces the
///   same result.
/// - `apply()` never mutates the cohort; it reads `current()` and
///   returns data. The engine alone applies effects.
/// - `apply()` MUST begin by checking [`tags_satisfied`](Self::tags_satisfied)
///   and return `None` when the check fails. `None` is the normal no-op
///   signal — for an unmet precondition or a business condition that
///   does not apply (wrong gender for a fertility rule, terminal age
///   band for a mortality rule) — never an error.
///
/// # Object safety
///
/// This trait is object-safe; the engine stores rules as
/// `Vec<Box<dyn TransferRule>>` and runs them in declared order.
///
/// # Examples
///
/// A rule that moves everyone from one band to another:
///
/// ```
/// use strata_core::{Cohort, Condition};
/// use strata_rule::{Contribution, TransferRule};
///
/// struct Promote;
///
/// impl TransferRule for Promote {
///     fn name(&self) -> &str { "promote" }
///
///     fn required_tags(&self) -> Vec<String> { vec!["band".to_string()] }
///
///     fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
///         if !self.tags_satisfied(cohort.tags()) {
///             return None;
///         }
///         if cohort.tags().get("band") != Some("junior") {
///             return None;
///         }
///         let destination = cohort.tags().clone().with("band", "senior");
///         Some(Contribution::new(destination, cohort.current() as i64))
///     }
/// }
///
/// let cohort = Cohort::new([("band", "junior")].into_iter().collect(), 10);
/// let moved = Promote.apply(&cohort).unwrap();
/// assert_eq!(moved.amount, 10);
/// ```
pub trait TransferRule: Send + 'static {
    /// Human-readable name for reporting and telemetry.
    fn name(&self) -> &str;

    /// Dimension names this rule reads from a cohort's assignment.
    ///
    /// Called at configuration validation, not per-step.
    fn required_tags(&self) -> Vec<String>;

    /// Pre-filter condition selecting the cohorts this rule visits.
    ///
    /// Default: unconstrained (every cohort).
    fn apply_to(&self) -> Condition {
        Condition::new()
    }

    /// Evaluate the rule against one cohort.
    ///
    /// Returns the destination condition and the population moving out
    /// of this cohort, or `None` when the rule does not apply.
    fn apply(&self, cohort: &Cohort) -> Option<Contribution>;

    /// Whether `tags` carries every dimension in
    /// [`required_tags`](Self::required_tags).
    fn tags_satisfied(&self, tags: &Tags) -> bool {
        self.required_tags()
            .iter()
            .all(|dimension| tags.contains(dimension))
    }
}

/// A domain-scoped rule producing contributions independent of any
/// existing cohort.
///
/// Derives its output purely from the declared [`TagDomain`] — e.g. net
/// migration emitted per age band regardless of whether the destination
/// cohort currently exists. Runs after every transfer rule in the step.
///
/// # Contract
///
/// Same determinism and purity requirements as [`TransferRule`];
/// an unmet [`domain_satisfied`](Self::domain_satisfied) check yields an
/// empty result, never an error.
pub trait GenerativeRule: Send + 'static {
    /// Human-readable name for reporting and telemetry.
    fn name(&self) -> &str;

    /// Dimension names this rule requires the domain to declare.
    fn required_tags(&self) -> Vec<String>;

    /// Produce the rule's contributions for one step.
    fn apply(&self, domain: &TagDomain) -> Vec<Contribution>;

    /// Whether `domain` declares every dimension in
    /// [`required_tags`](Self::required_tags).
    fn domain_satisfied(&self, domain: &TagDomain) -> bool {
        self.required_tags()
            .iter()
            .all(|dimension| domain.contains(dimension))
    }
}
