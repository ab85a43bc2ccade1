//! Startup validation of a rule set against the declared domain.

use crate::rule::{GenerativeRule, TransferRule};
use std::error::Error;
use std::fmt;
use strata_core::TagDomain;

/// Errors detected while validating a rule set at configuration time.
///
/// A rule naming a dimension the domain never declares could not apply
/// to any cohort, ever; that is a wiring mistake, surfaced here rather
/// than silently no-oping every step. (At step time, by contrast, unmet
/// preconditions remain normal no-ops.)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleSetError {
    /// A rule's `required_tags` or `apply_to` names an undeclared
    /// dimension.
    UnknownDimension {
        /// The offending rule.
        rule: String,
        /// The undeclared dimension.
        dimension: String,
    },
    /// A rule's `apply_to` fixes a value the dimension never declares.
    UnknownValue {
        /// The offending rule.
        rule: String,
        /// The dimension whose value is undeclared.
        dimension: String,
        /// The undeclared value.
        value: String,
    },
}

impl fmt::Display for RuleSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDimension { rule, dimension } => {
                write!(f, "rule '{rule}' names undeclared dimension '{dimension}'")
            }
            Self::UnknownValue {
                rule,
                dimension,
                value,
            } => {
                write!(
                    f,
                    "rule '{rule}' filters on '{dimension}={value}', which the domain never declares"
                )
            }
        }
    }
}

impl Error for RuleSetError {}

/// Validate every rule's declared dimensions against `domain`.
///
/// Checks, for each transfer rule, that `required_tags` and the
/// `apply_to` pre-filter only name declared dimensions and declared
/// values; for each generative rule, that `required_tags` only names
/// declared dimensions. Called once by the engine constructor.
pub fn validate_rules(
    transfer_rules: &[Box<dyn TransferRule>],
    generative_rules: &[Box<dyn GenerativeRule>],
    domain: &TagDomain,
) -> Result<(), RuleSetError> {
    for rule in transfer_rules {
        for dimension in rule.required_tags() {
            if !domain.contains(&dimension) {
                return Err(RuleSetError::UnknownDimension {
                    rule: rule.name().to_string(),
                    dimension,
                });
            }
        }
        for (dimension, value) in rule.apply_to().iter() {
            match domain.values(dimension) {
                None => {
                    return Err(RuleSetError::UnknownDimension {
                        rule: rule.name().to_string(),
                        dimension: dimension.to_string(),
                    })
                }
                Some(declared) if !declared.iter().any(|v| v == value) => {
                    return Err(RuleSetError::UnknownValue {
                        rule: rule.name().to_string(),
                        dimension: dimension.to_string(),
                        value: value.to_string(),
                    })
                }
                Some(_) => {}
            }
        }
    }
    for rule in generative_rules {
        for dimension in rule.required_tags() {
            if !domain.contains(&dimension) {
                return Err(RuleSetError::UnknownDimension {
                    rule: rule.name().to_string(),
                    dimension,
                });
            }
        }
    }
    Ok(())
}
