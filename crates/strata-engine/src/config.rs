//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder-input for constructing an [`Engine`].
//! [`validate()`](SimConfig::validate) checks structural invariants at
//! startup: seed assignments must fit the declared schema and every
//! rule must be wired to declared dimensions.
//!
//! [`Engine`]: crate::Engine

use std::error::Error;
use std::fmt;

use strata_core::{CohortKey, SchemaError, TagDomain, Tags};
use strata_rule::{validate_rules, GenerativeRule, RuleSetError, TransferRule};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Debug)]
pub enum ConfigError {
    /// A seed assignment does not fit the declared schema.
    Schema(SchemaError),
    /// Rule-set validation failed.
    Rules(RuleSetError),
    /// Two seed entries serialize to the same canonical key.
    DuplicateSeed {
        /// The colliding key.
        key: CohortKey,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "seed: {e}"),
            Self::Rules(e) => write!(f, "rules: {e}"),
            Self::DuplicateSeed { key } => write!(f, "seed '{key}' appears twice"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            Self::Rules(e) => Some(e),
            Self::DuplicateSeed { .. } => None,
        }
    }
}

impl From<SchemaError> for ConfigError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

impl From<RuleSetError> for ConfigError {
    fn from(e: RuleSetError) -> Self {
        Self::Rules(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for constructing a simulation engine.
///
/// The domain is validated at its own construction; `validate()` here
/// checks everything that spans components: seeds against the schema,
/// rules against the domain.
pub struct SimConfig {
    /// The declared tag schema. Immutable for the engine's lifetime.
    pub domain: TagDomain,
    /// Initial `(assignment, population)` pairs. Each assignment must
    /// cover every domain dimension exactly once.
    pub seeds: Vec<(Tags, u64)>,
    /// Transfer rules, executed in this order each step.
    pub transfer_rules: Vec<Box<dyn TransferRule>>,
    /// Generative rules, executed after all transfer rules, in this
    /// order.
    pub generative_rules: Vec<Box<dyn GenerativeRule>>,
}

impl SimConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for (tags, _) in &self.seeds {
            self.domain.check_assignment(tags)?;
            let key = tags.canonical_key();
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateSeed { key });
            }
        }
        validate_rules(&self.transfer_rules, &self.generative_rules, &self.domain)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn domain() -> TagDomain {
        TagDomain::new(IndexMap::from([
            ("age".to_string(), vec!["0-10".to_string(), "10-20".to_string()]),
            ("gender".to_string(), vec!["M".to_string(), "F".to_string()]),
        ]))
        .unwrap()
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs.iter().copied().collect()
    }

    #[test]
    fn accepts_full_seed_assignments() {
        let config = SimConfig {
            domain: domain(),
            seeds: vec![(tags(&[("age", "0-10"), ("gender", "M")]), 100)],
            transfer_rules: Vec::new(),
            generative_rules: Vec::new(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_partial_seed_assignment() {
        let config = SimConfig {
            domain: domain(),
            seeds: vec![(tags(&[("age", "0-10")]), 100)],
            transfer_rules: Vec::new(),
            generative_rules: Vec::new(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Schema(SchemaError::DimensionCountMismatch {
                expected: 2,
                found: 1
            }))
        ));
    }

    #[test]
    fn rejects_duplicate_seed_under_reordering() {
        let config = SimConfig {
            domain: domain(),
            seeds: vec![
                (tags(&[("age", "0-10"), ("gender", "M")]), 100),
                (tags(&[("gender", "M"), ("age", "0-10")]), 50),
            ],
            transfer_rules: Vec::new(),
            generative_rules: Vec::new(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateSeed { .. })
        ));
    }
}
