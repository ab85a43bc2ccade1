//! Strata: a discrete-time cohort simulation engine.
//!
//! A population is partitioned into disjoint cohorts, each identified
//! by one value per categorical dimension (age band, gender, …), and a
//! set of rules moves or creates population across cohorts on every
//! simulated step. The engine is domain-agnostic: callers supply the
//! tag schema and the rule set.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Strata sub-crates. For most users, adding `strata` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use indexmap::IndexMap;
//! use strata::prelude::*;
//!
//! // A rule that moves everyone from the junior band to the senior band.
//! struct Graduate;
//! impl TransferRule for Graduate {
//!     fn name(&self) -> &str { "graduate" }
//!     fn required_tags(&self) -> Vec<String> { vec!["band".to_string()] }
//!     fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
//!         if !self.tags_satisfied(cohort.tags()) {
//!             return None;
//!         }
//!         if cohort.tags().get("band") != Some("junior") {
//!             return None;
//!         }
//!         let destination = cohort.tags().clone().with("band", "senior");
//!         Some(Contribution::new(destination, cohort.current() as i64))
//!     }
//! }
//!
//! let domain = TagDomain::new(IndexMap::from([(
//!     "band".to_string(),
//!     vec!["junior".to_string(), "senior".to_string()],
//! )]))
//! .unwrap();
//!
//! let seeds = vec![(
//!     [("band", "junior")].into_iter().collect::<Tags>(),
//!     120,
//! )];
//!
//! let mut engine = Engine::new(SimConfig {
//!     domain,
//!     seeds,
//!     transfer_rules: vec![Box::new(Graduate)],
//!     generative_rules: vec![],
//! })
//! .unwrap();
//!
//! engine.step(1);
//! let seniors: Tags = [("band", "senior")].into_iter().collect();
//! assert_eq!(engine.population(&seniors.canonical_key()), Some(120));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Tags, keys, domains, cohorts, core errors |
//! | [`rule`] | `strata-rule` | Rule traits, contributions, rule-set validation |
//! | [`engine`] | `strata-engine` | Cohort index, configuration, stepping engine |
//! | [`rules`] | `strata-rules` | Reference demographic rules |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, keys, and errors (`strata-core`).
pub use strata_core as types;

/// Rule traits and validation (`strata-rule`).
pub use strata_rule as rule;

/// Cohort index, configuration, and the stepping engine
/// (`strata-engine`).
pub use strata_engine as engine;

/// Reference demographic rules (`strata-rules`).
pub use strata_rules as rules;

/// The most common imports, re-exported flat.
pub mod prelude {
    // Core types
    pub use strata_core::{Cohort, CohortKey, Condition, StepId, TagDomain, Tags};

    // Errors
    pub use strata_core::{DomainError, SchemaError};

    // Rule protocol
    pub use strata_rule::{Contribution, GenerativeRule, RuleSetError, TransferRule};

    // Engine
    pub use strata_engine::{ConfigError, Engine, SimConfig, StepMetrics};
}
