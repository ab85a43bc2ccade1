//! Reference demographic rules for the Strata simulation engine.
//!
//! Provides ready-made rules that exercise the full stepping protocol:
//! mortality (survivors advance one age band), fertility (newborns land
//! in the infant band, split across unconstrained dimensions), and net
//! migration (generative, emitted per age × race slice).
//!
//! Rate tables are constructor-injected; `with_default_rates()`
//! constructors carry published England & Wales tables where available
//! and placeholder factors otherwise.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod age;
pub mod fertility;
pub mod migration;
pub mod mortality;

pub use fertility::{FertilityRule, RaceAdjustedFertilityRule};
pub use migration::NetMigrationRule;
pub use mortality::MortalityRule;
