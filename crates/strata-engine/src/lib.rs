//! Simulation engine driving Strata cohort models.
//!
//! Provides the top-level [`Engine`] that owns the cohort index and runs
//! the Accumulate→Commit stepping cycle over a validated configuration
//! of transfer and generative rules.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod index;
pub mod metrics;

pub use config::{ConfigError, SimConfig};
pub use engine::Engine;
pub use index::{CohortIndex, IndexError};
pub use metrics::StepMetrics;
