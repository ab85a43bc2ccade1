//! Core types for the Strata cohort simulation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Strata workspace:
//! tag assignments and their canonical keys, the tag domain (the declared
//! schema of cohort-space), cohorts themselves, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cohort;
pub mod domain;
pub mod error;
pub mod id;
pub mod tags;

pub use cohort::Cohort;
pub use domain::TagDomain;
pub use error::{DomainError, SchemaError};
pub use id::StepId;
pub use tags::{CohortKey, Condition, Tags};
