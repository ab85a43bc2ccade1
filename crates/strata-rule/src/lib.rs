//! Rule traits and rule-set validation for Strata simulations.
//!
//! Rules are modular, stateless operators executed in sequence each
//! step. Transfer rules are cohort-scoped; generative rules are
//! domain-scoped. Both return contribution data and never mutate
//! population themselves.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod contribution;
pub mod rule;
pub mod validate;

pub use contribution::Contribution;
pub use rule::{GenerativeRule, TransferRule};
pub use validate::{validate_rules, RuleSetError};
