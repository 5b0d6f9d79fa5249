//! Medical record quality-control rule evaluation.
//!
//! ```ignore
//! use mediqc_validate::RuleEngine;
//!
//! let violations = RuleEngine::new().evaluate(&dataset, &rules, &mapping);
//! for violation in &violations {
//!     println!("{}: {:?}", violation.rule_name, violation.error_indices);
//! }
//! ```

pub mod checks;
pub mod compare;
mod engine;
mod error;
pub mod matchers;

use std::collections::BTreeSet;

pub use engine::RuleEngine;
pub use error::{EvaluationError, ValidateError};

/// Record indices violating one rule; ordered and deduplicated.
pub type ErrorSet = BTreeSet<usize>;
