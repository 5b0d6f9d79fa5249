//! JSON-file storage for quality-control inputs.
//!
//! - [`JsonRuleStore`]: the rules file, with add / update / remove
//! - [`JsonMappingStore`]: the department to diagnosis-keyword mapping
//! - [`load_config`]: optional matching configuration
//!
//! Both stores implement the repository traits from `mediqc-model`, so they
//! plug directly into `RuleEngine::evaluate_from`.

mod config;
mod error;
mod io;
mod mapping;
mod rules;

pub use config::{load_config, load_config_or_default};
pub use error::{Result, StoreError};
pub use mapping::JsonMappingStore;
pub use rules::{JsonRuleStore, generate_rule_id};
