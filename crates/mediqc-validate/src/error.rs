use std::error::Error;

use mediqc_model::RuleError;
use thiserror::Error;

/// Failure of a single rule. Never escapes [`RuleEngine::evaluate`](crate::RuleEngine::evaluate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    InvalidRule(#[from] RuleError),

    #[error("malformed value pair on line {line_number}: '{line}' (expected A=B or A=B1,B2)")]
    MalformedValuePairs { line_number: usize, line: String },
}

/// Failure at the API boundary: the inputs themselves could not be read.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("failed to load rules: {0}")]
    LoadRules(#[source] Box<dyn Error + Send + Sync>),

    #[error("failed to load department mapping: {0}")]
    LoadMapping(#[source] Box<dyn Error + Send + Sync>),
}
