use thiserror::Error;

/// A rule definition that cannot be evaluated against any dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule '{rule}' references an empty field name")]
    EmptyField { rule: String },
    #[error("relation rule '{rule}' must reference two distinct fields, got '{field}' twice")]
    SameRelationFields { rule: String, field: String },
}
