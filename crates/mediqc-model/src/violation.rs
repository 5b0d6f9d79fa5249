use serde::{Deserialize, Serialize};

/// All records breaking one rule.
///
/// `error_indices` are positional dataset indices, strictly increasing, so
/// that a renderer can re-join them with the original rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_name: String,
    pub message: String,
    pub error_count: usize,
    pub error_indices: Vec<usize>,
}

impl Violation {
    /// Builds a violation from an already ordered, deduplicated index list.
    pub fn new(
        rule_name: impl Into<String>,
        message: impl Into<String>,
        error_indices: Vec<usize>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            message: message.into(),
            error_count: error_indices.len(),
            error_indices,
        }
    }
}
