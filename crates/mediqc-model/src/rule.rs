//! Quality-control rule definitions.
//!
//! Rules are persisted as flat JSON objects tagged by `"type"`:
//!
//! ```json
//! {"id": "20240301120000", "name": "主要诊断缺失", "type": "missing",
//!  "message": "主要诊断不能为空", "field": "主要诊断", "condition": "equals"}
//! ```
//!
//! Every condition and relation tag is a closed enum; an unknown tag fails
//! deserialization of that one rule.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RuleError;

/// A persisted, user-authored validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Creation-time-ordered identifier (`%Y%m%d%H%M%S`).
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// User-facing text reported with every violation of this rule.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    #[serde(flatten)]
    pub kind: RuleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RuleKind {
    Missing(MissingRule),
    Logic(LogicRule),
    Relation(RelationRule),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingRule {
    pub field: String,
    pub condition: MissingCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicRule {
    pub field: String,
    pub condition: LogicCondition,
    /// Literal operand, or the name of another field for ordering checks.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRule {
    pub field1: String,
    pub field2: String,
    pub relation: RelationKind,
    /// Newline-separated `A=B` or `A=B1,B2` lines.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value_pairs: String,
}

/// Condition of a missing-value rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCondition {
    /// Flag records where the field is empty.
    Equals,
    /// Flag records where the field is not empty.
    NotEquals,
}

impl MissingCondition {
    /// Whether the error set is the complement of the emptiness mask.
    pub const fn inverts(self) -> bool {
        matches!(self, Self::NotEquals)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
        }
    }
}

/// Condition of a logic rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicCondition {
    Equals,
    NotEquals,
    /// Asserts `field > value`; the mask captures `field <= value`.
    GreaterThan,
    /// Asserts `field < value`; the mask captures `field >= value`.
    LessThan,
    Contains,
    NotContains,
}

impl LogicCondition {
    /// Whether the error set is the complement of the condition mask.
    pub const fn inverts(self) -> bool {
        matches!(self, Self::NotEquals | Self::NotContains)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
        }
    }
}

impl fmt::Display for LogicCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation tag of a relation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Match,
    NotMatch,
    /// Department/diagnosis compatibility via the department mapping.
    MatchDiagnosis,
}

impl RelationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::NotMatch => "not_match",
            Self::MatchDiagnosis => "match_diagnosis",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Rule {
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            RuleKind::Missing(_) => "missing",
            RuleKind::Logic(_) => "logic",
            RuleKind::Relation(_) => "relation",
        }
    }

    /// Fields that must exist in a dataset for this rule to apply.
    pub fn required_fields(&self) -> Vec<&str> {
        match &self.kind {
            RuleKind::Missing(rule) => vec![rule.field.as_str()],
            RuleKind::Logic(rule) => vec![rule.field.as_str()],
            RuleKind::Relation(rule) => vec![rule.field1.as_str(), rule.field2.as_str()],
        }
    }

    /// Checks the definition invariants that do not depend on data.
    pub fn validate(&self) -> Result<(), RuleError> {
        for field in self.required_fields() {
            if field.trim().is_empty() {
                return Err(RuleError::EmptyField {
                    rule: self.name.clone(),
                });
            }
        }
        if let RuleKind::Relation(rule) = &self.kind
            && rule.field1 == rule.field2
        {
            return Err(RuleError::SameRelationFields {
                rule: self.name.clone(),
                field: rule.field1.clone(),
            });
        }
        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
