//! Configuration options for rule evaluation.

use serde::{Deserialize, Serialize};

/// Field names and domain markers used by the special-cased relation checks.
///
/// Defaults reproduce the hospital's discharge-record layout; a deployment
/// with different column headers overrides them through [`QcConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingOptions {
    /// Department column.
    pub department_field: String,
    /// Diagnosis columns that trigger the department/diagnosis check.
    pub diagnosis_fields: Vec<String>,
    /// Age column.
    pub age_field: String,
    /// Suffix shared by all surgical departments.
    pub surgery_suffix: String,
    /// Substring marking an oncology diagnosis or keyword.
    pub oncology_marker: String,
    /// Department exempt from the oncology scan.
    pub oncology_department: String,
    /// Substring marking a pediatric department.
    pub pediatric_marker: String,
    /// Ages strictly above this limit do not belong in pediatrics.
    pub pediatric_age_limit: f64,
}

impl Default for MatchingOptions {
    fn default() -> Self {
        Self {
            department_field: "科室".to_string(),
            diagnosis_fields: vec!["入院诊断".to_string(), "主要诊断".to_string()],
            age_field: "年龄".to_string(),
            surgery_suffix: "外科".to_string(),
            oncology_marker: "癌".to_string(),
            oncology_department: "肿瘤科".to_string(),
            pediatric_marker: "儿科".to_string(),
            pediatric_age_limit: 14.0,
        }
    }
}

impl MatchingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_diagnosis_field(&self, field: &str) -> bool {
        self.diagnosis_fields.iter().any(|name| name == field)
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcConfig {
    pub matching: MatchingOptions,
}
