//! Relation matchers: the generic value-pair matcher and the two
//! domain-specific cross-field checks.

use mediqc_model::{Dataset, DepartmentMapping, MatchingOptions};
use tracing::debug;

use crate::ErrorSet;
use crate::compare::{is_one_of, text_equals};
use crate::error::EvaluationError;

/// One `A=B` or `A=B1,B2` line of a relation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePair {
    /// Value of the first field that activates this pair.
    pub key: String,
    /// Accepted (for `match`) or forbidden (for `not_match`) second-field values.
    pub values: Vec<String>,
}

impl ValuePair {
    /// Parses newline-separated pairs. Blank lines are skipped; any other
    /// line must contain exactly one `=`.
    pub fn parse_all(raw: &str) -> Result<Vec<Self>, EvaluationError> {
        let mut pairs = Vec::new();
        for (idx, line) in raw.trim().split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(EvaluationError::MalformedValuePairs {
                    line_number: idx + 1,
                    line: line.trim().to_string(),
                });
            };
            let value = value.trim();
            let values = if value.contains(',') {
                value.split(',').map(|v| v.trim().to_string()).collect()
            } else {
                vec![value.to_string()]
            };
            pairs.push(Self {
                key: key.trim().to_string(),
                values,
            });
        }
        Ok(pairs)
    }
}

/// How the second field is judged once the first field matched a pair key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairMode {
    /// Flag when the second field is outside the pair's accepted values.
    Match,
    /// Flag when the second field is one of the pair's forbidden values.
    NotMatch,
}

/// Generic relation check: union over all pairs of the records whose first
/// field equals the pair key and whose second field breaks the pair.
pub fn value_pair_violations(
    dataset: &Dataset,
    field1: &str,
    field2: &str,
    pairs: &[ValuePair],
    mode: PairMode,
) -> ErrorSet {
    let mut errors = ErrorSet::new();
    for pair in pairs {
        for (index, record) in dataset.iter() {
            if !text_equals(record.get(field1), &pair.key) {
                continue;
            }
            let listed = is_one_of(record.get(field2), &pair.values);
            let flagged = match mode {
                PairMode::Match => !listed,
                PairMode::NotMatch => listed,
            };
            if flagged {
                errors.insert(index);
            }
        }
    }
    errors
}

/// Department/diagnosis compatibility.
///
/// Records with an empty department or diagnosis are skipped, and a
/// department absent from the mapping can never be flagged. Otherwise a
/// record is flagged unless its diagnosis mentions one of the department's
/// keywords, or, for a surgical department, one of a sibling surgical
/// department's keywords.
pub fn diagnosis_mismatches(
    dataset: &Dataset,
    department_field: &str,
    diagnosis_field: &str,
    mapping: &DepartmentMapping,
    options: &MatchingOptions,
) -> ErrorSet {
    let mut errors = ErrorSet::new();
    for (index, record) in dataset.iter() {
        let department = record.get(department_field);
        let diagnosis = record.get(diagnosis_field);
        if department.is_empty() || diagnosis.is_empty() {
            continue;
        }
        let department = department.as_text();
        let diagnosis = diagnosis.as_text();

        let Some(keywords) = mapping.keywords(&department) else {
            continue;
        };
        let mut matched = mentions_any(&diagnosis, keywords);

        if !matched && department.ends_with(options.surgery_suffix.as_str()) {
            matched = mapping
                .iter()
                .filter(|(name, _)| {
                    *name != &*department && name.ends_with(options.surgery_suffix.as_str())
                })
                .any(|(_, sibling)| mentions_any(&diagnosis, sibling));
        }

        // The oncology scan can only confirm a mismatch, never clear one.
        if !matched
            && diagnosis.contains(options.oncology_marker.as_str())
            && let Some(claimant) = oncology_claimant(&department, &diagnosis, mapping, options)
        {
            debug!(
                index,
                claimant, "oncology keyword belongs to another department"
            );
        }

        if !matched {
            errors.insert(index);
        }
    }
    errors
}

/// Age/department mismatch: adults registered in a pediatric department.
///
/// Ages that do not coerce to a number are never flagged.
pub fn age_department_mismatches(
    dataset: &Dataset,
    age_field: &str,
    department_field: &str,
    options: &MatchingOptions,
) -> ErrorSet {
    dataset
        .iter()
        .filter(|(_, record)| {
            let Some(age) = record.get(age_field).as_number() else {
                return false;
            };
            let department = record.get(department_field);
            age > options.pediatric_age_limit
                && !department.is_empty()
                && department
                    .as_text()
                    .contains(options.pediatric_marker.as_str())
        })
        .map(|(index, _)| index)
        .collect()
}

fn mentions_any(diagnosis: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| diagnosis.contains(keyword.as_str()))
}

/// First department other than `department` (and other than the oncology
/// department) owning an oncology keyword mentioned by the diagnosis.
fn oncology_claimant<'m>(
    department: &str,
    diagnosis: &str,
    mapping: &'m DepartmentMapping,
    options: &MatchingOptions,
) -> Option<&'m str> {
    mapping
        .iter()
        .find(|(name, keywords)| {
            *name != department
                && *name != options.oncology_department
                && keywords.iter().any(|keyword| {
                    keyword.contains(options.oncology_marker.as_str())
                        && diagnosis.contains(keyword.as_str())
                })
        })
        .map(|(name, _)| name)
}
