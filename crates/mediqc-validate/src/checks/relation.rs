//! Relation checks between two fields.

use mediqc_model::{Dataset, DepartmentMapping, MatchingOptions, RelationKind, RelationRule};
use tracing::debug;

use crate::ErrorSet;
use crate::error::EvaluationError;
use crate::matchers::{
    PairMode, ValuePair, age_department_mismatches, diagnosis_mismatches, value_pair_violations,
};

/// Runs the special-cased domain checks when the rule's field pair and tag
/// select one, otherwise the generic value-pair check.
pub fn check(
    rule: &RelationRule,
    dataset: &Dataset,
    mapping: &DepartmentMapping,
    options: &MatchingOptions,
) -> Result<ErrorSet, EvaluationError> {
    if is_diagnosis_check(rule, options) {
        return Ok(diagnosis_mismatches(
            dataset,
            &rule.field1,
            &rule.field2,
            mapping,
            options,
        ));
    }
    if is_age_check(rule, options) {
        return Ok(age_department_mismatches(
            dataset,
            &rule.field1,
            &rule.field2,
            options,
        ));
    }

    let pairs = ValuePair::parse_all(&rule.value_pairs)?;
    let mode = match rule.relation {
        RelationKind::Match => PairMode::Match,
        RelationKind::NotMatch => PairMode::NotMatch,
        RelationKind::MatchDiagnosis => {
            debug!(
                field1 = %rule.field1,
                field2 = %rule.field2,
                "match_diagnosis outside the department/diagnosis fields checks nothing"
            );
            return Ok(ErrorSet::new());
        }
    };
    Ok(value_pair_violations(
        dataset,
        &rule.field1,
        &rule.field2,
        &pairs,
        mode,
    ))
}

fn is_diagnosis_check(rule: &RelationRule, options: &MatchingOptions) -> bool {
    rule.relation == RelationKind::MatchDiagnosis
        && rule.field1 == options.department_field
        && options.is_diagnosis_field(&rule.field2)
}

fn is_age_check(rule: &RelationRule, options: &MatchingOptions) -> bool {
    rule.relation == RelationKind::NotMatch
        && rule.field1 == options.age_field
        && rule.field2 == options.department_field
}
