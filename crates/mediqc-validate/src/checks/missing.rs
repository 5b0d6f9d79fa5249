//! Missing-value checks.

use mediqc_model::{Dataset, MissingRule};

use crate::ErrorSet;

/// `equals` flags empty fields; `not_equals` flags populated ones.
pub fn check(rule: &MissingRule, dataset: &Dataset) -> ErrorSet {
    let invert = rule.condition.inverts();
    dataset
        .iter()
        .filter(|(_, record)| record.get(&rule.field).is_empty() != invert)
        .map(|(index, _)| index)
        .collect()
}
