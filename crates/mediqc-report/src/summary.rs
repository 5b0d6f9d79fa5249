//! Aggregate view over a violation list.

use std::collections::BTreeSet;

use mediqc_model::Violation;
use serde::Serialize;

/// Totals for one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Records in the evaluated dataset.
    pub total_records: usize,
    /// Rules that flagged at least one record.
    pub violated_rules: usize,
    /// Sum of per-rule error counts; a record flagged by two rules counts twice.
    pub total_errors: usize,
    /// Distinct records flagged by any rule.
    pub flagged_records: usize,
}

impl ReportSummary {
    pub fn new(total_records: usize, violations: &[Violation]) -> Self {
        Self {
            total_records,
            violated_rules: violations.len(),
            total_errors: violations.iter().map(|v| v.error_count).sum(),
            flagged_records: flagged_records(violations).len(),
        }
    }

    /// Records no rule flagged.
    pub fn clean_records(&self) -> usize {
        self.total_records.saturating_sub(self.flagged_records)
    }

    pub fn is_clean(&self) -> bool {
        self.violated_rules == 0
    }
}

/// Union of the flagged record indices across all violations.
pub fn flagged_records(violations: &[Violation]) -> BTreeSet<usize> {
    violations
        .iter()
        .flat_map(|violation| violation.error_indices.iter().copied())
        .collect()
}
