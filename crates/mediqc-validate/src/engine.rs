//! Rule engine: evaluates a rule list against one dataset.
//!
//! Each rule is evaluated independently through a `Result`-returning
//! function. A failing rule is logged and left out of the report; it never
//! aborts the batch.

use mediqc_model::{
    Dataset, DepartmentMapping, MappingRepository, MatchingOptions, Rule, RuleKind,
    RuleRepository, Violation,
};
use tracing::{debug, info, info_span, warn};

use crate::checks::{logic, missing, relation};
use crate::error::{EvaluationError, ValidateError};

/// Stateless evaluator; holds only the matching options, so one engine can
/// serve concurrent evaluations of different datasets.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    options: MatchingOptions,
}

impl RuleEngine {
    /// Create an engine with the default field names and markers.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MatchingOptions) -> Self {
        Self { options }
    }

    /// Evaluate every rule and return one violation per rule that flagged at
    /// least one record, in rule order.
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        rules: &[Rule],
        mapping: &DepartmentMapping,
    ) -> Vec<Violation> {
        let span = info_span!("evaluate", records = dataset.len(), rules = rules.len());
        let _guard = span.enter();

        let mut violations = Vec::new();
        for rule in rules {
            match self.evaluate_rule(dataset, rule, mapping) {
                Ok(Some(violation)) => {
                    debug!(
                        rule = %rule.name,
                        errors = violation.error_count,
                        "rule flagged records"
                    );
                    violations.push(violation);
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(rule = %rule.name, kind = rule.kind_label(), %error, "rule skipped");
                }
            }
        }

        info!(violations = violations.len(), "evaluation finished");
        violations
    }

    /// Read rules and mapping from the repositories, then [`evaluate`](Self::evaluate).
    ///
    /// # Errors
    ///
    /// Returns an error only when a repository cannot be read; individual
    /// malformed rules are skipped as in `evaluate`.
    pub fn evaluate_from<R, M>(
        &self,
        dataset: &Dataset,
        rules: &R,
        mapping: &M,
    ) -> Result<Vec<Violation>, ValidateError>
    where
        R: RuleRepository + ?Sized,
        M: MappingRepository + ?Sized,
    {
        let rules = rules
            .load_rules()
            .map_err(|error| ValidateError::LoadRules(Box::new(error)))?;
        let mapping = mapping
            .load_mapping()
            .map_err(|error| ValidateError::LoadMapping(Box::new(error)))?;
        Ok(self.evaluate(dataset, &rules, &mapping))
    }

    /// Evaluate a single rule.
    ///
    /// Returns `Ok(None)` when the rule does not apply to this dataset (a
    /// referenced field is absent) or flagged nothing.
    pub fn evaluate_rule(
        &self,
        dataset: &Dataset,
        rule: &Rule,
        mapping: &DepartmentMapping,
    ) -> Result<Option<Violation>, EvaluationError> {
        rule.validate()?;

        if let Some(field) = rule
            .required_fields()
            .into_iter()
            .find(|field| !dataset.has_field(field))
        {
            debug!(rule = %rule.name, field, "field not in dataset; rule skipped");
            return Ok(None);
        }

        let errors = match &rule.kind {
            RuleKind::Missing(check) => missing::check(check, dataset),
            RuleKind::Logic(check) => logic::check(check, dataset),
            RuleKind::Relation(check) => relation::check(check, dataset, mapping, &self.options)?,
        };

        if errors.is_empty() {
            return Ok(None);
        }
        Ok(Some(Violation::new(
            rule.name.as_str(),
            rule.message.as_str(),
            errors.into_iter().collect(),
        )))
    }
}
