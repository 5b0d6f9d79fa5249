//! Logic checks: equality, ordering and containment.

use std::cmp::Ordering;

use mediqc_model::{Dataset, LogicCondition, LogicRule, Record, Value};

use crate::ErrorSet;
use crate::compare::{
    Literal, compare_fields, compare_literal, contains_literal, text_equals,
    violates_greater_than, violates_less_than,
};

/// Right-hand side of an ordering check.
#[derive(Debug, Clone, Copy)]
enum Operand<'a> {
    /// The rule value names another column of the dataset.
    Field(&'a str),
    Literal(Literal<'a>),
}

/// Builds the condition mask per record, then selects the mask or its
/// complement depending on whether the condition inverts.
pub fn check(rule: &LogicRule, dataset: &Dataset) -> ErrorSet {
    let operand = if dataset.has_field(&rule.value) {
        Operand::Field(&rule.value)
    } else {
        Operand::Literal(Literal::parse(&rule.value))
    };
    let invert = rule.condition.inverts();

    dataset
        .iter()
        .filter(|(_, record)| condition_mask(rule, operand, record) != invert)
        .map(|(index, _)| index)
        .collect()
}

fn condition_mask(rule: &LogicRule, operand: Operand<'_>, record: &Record) -> bool {
    let value = record.get(&rule.field);
    match rule.condition {
        LogicCondition::Equals => text_equals(value, &rule.value),
        LogicCondition::NotEquals => !text_equals(value, &rule.value),
        LogicCondition::GreaterThan => violates_greater_than(ordering(value, operand, record)),
        LogicCondition::LessThan => violates_less_than(ordering(value, operand, record)),
        LogicCondition::Contains => contains_literal(value, &rule.value),
        LogicCondition::NotContains => !contains_literal(value, &rule.value),
    }
}

fn ordering(value: &Value, operand: Operand<'_>, record: &Record) -> Option<Ordering> {
    match operand {
        Operand::Field(other) => compare_fields(value, record.get(other)),
        Operand::Literal(literal) => compare_literal(value, literal),
    }
}
