//! Terminal tables for command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use mediqc_model::{Rule, RuleKind, Violation};

use crate::commands::CheckResult;

/// Row numbers shown per rule before eliding the rest.
const MAX_ROWS_SHOWN: usize = 10;

pub fn print_check_summary(result: &CheckResult) {
    println!("Data: {}", result.data.display());
    println!(
        "Records: {}  Rules: {}",
        result.summary.total_records, result.rules_checked
    );
    for path in &result.exported {
        println!("Exported: {}", path.display());
    }

    if result.violations.is_empty() {
        println!("No violations found.");
        return;
    }

    println!("{}", violation_table(&result.violations));
    println!(
        "Violated rules: {}  Errors: {}  Flagged records: {}  Clean records: {}",
        result.summary.violated_rules,
        result.summary.total_errors,
        result.summary.flagged_records,
        result.summary.clean_records()
    );
}

pub fn violation_table(violations: &[Violation]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Errors"),
        header_cell("Rows"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for violation in violations {
        table.add_row(vec![
            Cell::new(&violation.rule_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(violation.error_count)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(row_numbers(&violation.error_indices)),
            Cell::new(&violation.message),
        ]);
    }
    table
}

pub fn print_rules(rules: &[Rule]) {
    if rules.is_empty() {
        println!("No rules defined.");
        return;
    }
    println!("{}", rules_table(rules));
}

pub fn rules_table(rules: &[Rule]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Definition"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);

    for rule in rules {
        table.add_row(vec![
            dim_cell(&rule.id),
            Cell::new(&rule.name).add_attribute(Attribute::Bold),
            Cell::new(rule.kind_label()),
            Cell::new(describe(rule)),
            Cell::new(&rule.message),
        ]);
    }
    table
}

pub fn print_rule(action: &str, rule: &Rule) {
    println!("{action} rule {} ({})", rule.id, rule.name);
}

/// One-line rendering of a rule's definition.
pub fn describe(rule: &Rule) -> String {
    match &rule.kind {
        RuleKind::Missing(check) => format!("{} {} empty", check.field, check.condition.as_str()),
        RuleKind::Logic(check) => format!("{} {} {}", check.field, check.condition, check.value),
        RuleKind::Relation(check) if check.value_pairs.trim().is_empty() => {
            format!("{} {} {}", check.field1, check.relation, check.field2)
        }
        RuleKind::Relation(check) => format!(
            "{} {} {} [{}]",
            check.field1,
            check.relation,
            check.field2,
            check.value_pairs.trim().replace('\n', "; ")
        ),
    }
}

/// 1-based row numbers, elided after [`MAX_ROWS_SHOWN`].
pub fn row_numbers(indices: &[usize]) -> String {
    let mut shown: Vec<String> = indices
        .iter()
        .take(MAX_ROWS_SHOWN)
        .map(|index| (index + 1).to_string())
        .collect();
    if indices.len() > MAX_ROWS_SHOWN {
        shown.push(format!("... (+{})", indices.len() - MAX_ROWS_SHOWN));
    }
    shown.join(", ")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
