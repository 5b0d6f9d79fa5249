//! Command implementations. Each returns data for `summary` to print.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mediqc_ingest::read_dataset;
use mediqc_model::{Rule, RuleRepository, Violation};
use mediqc_report::{CsvExportOptions, ReportSummary, export_csv, export_json};
use mediqc_store::{JsonMappingStore, JsonRuleStore, StoreError, load_config_or_default};
use mediqc_validate::RuleEngine;
use tracing::info;

use crate::cli::CheckArgs;

/// Outcome of `mediqc check`.
#[derive(Debug)]
pub struct CheckResult {
    pub data: PathBuf,
    pub rules_checked: usize,
    pub violations: Vec<Violation>,
    pub summary: ReportSummary,
    pub exported: Vec<PathBuf>,
}

impl CheckResult {
    pub fn has_violations(&self) -> bool {
        !self.summary.is_clean()
    }
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let config = load_config_or_default(args.config.as_deref()).context("load config")?;
    let dataset = read_dataset(&args.data)
        .with_context(|| format!("load dataset {}", args.data.display()))?;
    let rules = CountingRules::new(JsonRuleStore::new(&args.rules));
    let mapping = JsonMappingStore::new(&args.mapping);

    let engine = RuleEngine::with_options(config.matching);
    let violations = engine.evaluate_from(&dataset, &rules, &mapping)?;
    let rules_checked = rules.loaded.get();
    let summary = ReportSummary::new(dataset.len(), &violations);

    let mut exported = Vec::new();
    if let Some(path) = &args.export_csv {
        let options = CsvExportOptions {
            with_bom: !args.no_bom,
        };
        export_csv(path, &violations, options)?;
        exported.push(path.clone());
    }
    if let Some(path) = &args.export_json {
        export_json(path, &violations)?;
        exported.push(path.clone());
    }

    info!(
        records = summary.total_records,
        rules = rules_checked,
        violated_rules = summary.violated_rules,
        "check finished"
    );
    Ok(CheckResult {
        data: args.data.clone(),
        rules_checked,
        violations,
        summary,
        exported,
    })
}

/// Rule store that remembers how many rules its last load returned.
struct CountingRules {
    store: JsonRuleStore,
    loaded: Cell<usize>,
}

impl CountingRules {
    fn new(store: JsonRuleStore) -> Self {
        Self {
            store,
            loaded: Cell::new(0),
        }
    }
}

impl RuleRepository for CountingRules {
    type Error = StoreError;

    fn load_rules(&self) -> std::result::Result<Vec<Rule>, StoreError> {
        let rules = self.store.load()?;
        self.loaded.set(rules.len());
        Ok(rules)
    }
}

pub fn run_rules_list(rules_path: &Path) -> Result<Vec<Rule>> {
    JsonRuleStore::new(rules_path)
        .load()
        .with_context(|| format!("load rules from {}", rules_path.display()))
}

pub fn run_rules_add(rules_path: &Path, rule_json: &str) -> Result<Rule> {
    let rule = parse_rule(rule_json)?;
    Ok(JsonRuleStore::new(rules_path).add(rule)?)
}

pub fn run_rules_update(rules_path: &Path, id: &str, rule_json: &str) -> Result<Rule> {
    let rule = parse_rule(rule_json)?;
    Ok(JsonRuleStore::new(rules_path).update(id, rule)?)
}

pub fn run_rules_remove(rules_path: &Path, id: &str) -> Result<Rule> {
    Ok(JsonRuleStore::new(rules_path).remove(id)?)
}

fn parse_rule(rule_json: &str) -> Result<Rule> {
    serde_json::from_str(rule_json).context("parse rule JSON")
}
