//! Rules file: a JSON array of rule objects.

use std::path::{Path, PathBuf};

use chrono::Local;
use mediqc_model::{Rule, RuleRepository};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::io::{read_json, write_json_atomic};

/// Format of generated rule ids: local creation time to the second.
const RULE_ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// Rule repository backed by one JSON file.
///
/// Every operation re-reads the file, so edits made by another process are
/// picked up on the next call. A missing file reads as an empty rule list.
#[derive(Debug, Clone)]
pub struct JsonRuleStore {
    path: PathBuf,
}

impl JsonRuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all well-formed rules in file order.
    ///
    /// Entries that fail to deserialize are logged and skipped; only an
    /// unreadable file or a non-array document is an error.
    pub fn load(&self) -> Result<Vec<Rule>> {
        let Some(document) = read_json::<JsonValue>(&self.path)? else {
            return Ok(Vec::new());
        };
        let JsonValue::Array(entries) = document else {
            return Err(StoreError::InvalidFormat {
                path: self.path.clone(),
                reason: "expected an array of rules".to_string(),
            });
        };

        let mut rules = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Rule>(entry) {
                Ok(rule) => rules.push(rule),
                Err(error) => {
                    warn!(path = %self.path.display(), index, %error, "skipping malformed rule entry");
                }
            }
        }
        Ok(rules)
    }

    /// Replaces the file content with `rules`.
    pub fn save(&self, rules: &[Rule]) -> Result<()> {
        write_json_atomic(&self.path, rules)?;
        info!(path = %self.path.display(), rules = rules.len(), "rules saved");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Rule> {
        self.load()?
            .into_iter()
            .find(|rule| rule.id == id)
            .ok_or_else(|| StoreError::RuleNotFound { id: id.to_string() })
    }

    /// Appends a rule and returns it as stored.
    ///
    /// A rule without an id gets one generated from the current local time.
    /// An explicit id already present in the file is rejected.
    pub fn add(&self, mut rule: Rule) -> Result<Rule> {
        rule.validate()?;
        let mut rules = self.load()?;

        if rule.id.is_empty() {
            rule.id = unique_id(&generate_rule_id(), &rules);
        } else if rules.iter().any(|existing| existing.id == rule.id) {
            return Err(StoreError::DuplicateRuleId { id: rule.id });
        }

        rules.push(rule.clone());
        self.save(&rules)?;
        info!(id = %rule.id, name = %rule.name, "rule added");
        Ok(rule)
    }

    /// Replaces the rule with `id`, keeping its id and position.
    pub fn update(&self, id: &str, mut rule: Rule) -> Result<Rule> {
        rule.validate()?;
        let mut rules = self.load()?;
        let slot = rules
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| StoreError::RuleNotFound { id: id.to_string() })?;

        rule.id = id.to_string();
        *slot = rule.clone();
        self.save(&rules)?;
        info!(id, name = %rule.name, "rule updated");
        Ok(rule)
    }

    /// Deletes the rule with `id` and returns it.
    pub fn remove(&self, id: &str) -> Result<Rule> {
        let mut rules = self.load()?;
        let position = rules
            .iter()
            .position(|rule| rule.id == id)
            .ok_or_else(|| StoreError::RuleNotFound { id: id.to_string() })?;

        let removed = rules.remove(position);
        self.save(&rules)?;
        info!(id, name = %removed.name, "rule removed");
        Ok(removed)
    }
}

impl RuleRepository for JsonRuleStore {
    type Error = StoreError;

    fn load_rules(&self) -> Result<Vec<Rule>> {
        self.load()
    }
}

/// Current local time formatted as a rule id.
pub fn generate_rule_id() -> String {
    Local::now().format(RULE_ID_FORMAT).to_string()
}

/// Two rules added within the same second would share a timestamp; later
/// ones get a numeric suffix.
fn unique_id(base: &str, rules: &[Rule]) -> String {
    let taken = |candidate: &str| rules.iter().any(|rule| rule.id == candidate);
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
