//! Read-side interfaces for rule definitions and the department mapping.
//!
//! The engine receives these as explicit inputs instead of reading shared
//! files itself; writes are the concern of whoever owns the storage.

use std::convert::Infallible;

use crate::mapping::DepartmentMapping;
use crate::rule::Rule;

/// Source of rule definitions.
pub trait RuleRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the current rule list in evaluation order.
    fn load_rules(&self) -> Result<Vec<Rule>, Self::Error>;
}

/// Source of the department to diagnosis-keyword mapping.
pub trait MappingRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    fn load_mapping(&self) -> Result<DepartmentMapping, Self::Error>;
}

/// Repository over values already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    rules: Vec<Rule>,
    mapping: DepartmentMapping,
}

impl InMemoryRepository {
    pub fn new(rules: Vec<Rule>, mapping: DepartmentMapping) -> Self {
        Self { rules, mapping }
    }
}

impl RuleRepository for InMemoryRepository {
    type Error = Infallible;

    fn load_rules(&self) -> Result<Vec<Rule>, Self::Error> {
        Ok(self.rules.clone())
    }
}

impl MappingRepository for InMemoryRepository {
    type Error = Infallible;

    fn load_mapping(&self) -> Result<DepartmentMapping, Self::Error> {
        Ok(self.mapping.clone())
    }
}
