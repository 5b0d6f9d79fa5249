//! Department to diagnosis-keyword vocabulary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps a department name to the diagnosis keywords it treats.
///
/// A diagnosis is compatible with a department when the diagnosis text
/// contains any of the department's keywords as a substring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentMapping {
    departments: BTreeMap<String, Vec<String>>,
}

impl DepartmentMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a department and its keywords.
    #[must_use]
    pub fn with<I, S>(mut self, department: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(department, keywords);
        self
    }

    pub fn insert<I, S>(&mut self, department: impl Into<String>, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments.insert(
            department.into(),
            keywords.into_iter().map(Into::into).collect(),
        );
    }

    /// Keywords of a department, or `None` when the department is unmapped.
    pub fn keywords(&self, department: &str) -> Option<&[String]> {
        self.departments.get(department).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.departments
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}
