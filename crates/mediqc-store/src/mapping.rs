//! Department mapping file: a JSON object of department to keyword list.

use std::path::{Path, PathBuf};

use mediqc_model::{DepartmentMapping, MappingRepository};
use tracing::{debug, warn};

use crate::error::Result;
use crate::io::read_json;

/// Mapping repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonMappingStore {
    path: PathBuf,
}

impl JsonMappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the mapping. A missing file reads as an empty mapping, which
    /// disables the department/diagnosis check.
    pub fn load(&self) -> Result<DepartmentMapping> {
        match read_json::<DepartmentMapping>(&self.path)? {
            Some(mapping) => {
                debug!(path = %self.path.display(), departments = mapping.len(), "mapping loaded");
                Ok(mapping)
            }
            None => {
                warn!(path = %self.path.display(), "mapping file not found; using empty mapping");
                Ok(DepartmentMapping::new())
            }
        }
    }
}

impl MappingRepository for JsonMappingStore {
    type Error = crate::StoreError;

    fn load_mapping(&self) -> Result<DepartmentMapping> {
        self.load()
    }
}
