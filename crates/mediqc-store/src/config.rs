//! Optional JSON configuration file.

use std::path::Path;

use mediqc_model::QcConfig;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::io::read_json;

/// Loads a configuration file. Keys absent from the file keep their defaults.
///
/// Unlike the rule and mapping files, an explicitly named config file must exist.
pub fn load_config(path: &Path) -> Result<QcConfig> {
    let config = read_json::<QcConfig>(path)?.ok_or_else(|| StoreError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Loads `path` when given, otherwise returns the default configuration.
pub fn load_config_or_default(path: Option<&Path>) -> Result<QcConfig> {
    path.map_or_else(|| Ok(QcConfig::default()), load_config)
}
