//! Installs the global subscriber once and checks file output.

use std::fs;

use mediqc_cli::logging::{LogConfig, LogFormat, init_logging};
use tempfile::tempdir;
use tracing::level_filters::LevelFilter;

#[test]
fn json_logs_are_appended_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mediqc.log");
    let mut config = LogConfig::default()
        .with_level(LevelFilter::INFO)
        .with_format(LogFormat::Json)
        .with_log_file(Some(path.clone()));
    config.use_env_filter = false;

    init_logging(&config).unwrap();
    tracing::info!(target: "mediqc_cli", rules = 3, "check finished");
    tracing::debug!(target: "mediqc_cli", "filtered out");

    let text = fs::read_to_string(&path).unwrap();
    let line = text.lines().next().expect("one log line");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["fields"]["message"], "check finished");
    assert_eq!(event["fields"]["rules"], 3);
    assert!(!text.contains("filtered out"));

    assert!(init_logging(&config).is_err());
}
