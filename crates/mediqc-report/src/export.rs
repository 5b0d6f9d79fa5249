//! CSV and JSON export of violation reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use mediqc_model::Violation;
use tracing::info;

/// Column headers of the CSV export: rule name, message, row number.
pub const CSV_HEADERS: [&str; 3] = ["规则名称", "错误信息", "错误行号"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Options for [`export_csv`].
#[derive(Debug, Clone, Copy)]
pub struct CsvExportOptions {
    /// Prefix the file with a UTF-8 byte order mark so spreadsheet tools
    /// detect the encoding.
    pub with_bom: bool,
}

impl Default for CsvExportOptions {
    fn default() -> Self {
        Self { with_bom: true }
    }
}

/// Writes one CSV row per flagged record. Row numbers are 1-based.
pub fn write_csv<W: Write>(writer: W, violations: &[Violation]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)
        .context("write CSV header")?;
    for violation in violations {
        for &index in &violation.error_indices {
            let row_number = (index + 1).to_string();
            wtr.write_record([
                violation.rule_name.as_str(),
                violation.message.as_str(),
                row_number.as_str(),
            ])
            .with_context(|| format!("write CSV row for rule {}", violation.rule_name))?;
        }
    }
    wtr.flush().context("flush CSV output")?;
    Ok(())
}

/// Exports violations to a CSV file.
pub fn export_csv(path: &Path, violations: &[Violation], options: CsvExportOptions) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    if options.with_bom {
        writer
            .write_all(UTF8_BOM)
            .with_context(|| format!("write {}", path.display()))?;
    }
    write_csv(&mut writer, violations)?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(path = %path.display(), rules = violations.len(), "CSV report exported");
    Ok(())
}

/// Writes the violation list as pretty JSON.
pub fn write_json<W: Write>(mut writer: W, violations: &[Violation]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, violations).context("serialize violations")?;
    writer.write_all(b"\n").context("write JSON output")?;
    Ok(())
}

/// Exports violations to a JSON file.
pub fn export_json(path: &Path, violations: &[Violation]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_json(&mut writer, violations)?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(path = %path.display(), rules = violations.len(), "JSON report exported");
    Ok(())
}
