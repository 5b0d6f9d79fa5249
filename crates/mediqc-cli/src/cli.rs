//! CLI argument definitions for the quality-control tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use crate::logging::{LogConfig, LogFormat};

/// Default location of the rules file.
pub const DEFAULT_RULES_PATH: &str = "data/rules.json";

/// Default location of the department mapping file.
pub const DEFAULT_MAPPING_PATH: &str = "data/diagnosis_department_mapping.json";

#[derive(Parser)]
#[command(
    name = "mediqc",
    version,
    about = "Medical record quality control - check records against configurable rules",
    long_about = "Check structured medical records against quality-control rules.\n\n\
                  Rules cover missing values, field comparisons, value-pair relations,\n\
                  department/diagnosis compatibility and age/department consistency."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a dataset file (CSV or JSON) against the stored rules.
    Check(CheckArgs),

    /// List, add, update or remove stored rules.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Dataset file to check (.csv or .json).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Rules file.
    #[arg(long = "rules", value_name = "PATH", default_value = DEFAULT_RULES_PATH)]
    pub rules: PathBuf,

    /// Department to diagnosis-keyword mapping file.
    #[arg(long = "mapping", value_name = "PATH", default_value = DEFAULT_MAPPING_PATH)]
    pub mapping: PathBuf,

    /// Optional JSON config overriding field names and matching markers.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Export violations as CSV (one row per flagged record).
    #[arg(long = "export-csv", value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Export violations as JSON.
    #[arg(long = "export-json", value_name = "PATH")]
    pub export_json: Option<PathBuf>,

    /// Omit the UTF-8 byte order mark from the CSV export.
    #[arg(long = "no-bom")]
    pub no_bom: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,

    /// Rules file.
    #[arg(long = "rules", value_name = "PATH", default_value = DEFAULT_RULES_PATH, global = true)]
    pub rules: PathBuf,
}

#[derive(Subcommand)]
pub enum RulesCommand {
    /// Show all stored rules.
    List,

    /// Add a rule given as a JSON object; an id is assigned when absent.
    Add {
        #[arg(value_name = "RULE_JSON")]
        rule: String,
    },

    /// Replace the rule with the given id.
    Update {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "RULE_JSON")]
        rule: String,
    },

    /// Delete the rule with the given id.
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Build logging configuration from CLI flags with consistent precedence:
/// `--log-level` over `-v/-q` over `RUST_LOG` over the default.
pub fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
