//! Argument parsing and command runs against temporary files.

use std::fs;
use std::path::Path;

use clap::Parser;
use mediqc_cli::cli::{Cli, Command, RulesCommand, log_config_from_cli};
use mediqc_cli::commands::{
    run_check, run_rules_add, run_rules_list, run_rules_remove, run_rules_update,
};
use mediqc_cli::logging::LogFormat;
use mediqc_cli::summary::{describe, row_numbers};
use mediqc_validate::ValidateError;
use tempfile::tempdir;
use tracing::level_filters::LevelFilter;

const RULES: &str = r#"[
    {"id": "1", "name": "科室诊断不符", "message": "主要诊断与科室不匹配", "type": "relation",
     "field1": "科室", "field2": "主要诊断", "relation": "match_diagnosis", "value_pairs": ""},
    {"id": "2", "name": "成人儿科", "message": "儿科患者年龄超过14岁", "type": "relation",
     "field1": "年龄", "field2": "科室", "relation": "not_match", "value_pairs": ""},
    {"id": "3", "name": "科室缺失", "message": "科室不能为空", "type": "missing",
     "field": "科室", "condition": "equals", "value": null}
]"#;

fn write_inputs(dir: &Path, mapping: &str) {
    fs::write(
        dir.join("records.csv"),
        "科室,主要诊断,年龄\n妇产科,盆腔炎,30\n骨科,骨折,45\n,糖尿病,60\n儿科门诊,肺炎,20\n",
    )
    .unwrap();
    fs::write(dir.join("rules.json"), RULES).unwrap();
    fs::write(dir.join("mapping.json"), mapping).unwrap();
}

fn check_cli(dir: &Path, extra: &[&str]) -> Cli {
    let data = dir.join("records.csv");
    let rules = dir.join("rules.json");
    let mapping = dir.join("mapping.json");
    let mut args = vec![
        "mediqc".to_string(),
        "check".to_string(),
        data.display().to_string(),
        "--rules".to_string(),
        rules.display().to_string(),
        "--mapping".to_string(),
        mapping.display().to_string(),
    ];
    args.extend(extra.iter().map(|arg| (*arg).to_string()));
    Cli::try_parse_from(args).expect("valid arguments")
}

fn run(cli: &Cli) -> mediqc_cli::commands::CheckResult {
    let Command::Check(args) = &cli.command else {
        panic!("expected check command");
    };
    run_check(args).expect("check succeeds")
}

#[test]
fn check_reports_violations_in_rule_order() {
    let dir = tempdir().unwrap();
    write_inputs(
        dir.path(),
        r#"{"骨科": ["骨折"], "妇产科": ["妊娠", "分娩"], "儿科门诊": ["肺炎"]}"#,
    );

    let result = run(&check_cli(dir.path(), &[]));

    let names: Vec<_> = result
        .violations
        .iter()
        .map(|violation| violation.rule_name.as_str())
        .collect();
    assert_eq!(names, vec!["科室诊断不符", "成人儿科", "科室缺失"]);
    assert_eq!(result.violations[0].error_indices, vec![0]);
    assert_eq!(result.violations[1].error_indices, vec![3]);
    assert_eq!(result.violations[2].error_indices, vec![2]);
    assert_eq!(result.rules_checked, 3);
    assert_eq!(result.summary.flagged_records, 3);
    assert!(result.has_violations());
}

#[test]
fn unmapped_department_is_not_reported() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), r#"{"骨科": ["骨折"]}"#);

    let result = run(&check_cli(dir.path(), &[]));

    assert!(
        result
            .violations
            .iter()
            .all(|violation| violation.rule_name != "科室诊断不符")
    );
}

#[test]
fn config_file_changes_age_limit() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "{}");
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"matching": {"pediatric_age_limit": 25}}"#).unwrap();

    let result = run(&check_cli(
        dir.path(),
        &["--config", config.to_str().unwrap()],
    ));

    assert!(
        result
            .violations
            .iter()
            .all(|violation| violation.rule_name != "成人儿科")
    );
}

#[test]
fn check_exports_csv_and_json() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), r#"{"妇产科": ["妊娠"]}"#);
    let csv_path = dir.path().join("out.csv");
    let json_path = dir.path().join("out.json");

    let result = run(&check_cli(
        dir.path(),
        &[
            "--export-csv",
            csv_path.to_str().unwrap(),
            "--export-json",
            json_path.to_str().unwrap(),
            "--no-bom",
        ],
    ));

    assert_eq!(result.exported, vec![csv_path.clone(), json_path.clone()]);
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "规则名称,错误信息,错误行号");
    assert!(lines.contains(&"科室诊断不符,主要诊断与科室不匹配,1"));
    assert!(lines.contains(&"科室缺失,科室不能为空,3"));
    assert!(fs::read_to_string(&json_path).unwrap().contains("\"成人儿科\""));
}

#[test]
fn missing_dataset_is_an_error() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "{}");
    fs::remove_file(dir.path().join("records.csv")).unwrap();

    let cli = check_cli(dir.path(), &[]);
    let Command::Check(args) = &cli.command else {
        panic!("expected check command");
    };

    assert!(run_check(args).is_err());
}

#[test]
fn corrupt_rules_file_fails_through_the_rule_repository() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "{}");
    fs::write(dir.path().join("rules.json"), "{not json").unwrap();

    let cli = check_cli(dir.path(), &[]);
    let Command::Check(args) = &cli.command else {
        panic!("expected check command");
    };
    let error = run_check(args).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<ValidateError>(),
        Some(ValidateError::LoadRules(_))
    ));
}

#[test]
fn missing_mapping_file_still_checks_other_rules() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "{}");
    fs::remove_file(dir.path().join("mapping.json")).unwrap();

    let result = run(&check_cli(dir.path(), &[]));

    assert_eq!(result.rules_checked, 3);
    let names: Vec<_> = result
        .violations
        .iter()
        .map(|violation| violation.rule_name.as_str())
        .collect();
    assert_eq!(names, vec!["成人儿科", "科室缺失"]);
}

#[test]
fn rule_crud_through_commands() {
    let dir = tempdir().unwrap();
    let rules = dir.path().join("rules.json");

    let added = run_rules_add(
        &rules,
        r#"{"name": "年龄范围", "message": "年龄必须大于0", "type": "logic",
            "field": "年龄", "condition": "greater_than", "value": "0"}"#,
    )
    .unwrap();
    assert_eq!(describe(&added), "年龄 greater_than 0");

    let updated = run_rules_update(
        &rules,
        &added.id,
        r#"{"name": "性别科室", "message": "", "type": "relation", "field1": "性别",
            "field2": "科室", "relation": "match", "value_pairs": "女=妇科,产科\n男=男科"}"#,
    )
    .unwrap();
    assert_eq!(updated.id, added.id);
    assert_eq!(
        describe(&updated),
        "性别 match 科室 [女=妇科,产科; 男=男科]"
    );

    assert_eq!(run_rules_list(&rules).unwrap(), vec![updated]);
    run_rules_remove(&rules, &added.id).unwrap();
    assert!(run_rules_list(&rules).unwrap().is_empty());
    assert!(run_rules_remove(&rules, &added.id).is_err());
}

#[test]
fn invalid_rule_json_is_rejected() {
    let dir = tempdir().unwrap();
    let rules = dir.path().join("rules.json");

    assert!(run_rules_add(&rules, r#"{"name": "x", "type": "unknown"}"#).is_err());
    assert!(!rules.exists());
}

#[test]
fn rules_subcommands_parse() {
    let cli = Cli::try_parse_from([
        "mediqc", "rules", "--rules", "custom.json", "remove", "20240301120000",
    ])
    .unwrap();

    let Command::Rules(args) = cli.command else {
        panic!("expected rules command");
    };
    assert_eq!(args.rules, Path::new("custom.json"));
    assert!(matches!(args.command, RulesCommand::Remove { ref id } if id == "20240301120000"));
}

#[test]
fn log_flags_take_precedence_over_env() {
    let cli = Cli::try_parse_from([
        "mediqc",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--color",
        "never",
        "rules",
        "list",
    ])
    .unwrap();

    let config = log_config_from_cli(&cli);

    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert!(!config.use_env_filter);
    assert_eq!(config.format, LogFormat::Json);
    assert!(!config.with_ansi);
}

#[test]
fn default_logging_defers_to_env() {
    let cli = Cli::try_parse_from(["mediqc", "rules", "list"]).unwrap();

    let config = log_config_from_cli(&cli);

    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert!(config.use_env_filter);
    assert_eq!(config.format, LogFormat::Pretty);
}

#[test]
fn long_row_lists_are_elided() {
    let indices: Vec<usize> = (0..12).collect();
    assert_eq!(
        row_numbers(&indices),
        "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, ... (+2)"
    );
    assert_eq!(row_numbers(&[4]), "5");
}
