//! Rule, mapping and config files on disk.

use std::fs;

use mediqc_model::{
    LogicCondition, LogicRule, MappingRepository, MissingCondition, MissingRule, Rule, RuleKind,
    RuleRepository,
};
use mediqc_store::{JsonMappingStore, JsonRuleStore, StoreError, load_config, load_config_or_default};
use tempfile::tempdir;

fn missing_rule(name: &str) -> Rule {
    Rule {
        id: String::new(),
        name: name.to_string(),
        message: format!("{name}不能为空"),
        kind: RuleKind::Missing(MissingRule {
            field: name.to_string(),
            condition: MissingCondition::Equals,
        }),
    }
}

#[test]
fn missing_rules_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let store = JsonRuleStore::new(dir.path().join("rules.json"));

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn crud_round_trip() {
    let dir = tempdir().unwrap();
    let store = JsonRuleStore::new(dir.path().join("data").join("rules.json"));

    let first = store.add(missing_rule("科室")).unwrap();
    let second = store.add(missing_rule("主要诊断")).unwrap();
    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);

    let updated = store
        .update(
            &first.id,
            Rule {
                id: "ignored".to_string(),
                name: "年龄范围".to_string(),
                message: "年龄必须大于0".to_string(),
                kind: RuleKind::Logic(LogicRule {
                    field: "年龄".to_string(),
                    condition: LogicCondition::GreaterThan,
                    value: "0".to_string(),
                }),
            },
        )
        .unwrap();
    assert_eq!(updated.id, first.id);

    let rules = store.load().unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].name, "年龄范围");
    assert_eq!(rules[1].name, "主要诊断");

    let removed = store.remove(&second.id).unwrap();
    assert_eq!(removed.name, "主要诊断");
    assert_eq!(store.load_rules().unwrap(), vec![updated]);
}

#[test]
fn unknown_ids_are_reported() {
    let dir = tempdir().unwrap();
    let store = JsonRuleStore::new(dir.path().join("rules.json"));

    assert!(matches!(
        store.remove("20240101000000"),
        Err(StoreError::RuleNotFound { .. })
    ));
    assert!(matches!(
        store.update("20240101000000", missing_rule("科室")),
        Err(StoreError::RuleNotFound { .. })
    ));
}

#[test]
fn explicit_duplicate_id_is_rejected() {
    let dir = tempdir().unwrap();
    let store = JsonRuleStore::new(dir.path().join("rules.json"));
    let mut rule = missing_rule("科室");
    rule.id = "20240101000000".to_string();

    store.add(rule.clone()).unwrap();

    assert!(matches!(
        store.add(rule),
        Err(StoreError::DuplicateRuleId { .. })
    ));
}

#[test]
fn invalid_rule_is_not_stored() {
    let dir = tempdir().unwrap();
    let store = JsonRuleStore::new(dir.path().join("rules.json"));

    let result = store.add(missing_rule(""));

    assert!(matches!(result, Err(StoreError::InvalidRule(_))));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn malformed_entries_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(
        &path,
        r#"[
            {"id": "1", "name": "科室缺失", "message": "", "type": "missing", "field": "科室", "condition": "equals"},
            {"id": "2", "name": "未知条件", "message": "", "type": "logic", "field": "年龄", "condition": "between", "value": "1"},
            {"id": "3", "name": "无类型"},
            {"id": "4", "name": "性别科室", "message": "", "type": "relation", "field1": "性别", "field2": "科室", "relation": "match", "value_pairs": "女=妇科"}
        ]"#,
    )
    .unwrap();

    let ids: Vec<_> = JsonRuleStore::new(&path)
        .load()
        .unwrap()
        .into_iter()
        .map(|rule| rule.id)
        .collect();

    assert_eq!(ids, vec!["1", "4"]);
}

#[test]
fn non_array_rules_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    fs::write(&path, r#"{"rules": []}"#).unwrap();

    assert!(matches!(
        JsonRuleStore::new(&path).load(),
        Err(StoreError::InvalidFormat { .. })
    ));

    fs::write(&path, "[").unwrap();
    assert!(matches!(
        JsonRuleStore::new(&path).load(),
        Err(StoreError::Parse { .. })
    ));
}

#[test]
fn mapping_file_loads_departments() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("diagnosis_department_mapping.json");
    fs::write(&path, r#"{"骨科": ["骨折", "关节炎"], "心内科": ["冠心病"]}"#).unwrap();

    let mapping = JsonMappingStore::new(&path).load_mapping().unwrap();

    assert_eq!(mapping.len(), 2);
    assert_eq!(
        mapping.keywords("骨科"),
        Some(&["骨折".to_string(), "关节炎".to_string()][..])
    );
}

#[test]
fn missing_mapping_file_reads_as_empty() {
    let dir = tempdir().unwrap();

    let mapping = JsonMappingStore::new(dir.path().join("absent.json"))
        .load()
        .unwrap();

    assert!(mapping.is_empty());
}

#[test]
fn config_file_overrides_selected_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"matching": {"pediatric_age_limit": 18}}"#).unwrap();

    let config = load_config(&path).unwrap();

    assert_eq!(config.matching.pediatric_age_limit, 18.0);
    assert_eq!(config.matching.department_field, "科室");
}

#[test]
fn named_config_file_must_exist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(load_config(&path), Err(StoreError::Io { .. })));
    assert_eq!(
        load_config_or_default(None).unwrap().matching.age_field,
        "年龄"
    );
}
