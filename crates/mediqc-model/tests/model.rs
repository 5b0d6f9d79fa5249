use mediqc_model::{
    DepartmentMapping, LogicCondition, MatchingOptions, MissingCondition, QcConfig, RelationKind,
    Rule, RuleKind, Violation,
};

#[test]
fn rules_file_entries_deserialize_by_type_tag() {
    let json = r#"[
        {"id": "20240301093000", "name": "主要诊断缺失", "type": "missing",
         "message": "主要诊断不能为空", "field": "主要诊断", "condition": "equals", "value": null},
        {"id": "20240301093100", "name": "出院晚于入院", "type": "logic",
         "message": "出院日期应晚于入院日期", "field": "出院日期", "condition": "greater_than",
         "value": "入院日期"},
        {"id": "20240301093200", "name": "性别与科室", "type": "relation",
         "message": "男性不应在妇产科就诊", "field1": "性别", "field2": "科室",
         "relation": "not_match", "value_pairs": "男=妇产科,产科"}
    ]"#;

    let rules: Vec<Rule> = serde_json::from_str(json).expect("parse rules");
    assert_eq!(rules.len(), 3);

    let RuleKind::Missing(missing) = &rules[0].kind else {
        panic!("expected missing rule");
    };
    assert_eq!(missing.field, "主要诊断");
    assert_eq!(missing.condition, MissingCondition::Equals);

    let RuleKind::Logic(logic) = &rules[1].kind else {
        panic!("expected logic rule");
    };
    assert_eq!(logic.condition, LogicCondition::GreaterThan);
    assert_eq!(logic.value, "入院日期");

    let RuleKind::Relation(relation) = &rules[2].kind else {
        panic!("expected relation rule");
    };
    assert_eq!(relation.relation, RelationKind::NotMatch);
    assert_eq!(relation.value_pairs, "男=妇产科,产科");
    assert_eq!(rules[2].required_fields(), vec!["性别", "科室"]);
}

#[test]
fn unknown_condition_is_rejected() {
    let json = r#"{"id": "1", "name": "bad", "type": "logic", "message": "",
                   "field": "年龄", "condition": "between", "value": "1"}"#;
    assert!(serde_json::from_str::<Rule>(json).is_err());
}

#[test]
fn serialized_rule_keeps_flat_layout() {
    let json = r#"{"id": "1", "name": "年龄缺失", "type": "missing", "message": "缺年龄",
                   "field": "年龄", "condition": "not_equals"}"#;
    let rule: Rule = serde_json::from_str(json).expect("parse rule");
    let value = serde_json::to_value(&rule).expect("serialize rule");
    assert_eq!(value["type"], "missing");
    assert_eq!(value["field"], "年龄");
    assert_eq!(value["condition"], "not_equals");
}

#[test]
fn mapping_parses_from_json_object() {
    let mapping: DepartmentMapping =
        serde_json::from_str(r#"{"骨科": ["骨折", "关节"], "心内科": ["冠心病"]}"#)
            .expect("parse mapping");
    assert_eq!(mapping.len(), 2);
    assert_eq!(
        mapping.keywords("骨科"),
        Some(["骨折".to_string(), "关节".to_string()].as_slice())
    );
    assert!(mapping.keywords("内科").is_none());
}

#[test]
fn config_defaults_fill_missing_keys() {
    let config: QcConfig =
        serde_json::from_str(r#"{"matching": {"age_field": "患者年龄"}}"#).expect("parse config");
    assert_eq!(config.matching.age_field, "患者年龄");
    assert_eq!(config.matching.department_field, "科室");
    assert!(config.matching.is_diagnosis_field("主要诊断"));
    assert_eq!(
        MatchingOptions::default().pediatric_age_limit,
        config.matching.pediatric_age_limit
    );
}

#[test]
fn violation_count_matches_indices() {
    let violation = Violation::new("规则", "信息", vec![0, 3, 7]);
    assert_eq!(violation.error_count, 3);
    let json = serde_json::to_value(&violation).expect("serialize violation");
    assert_eq!(json["error_indices"], serde_json::json!([0, 3, 7]));
}
