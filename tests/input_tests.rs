mod common;

use common::test_reference;
use corerate::error::CoreRateError;
use corerate::input::CoreInput;
use corerate::model::{RawValue, Shape, StatKey};
use rstest::rstest;

fn parse(json: &str) -> CoreInput {
    serde_json::from_str(json).unwrap()
}

fn validation_message(input: CoreInput) -> String {
    match input.validate(&test_reference().meta) {
        Err(CoreRateError::Validation(msg)) => msg,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

const VALID: &str = r#"{
  "type": "triangle",
  "level": "12",
  "color": "red",
  "mainStat": "critDmg",
  "subStats": [
    { "key": "critRate", "value": "3.1%", "upgradeCount": 2 },
    { "key": "atk", "value": 18, "upgradeCount": 0 },
    { "key": "weakDmg", "value": "" }
  ]
}"#;

#[test]
fn test_valid_input() {
    let core = parse(VALID).validate(&test_reference().meta).unwrap();
    assert_eq!(core.shape, Shape::Triangle);
    assert_eq!(core.level.value(), 12);
    assert_eq!(core.main_stat, StatKey::CritDmg);
    assert_eq!(core.sub_stats.len(), 3);
    assert_eq!(core.sub_stats[0].value, RawValue::from("3.1%"));
    assert_eq!(core.sub_stats[1].value, RawValue::Numeric(18.0));
    assert_eq!(core.sub_stats[2].value, RawValue::Numeric(0.0));
    assert_eq!(core.sub_stats[2].upgrade_count, 0);
}

#[test]
fn test_fixed_main_stat_overrides_input() {
    let mut input = parse(VALID);
    input.shape = Some("diamond".to_string());
    input.main_stat = Some(StatKey::CritDmg);
    let core = input.validate(&test_reference().meta).unwrap();
    assert_eq!(core.main_stat, StatKey::Hp);

    let mut input = parse(VALID);
    input.shape = Some("uni".to_string());
    input.main_stat = None;
    let core = input.validate(&test_reference().meta).unwrap();
    assert_eq!(core.main_stat, StatKey::Atk);
}

#[rstest]
#[case(r#"{"type":"square","color":"red","subStats":[]}"#, "level")]
#[case(r#"{"level":3,"color":"red","subStats":[]}"#, "type")]
#[case(r#"{"type":"square","level":3,"subStats":[]}"#, "color")]
#[case(r#"{"type":"square","level":3,"color":"red","subStats":[]}"#, "main stat is required")]
#[case(r#"{"type":"triangle","level":3,"color":"red","mainStat":"","subStats":[]}"#, "main stat is required")]
#[case(r#"{"type":"square","level":3,"color":"red","mainStat":"critRate","subStats":[]}"#, "not available on square")]
fn test_header_errors(#[case] json: &str, #[case] fragment: &str) {
    let msg = validation_message(parse(json));
    assert!(msg.contains(fragment), "{:?} should mention {:?}", msg, fragment);
}

fn with_subs(subs: &str) -> CoreInput {
    parse(&format!(
        r#"{{"type":"uni","level":0,"color":"blue","subStats":{}}}"#,
        subs
    ))
}

#[rstest]
#[case(r#"[{"key":"atk","value":1}]"#, "2 to 4 sub-stats")]
#[case(r#"[{"key":"atk"},{"key":"def"},{"key":"hp"},{"key":"critRate"},{"key":"critDmg"}]"#, "2 to 4 sub-stats")]
#[case(r#"[{"key":"atk","value":1},{"key":"atk","value":2}]"#, "duplicate sub-stat 'atk'")]
#[case(r#"[{"key":"atk","value":1},{"value":2}]"#, "sub-stat #2 has no stat selected")]
#[case(r#"[{"key":"atk","value":1},{"key":"","value":2}]"#, "sub-stat #2 has no stat selected")]
#[case(r#"[{"key":"atk","value":1,"upgradeCount":8},{"key":"def"}]"#, "at most 7")]
fn test_sub_stat_errors(#[case] subs: &str, #[case] fragment: &str) {
    let msg = validation_message(with_subs(subs));
    assert!(msg.contains(fragment), "{:?} should mention {:?}", msg, fragment);
}

#[test]
fn test_unknown_sub_stat_is_accepted() {
    let core = with_subs(r#"[{"key":"luck","value":5},{"key":"atk","value":10}]"#)
        .validate(&test_reference().meta)
        .unwrap();
    assert_eq!(core.sub_stats[0].key, StatKey::Other("luck".to_string()));
}

#[rstest]
#[case(r#"{"type":"square","level":"","color":"red","subStats":[]}"#, "core level is required")]
#[case(r#"{"type":"square","level":"  ","color":"red","subStats":[]}"#, "core level is required")]
#[case(r#"{"type":"square","level":4,"color":"red","subStats":[]}"#, "invalid enhancement level 4")]
#[case(r#"{"type":"square","level":"18","color":"red","subStats":[]}"#, "invalid enhancement level 18")]
#[case(r#"{"type":"square","level":"abc","color":"red","subStats":[]}"#, "invalid enhancement level 'abc'")]
#[case(r#"{"type":"square","level":3.5,"color":"red","subStats":[]}"#, "invalid enhancement level 3.5")]
#[case(r#"{"type":"hexagon","level":3,"color":"red","subStats":[]}"#, "unknown core type 'hexagon'")]
#[case(r#"{"type":"","level":3,"color":"red","subStats":[]}"#, "core type is required")]
#[case(r#"{"type":"square","level":3,"color":"teal","subStats":[]}"#, "unknown core color 'teal'")]
fn test_header_values_are_checked_by_validate(#[case] json: &str, #[case] fragment: &str) {
    let msg = validation_message(parse(json));
    assert!(msg.contains(fragment), "{:?} should mention {:?}", msg, fragment);
}
