mod common;

use common::write_dataset;
use corerate::api::{load_dataset, rate_core_json, CoreRateState};
use corerate::config::ScoringParams;
use corerate::model::{Archetype, Talent};
use corerate::presentation::RankBand;
use tempfile::tempdir;

const CORE: &str = r#"{
  "type": "diamond",
  "level": 15,
  "color": "red",
  "subStats": [
    { "key": "def", "value": 100 },
    { "key": "critRate", "value": "3%" }
  ]
}"#;

#[test]
fn test_rate_requires_loaded_dataset() {
    let state = CoreRateState::default();
    let err = rate_core_json(&state, CORE).unwrap_err();
    assert!(err.contains("Load dataset first"));
}

#[test]
fn test_rate_core_from_directory() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());

    let state = CoreRateState::default();
    load_dataset(&state, dir.path().to_str(), None).unwrap();

    let response = rate_core_json(&state, CORE).unwrap();
    assert_eq!(response.result.overall.score, 50);
    assert_eq!(response.rank, RankBand::Common);
    assert_eq!(response.detail.archetype, Archetype::Crit);
    assert_eq!(response.detail.talent, Talent::Attack);
    assert_eq!(response.detail.details.len(), 2);
}

#[test]
fn test_embedded_dataset_and_bad_params() {
    let state = CoreRateState::default();
    let bad = ScoringParams {
        triangle_main_stat_points: -5.0,
        ..ScoringParams::default()
    };
    assert!(load_dataset(&state, None, Some(bad)).is_err());
    assert!(state.scorer.lock().unwrap().is_none());

    load_dataset(&state, None, None).unwrap();
    assert!(rate_core_json(&state, CORE).is_ok());
}

#[test]
fn test_invalid_core_is_reported() {
    let state = CoreRateState::default();
    load_dataset(&state, None, None).unwrap();

    let err = rate_core_json(&state, r#"{"type":"diamond","level":3,"color":"red","subStats":[]}"#)
        .unwrap_err();
    assert!(err.contains("2 to 4 sub-stats"), "{}", err);

    assert!(rate_core_json(&state, "not json").is_err());
}
