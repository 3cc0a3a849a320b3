use corerate::model::{RawValue, StatKey, SubStat};
use corerate::presentation::{
    emphasis_runs, format_main_value, format_stat_value, ordered_sub_stats, plain_lines, RankBand,
    Run,
};
use rstest::rstest;

#[rstest]
#[case(100, RankBand::Perfect)]
#[case(95, RankBand::Perfect)]
#[case(90, RankBand::Top)]
#[case(80, RankBand::Excellent)]
#[case(60, RankBand::Good)]
#[case(59, RankBand::Common)]
#[case(40, RankBand::Common)]
#[case(12, RankBand::Fodder)]
fn test_rank_band(#[case] score: u8, #[case] expected: RankBand) {
    assert_eq!(RankBand::from_score(score), expected);
}

#[test]
fn test_rank_band_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&RankBand::Top).unwrap(), "\"top\"");
    assert_eq!(RankBand::Fodder.to_string(), "fodder");
}

#[test]
fn test_display_order() {
    let subs = vec![
        SubStat::new(StatKey::DefBoost, 4.0, 0),
        SubStat::new(StatKey::Other("luck".to_string()), 1.0, 0),
        SubStat::new(StatKey::Hp, 200.0, 1),
        SubStat::new(StatKey::CritRate, 3.0, 2),
    ];
    let keys: Vec<&str> = ordered_sub_stats(&subs)
        .iter()
        .map(|s| s.key.as_str())
        .collect();
    assert_eq!(keys, vec!["hp", "critRate", "defBoost", "luck"]);
}

#[test]
fn test_percent_suffix() {
    assert_eq!(format_stat_value(&StatKey::Atk, &RawValue::from(34.0)), "34");
    assert_eq!(format_stat_value(&StatKey::CritRate, &RawValue::from(3.5)), "3.5 %");
    assert_eq!(format_stat_value(&StatKey::WeakDmg, &RawValue::from("4.5")), "4.5 %");
    assert_eq!(format_main_value(&StatKey::CritRate, 4.0 + 0.8 * 15.0), "16 %");
    assert_eq!(format_main_value(&StatKey::Hp, 2400.0), "2400");
}

#[test]
fn test_emphasis_runs() {
    assert_eq!(
        emphasis_runs("📊 Overall: **Fodder** indeed"),
        vec![
            Run::Plain("📊 Overall: "),
            Run::Bold("Fodder"),
            Run::Plain(" indeed")
        ]
    );
    assert_eq!(
        emphasis_runs("**Conclusion**: a **Top**"),
        vec![Run::Bold("Conclusion"), Run::Plain(": a "), Run::Bold("Top")]
    );
    assert_eq!(emphasis_runs("no markers"), vec![Run::Plain("no markers")]);
    assert_eq!(emphasis_runs("open ** only"), vec![Run::Plain("open ** only")]);
    assert!(emphasis_runs("").is_empty());
}

#[test]
fn test_plain_lines_strip_markers() {
    let lines = plain_lines("📊 Overall: **Fodder**\n**Conclusion**: ok");
    assert_eq!(lines, vec!["📊 Overall: Fodder", "Conclusion: ok"]);
}
