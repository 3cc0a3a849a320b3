mod common;

use common::{test_reference, test_scorer, CoreBuilder};
use corerate::config::ScoringParams;
use corerate::model::{Shape, StatKey};
use corerate::scorer::narrative::{commentary, dead_weight, highlight, RankTier};
use corerate::scorer::StatDetail;
use regex::Regex;
use rstest::rstest;

fn detail(key: StatKey, weight: f64, quality: u8) -> StatDetail {
    StatDetail {
        key,
        weight,
        quality,
        upgrade_count: 0,
        total_rolls: 1,
        scored: true,
    }
}

#[rstest]
#[case(100, RankTier::Graduate)]
#[case(95, RankTier::Graduate)]
#[case(94, RankTier::TopTier)]
#[case(85, RankTier::TopTier)]
#[case(84, RankTier::Excellent)]
#[case(75, RankTier::Excellent)]
#[case(74, RankTier::AboveAverage)]
#[case(60, RankTier::AboveAverage)]
#[case(59, RankTier::Bridge)]
#[case(40, RankTier::Bridge)]
#[case(39, RankTier::Fodder)]
#[case(0, RankTier::Fodder)]
fn test_rank_thresholds(#[case] score: u8, #[case] expected: RankTier) {
    assert_eq!(RankTier::from_score(score), expected);
}

#[test]
fn test_highlight_picks_best_heavy_stat() {
    let details = vec![
        detail(StatKey::Atk, 50.0, 99),
        detail(StatKey::CritRate, 100.0, 60),
        detail(StatKey::CritDmg, 80.0, 75),
        detail(StatKey::AtkBoost, 90.0, 75),
    ];
    let best = highlight(&details, 80.0).unwrap();
    assert_eq!(best.key, StatKey::CritDmg, "ties keep the earlier stat");
}

#[test]
fn test_highlight_none_below_threshold() {
    let details = vec![detail(StatKey::Atk, 79.9, 100)];
    assert!(highlight(&details, 80.0).is_none());
}

#[test]
fn test_dead_weight_is_exactly_zero_weight() {
    let details = vec![
        detail(StatKey::Def, 0.0, 100),
        detail(StatKey::Atk, 0.5, 10),
        detail(StatKey::Hp, 0.0, 0),
    ];
    let flaws: Vec<&StatKey> = dead_weight(&details).map(|d| &d.key).collect();
    assert_eq!(flaws, vec![&StatKey::Def, &StatKey::Hp]);
}

#[test]
fn test_commentary_lines_are_well_formed() {
    let reference = test_reference();
    let params = ScoringParams::default();
    let core = CoreBuilder::new(Shape::Diamond)
        .level(3)
        .sub(StatKey::Def, 100.0, 0)
        .sub(StatKey::CritRate, 3.0, 0)
        .build();
    let details = vec![
        detail(StatKey::Def, 0.0, 50),
        detail(StatKey::CritRate, 100.0, 88),
    ];

    let text = commentary(&details, 77, &core, &reference.meta, &params);

    let patterns = [
        Regex::new(r"^📊 Overall: \*\*[^*]+\*\*$").unwrap(),
        Regex::new(r"^✨ Highlight: .+ \(quality \d{1,3}\)$").unwrap(),
        Regex::new(r"^⚠️ Flaws: .+ \(dead weight\)$").unwrap(),
        Regex::new(r"^📈 Potential: \d+ enhancement opportunities left\.$").unwrap(),
    ];
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), patterns.len(), "{}", text);
    for (line, re) in lines.iter().zip(patterns.iter()) {
        assert!(re.is_match(line), "line {:?} does not match {}", line, re);
    }
    assert!(text.contains("Excellent core, worth investing"));
    assert!(text.contains("Crit Rate (quality 88)"));
    assert!(text.contains("4 enhancement opportunities"));
}

#[test]
fn test_cutoff_boundary() {
    let reference = test_reference();
    let params = ScoringParams::default();
    let core = CoreBuilder::new(Shape::Uni).sub(StatKey::Atk, 15.0, 0).build();
    let details = vec![detail(StatKey::Atk, 50.0, 40)];

    let at_cutoff = commentary(&details, 40, &core, &reference.meta, &params);
    assert!(at_cutoff.starts_with("📊 Overall: **Usable as a bridge core**"));

    let below = commentary(&details, 39, &core, &reference.meta, &params);
    assert!(!below.contains("📊"));
}

#[test]
fn test_square_emphasis_is_single_wrapped() {
    let scorer = test_scorer();
    let core = CoreBuilder::new(Shape::Square)
        .sub(StatKey::Def, 120.0, 0)
        .sub(StatKey::CritRate, 4.0, 0)
        .build();
    let result = scorer.score(&core);

    let commentary = &result.crit.commentary;
    assert!(!commentary.contains("****"));
    let conclusion = commentary.lines().last().unwrap();
    let re = Regex::new(r"^\*\*Conclusion\*\*: if the main stat fits, this is a \*\*[^*]+\*\*$")
        .unwrap();
    assert!(re.is_match(conclusion), "{}", conclusion);
    assert!(commentary.contains("✅ Fully enhanced; the roll pattern is final."));
}

#[test]
fn test_no_flaw_section_without_dead_weight() {
    let reference = test_reference();
    let params = ScoringParams::default();
    let core = CoreBuilder::new(Shape::Diamond).sub(StatKey::Def, 100.0, 0).build();
    let details = vec![detail(StatKey::Def, 60.0, 50)];

    let text = commentary(&details, 50, &core, &reference.meta, &params);
    assert!(!text.contains("Flaws"));
    assert!(!text.contains("Highlight"));
}
