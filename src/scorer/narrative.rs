use super::types::StatDetail;
use crate::config::ScoringParams;
use crate::consts::{RANK_ABOVE_AVERAGE, RANK_BRIDGE, RANK_EXCELLENT, RANK_GRADUATE, RANK_TOP_TIER};
use crate::model::{Core, Shape};
use crate::reference::CoreMeta;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use strum_macros::{Display, EnumIter};

/// Line separator between commentary sections.
pub const LINE_BREAK: char = '\n';

pub const NOT_WORTH_INVESTING: &str =
    "Sub-stats are too weak or do not fit this build; not worth investing.";

/// Overall rank label derived from a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    Fodder,
    Bridge,
    AboveAverage,
    Excellent,
    TopTier,
    Graduate,
}

impl RankTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= RANK_GRADUATE => Self::Graduate,
            s if s >= RANK_TOP_TIER => Self::TopTier,
            s if s >= RANK_EXCELLENT => Self::Excellent,
            s if s >= RANK_ABOVE_AVERAGE => Self::AboveAverage,
            s if s >= RANK_BRIDGE => Self::Bridge,
            _ => Self::Fodder,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Graduate => "Graduate-tier core",
            Self::TopTier => "Top-tier core, prioritize resources",
            Self::Excellent => "Excellent core, worth investing",
            Self::AboveAverage => "Above-average core, usable as a bridge",
            Self::Bridge => "Usable as a bridge core",
            Self::Fodder => "Fodder",
        }
    }

    /// Label wrapped in emphasis markers.
    pub fn emphasized(self) -> String {
        format!("**{}**", self.label())
    }
}

/// The highest-quality stat among those weighted at least `threshold`.
/// Ties keep the earlier stat.
pub fn highlight(details: &[StatDetail], threshold: f64) -> Option<&StatDetail> {
    details
        .iter()
        .filter(|d| d.weight >= threshold)
        .fold(None, |best: Option<&StatDetail>, d| match best {
            Some(b) if b.quality >= d.quality => Some(b),
            _ => Some(d),
        })
}

/// Stats the build gives no weight at all.
pub fn dead_weight(details: &[StatDetail]) -> impl Iterator<Item = &StatDetail> {
    details.iter().filter(|d| d.weight == 0.0)
}

/// Builds the commentary for one archetype's best evaluation.
///
/// Sections are separated by [`LINE_BREAK`] and rank phrases are wrapped in
/// `**` emphasis markers; rendering both is left to the presentation layer.
pub fn commentary(
    details: &[StatDetail],
    score: u8,
    core: &Core,
    meta: &CoreMeta,
    params: &ScoringParams,
) -> String {
    let is_square = core.shape == Shape::Square;
    let mut text = String::new();

    if is_square {
        let _ = writeln!(
            text,
            "Square core main stat [{}] must be judged by the reader.",
            meta.main_stat_label(&core.main_stat)
        );
    }

    if score < params.invest_score_cutoff && !is_square {
        text.push_str(NOT_WORTH_INVESTING);
        return text;
    }

    let rank = RankTier::from_score(score);
    let _ = writeln!(text, "📊 Overall: {}", rank.emphasized());

    if let Some(best) = highlight(details, params.highlight_weight_threshold) {
        let _ = writeln!(
            text,
            "✨ Highlight: {} (quality {})",
            meta.sub_stat_label(&best.key),
            best.quality
        );
    }

    let flaws: Vec<&str> = dead_weight(details)
        .map(|d| meta.sub_stat_label(&d.key))
        .collect();
    if !flaws.is_empty() {
        let _ = writeln!(text, "⚠️ Flaws: {} (dead weight)", flaws.join(", "));
    }

    if core.level.is_maxed() {
        text.push_str("✅ Fully enhanced; the roll pattern is final.");
    } else {
        let remaining = core.level.remaining_enhancements();
        if remaining > 0 {
            let _ = write!(
                text,
                "📈 Potential: {} enhancement opportunities left.",
                remaining
            );
        }
    }

    if is_square {
        let _ = write!(
            text,
            "{}**Conclusion**: if the main stat fits, this is a {}",
            LINE_BREAK,
            rank.emphasized()
        );
    }

    text.trim().to_string()
}
