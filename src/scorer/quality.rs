use super::inference::estimate_rolls;
use crate::config::ScoringParams;
use crate::consts::SCORE_CEILING;
use crate::model::Shape;
use crate::reference::{StatRange, ValueRange};

/// How the main stat takes part in the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainStatPolicy {
    /// Main stat weight earns a fixed share of the score, sub-stats the rest.
    Gated,
    /// Score is the sub-stat aggregate alone.
    SubStatsOnly,
}

impl MainStatPolicy {
    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Triangle => Self::Gated,
            Shape::Diamond | Shape::Uni | Shape::Square => Self::SubStatsOnly,
        }
    }
}

/// Position of `value` inside `range` as a rounded 0..=100 score.
/// Values outside the range clamp to the nearest bound.
pub fn range_quality(value: f64, range: &ValueRange) -> f64 {
    let span = range.span();
    let ratio = if span > 0.0 {
        (value - range.min) / span
    } else if value >= range.min {
        // Degenerate single-value range.
        1.0
    } else {
        0.0
    };
    (ratio.clamp(0.0, 1.0) * SCORE_CEILING).round()
}

/// Combined roll quality of one sub-stat, unrounded.
///
/// The initial roll and each enhancement roll count once, so the result is
/// `(initial + upgrade * n) / (1 + n)` with both parts scored against their
/// own range.
pub fn roll_quality(value: f64, upgrades: u8, range: &StatRange) -> f64 {
    let estimate = estimate_rolls(value, upgrades, range);
    let initial_quality = range_quality(estimate.initial, &range.initial);

    match estimate.average_upgrade {
        Some(avg) => {
            let n = f64::from(upgrades);
            let upgrade_quality = range_quality(avg, &range.upgrade);
            (initial_quality + upgrade_quality * n) / (1.0 + n)
        }
        None => initial_quality,
    }
}

/// Running weighted mean of sub-stat qualities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedQuality {
    weighted_sum: f64,
    weight_sum: f64,
}

impl WeightedQuality {
    pub fn add(&mut self, quality: f64, weight: f64) {
        self.weighted_sum += quality * weight;
        self.weight_sum += weight;
    }

    /// Rounded aggregate, 0 when every weight is 0.
    pub fn score(&self) -> u8 {
        if self.weight_sum == 0.0 {
            0
        } else {
            to_score(self.weighted_sum / self.weight_sum)
        }
    }
}

/// Final build score from the sub-stat aggregate and the shape's policy.
///
/// `main_stat_weight` is only consulted for gated shapes.
pub fn apply_main_stat_policy<F>(
    shape: Shape,
    sub_stat_score: u8,
    main_stat_weight: F,
    params: &ScoringParams,
) -> u8
where
    F: FnOnce() -> f64,
{
    match MainStatPolicy::for_shape(shape) {
        MainStatPolicy::SubStatsOnly => sub_stat_score,
        MainStatPolicy::Gated => {
            let main_part = main_stat_weight() / SCORE_CEILING * params.triangle_main_stat_points;
            let sub_part =
                f64::from(sub_stat_score) / SCORE_CEILING * params.triangle_sub_stat_points();
            to_score(main_part + sub_part)
        }
    }
}

#[inline]
pub(crate) fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, SCORE_CEILING) as u8
}
