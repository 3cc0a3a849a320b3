use crate::reference::StatRange;
use tracing::debug;

/// Reconstructed decomposition of a sub-stat value into its first roll and
/// the average of its enhancement rolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollEstimate {
    pub initial: f64,
    /// `None` when the stat was never enhanced.
    pub average_upgrade: Option<f64>,
}

/// Band of initial values consistent with `value` after `upgrades`
/// enhancement rolls, intersected with the known initial range.
/// The band is empty when `min > max`.
pub fn feasible_initial_band(value: f64, upgrades: u8, range: &StatRange) -> (f64, f64) {
    let n = f64::from(upgrades);
    let inferred_min = value - n * range.upgrade.max;
    let inferred_max = value - n * range.upgrade.min;
    (
        inferred_min.max(range.initial.min),
        inferred_max.min(range.initial.max),
    )
}

/// Midpoint estimate of the initial roll under a uniform-range assumption.
///
/// * No enhancements: the current value is the initial roll.
/// * Empty feasible band (inconsistent input): the initial range minimum.
/// * Otherwise: the midpoint of the feasible band.
pub fn estimate_rolls(value: f64, upgrades: u8, range: &StatRange) -> RollEstimate {
    if upgrades == 0 {
        return RollEstimate {
            initial: value,
            average_upgrade: None,
        };
    }

    let (valid_min, valid_max) = feasible_initial_band(value, upgrades, range);
    let initial = if valid_min > valid_max {
        debug!(
            "Infeasible roll band [{:.3}, {:.3}] for value {} with {} upgrades, using range floor",
            valid_min, valid_max, value, upgrades
        );
        range.initial.min
    } else {
        (valid_min + valid_max) / 2.0
    };

    RollEstimate {
        initial,
        average_upgrade: Some((value - initial) / f64::from(upgrades)),
    }
}
