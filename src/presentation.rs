use crate::consts::{RANK_ABOVE_AVERAGE, RANK_BRIDGE, RANK_EXCELLENT, RANK_GRADUATE, RANK_TOP_TIER};
use crate::model::{RawValue, StatKey, SubStat};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Coarse band of the overall score, drawn as a progress bar by front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RankBand {
    Fodder,
    Common,
    Good,
    Excellent,
    Top,
    Perfect,
}

impl RankBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= RANK_GRADUATE => Self::Perfect,
            s if s >= RANK_TOP_TIER => Self::Top,
            s if s >= RANK_EXCELLENT => Self::Excellent,
            s if s >= RANK_ABOVE_AVERAGE => Self::Good,
            s if s >= RANK_BRIDGE => Self::Common,
            _ => Self::Fodder,
        }
    }
}

pub const SUB_STAT_DISPLAY_ORDER: [StatKey; 10] = StatKey::KNOWN;

/// Sub-stats in display order. Unknown stats follow in input order.
pub fn ordered_sub_stats(sub_stats: &[SubStat]) -> Vec<&SubStat> {
    let mut ordered: Vec<&SubStat> = SUB_STAT_DISPLAY_ORDER
        .iter()
        .filter_map(|key| sub_stats.iter().find(|s| &s.key == key))
        .collect();
    ordered.extend(sub_stats.iter().filter(|s| !s.key.is_known()));
    ordered
}

pub fn needs_percent(key: &StatKey) -> bool {
    !key.is_flat()
}

pub fn format_stat_value(key: &StatKey, value: &RawValue) -> String {
    if needs_percent(key) {
        format!("{} %", value)
    } else {
        value.to_string()
    }
}

/// Main-stat display value, trimmed to two decimals.
pub fn format_main_value(key: &StatKey, value: f64) -> String {
    let trimmed = (value * 100.0).round() / 100.0;
    format_stat_value(key, &RawValue::Numeric(trimmed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

/// Splits one commentary line into plain and bold runs on `**...**`.
/// An unpaired marker stays in the plain text.
pub fn emphasis_runs(line: &str) -> Vec<Run<'_>> {
    const MARK: &str = "**";
    let mut runs = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find(MARK) {
        let after_open = &rest[open + MARK.len()..];
        let Some(close) = after_open.find(MARK) else {
            break;
        };
        if open > 0 {
            runs.push(Run::Plain(&rest[..open]));
        }
        runs.push(Run::Bold(&after_open[..close]));
        rest = &after_open[close + MARK.len()..];
    }

    if !rest.is_empty() {
        runs.push(Run::Plain(rest));
    }
    runs
}

/// Commentary with emphasis markers removed, one entry per line.
pub fn plain_lines(commentary: &str) -> Vec<String> {
    commentary
        .split('\n')
        .map(|line| {
            emphasis_runs(line)
                .into_iter()
                .map(|run| match run {
                    Run::Plain(s) | Run::Bold(s) => s,
                })
                .collect::<String>()
        })
        .collect()
}
