use crate::consts::SCORE_CEILING;
use crate::error::{CoreRateError, CrResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MISSING_PAIRING: &str = "No suitable pairing available";

/// Policy knobs of the scoring engine.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Points a triangle core can earn from its main stat. The remainder
    /// of 100 is earned by the sub-stat aggregate.
    #[arg(long, default_value_t = 70.0)]
    pub triangle_main_stat_points: f64,

    /// Minimum importance weight for a sub-stat to be named as a highlight.
    #[arg(long, default_value_t = 80.0)]
    pub highlight_weight_threshold: f64,

    /// Non-square cores scoring below this get the short "not worth
    /// investing" commentary.
    #[arg(long, default_value_t = 40)]
    pub invest_score_cutoff: u8,

    #[arg(long, default_value = DEFAULT_MISSING_PAIRING)]
    pub missing_pairing_text: String,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            triangle_main_stat_points: 70.0,
            highlight_weight_threshold: 80.0,
            invest_score_cutoff: 40,
            missing_pairing_text: DEFAULT_MISSING_PAIRING.to_string(),
        }
    }
}

impl ScoringParams {
    #[inline]
    pub fn triangle_sub_stat_points(&self) -> f64 {
        SCORE_CEILING - self.triangle_main_stat_points
    }

    pub fn validate(&self) -> CrResult<()> {
        if !(0.0..=SCORE_CEILING).contains(&self.triangle_main_stat_points) {
            return Err(CoreRateError::Config(format!(
                "triangle_main_stat_points must be within [0, 100], got {}",
                self.triangle_main_stat_points
            )));
        }
        if !self.highlight_weight_threshold.is_finite() {
            return Err(CoreRateError::Config(
                "highlight_weight_threshold must be finite".to_string(),
            ));
        }
        if self.missing_pairing_text.trim().is_empty() {
            return Err(CoreRateError::Config(
                "missing_pairing_text must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CrResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CoreRateError::Config(format!(
                "failed to read params file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let params: Self = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    /// Overrides fields with the CLI values the user typed explicitly,
    /// leaving file-provided values in place for defaulted flags.
    pub fn merge_from_cli(&mut self, cli_params: &ScoringParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field.clone();
                }
            };
        }

        update_if_present!(triangle_main_stat_points, "triangle_main_stat_points");
        update_if_present!(highlight_weight_threshold, "highlight_weight_threshold");
        update_if_present!(invest_score_cutoff, "invest_score_cutoff");
        update_if_present!(missing_pairing_text, "missing_pairing_text");
    }
}
