use crate::config::ScoringParams;
use crate::input::CoreInput;
use crate::presentation::RankBand;
use crate::reference::ReferenceData;
use crate::scorer::{BuildEvaluation, Scorer, ScoringResult};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::info;

/// The global state required to run CoreRate services.
pub struct CoreRateState {
    pub scorer: Mutex<Option<Arc<Scorer>>>,
}

impl Default for CoreRateState {
    fn default() -> Self {
        Self {
            scorer: Mutex::new(None),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub result: ScoringResult,
    pub rank: RankBand,
    /// Full breakdown of the winning build.
    pub detail: BuildEvaluation,
}

/// Service: Initialize the Scorer from a data directory, or from the
/// embedded dataset when none is given.
pub fn load_dataset(
    state: &CoreRateState,
    data_dir: Option<&str>,
    params: Option<ScoringParams>,
) -> Result<String, String> {
    let reference = match data_dir {
        Some(dir) => ReferenceData::load_from_dir(dir),
        None => ReferenceData::embedded(),
    }
    .map_err(|e| e.to_string())?;

    let params = params.unwrap_or_default();
    params.validate().map_err(|e| e.to_string())?;

    let scorer = Scorer::new(reference, params);

    let mut guard = state.scorer.lock().map_err(|e| e.to_string())?;
    *guard = Some(Arc::new(scorer));

    info!(
        "API: dataset loaded from {}",
        data_dir.unwrap_or("embedded tables")
    );
    Ok("Dataset Loaded Successfully".to_string())
}

fn current_scorer(state: &CoreRateState) -> Result<Arc<Scorer>, String> {
    let guard = state.scorer.lock().map_err(|e| e.to_string())?;
    guard
        .clone()
        .ok_or_else(|| "Scorer not initialized. Load dataset first.".to_string())
}

/// Validates and scores one core against the loaded dataset.
pub fn rate_core(scorer: &Scorer, input: CoreInput) -> Result<RatingResponse, String> {
    let core = input
        .validate(&scorer.reference.meta)
        .map_err(|e| e.to_string())?;

    let result = scorer.score(&core);
    let archetype = result.winning_archetype();
    let detail = scorer.evaluate(archetype, result.overall.talent, &core);

    Ok(RatingResponse {
        rank: RankBand::from_score(result.overall.score),
        result,
        detail,
    })
}

/// Service: Rate a core given as JSON text, as produced by a form.
pub fn rate_core_json(state: &CoreRateState, json: &str) -> Result<RatingResponse, String> {
    let scorer = current_scorer(state)?;
    let input: CoreInput = serde_json::from_str(json).map_err(|e| e.to_string())?;
    rate_core(&scorer, input)
}
