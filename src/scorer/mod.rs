pub mod engine;
pub mod inference;
pub mod narrative;
pub mod normalize;
pub mod quality;
pub mod types;

pub use self::narrative::RankTier;
pub use self::types::{BuildEvaluation, Recommendation, ScoringResult, StatDetail};
use crate::config::ScoringParams;
use crate::error::CrResult;
use crate::model::{Archetype, Core, Talent};
use crate::reference::ReferenceData;

/// The scoring engine: a read-only reference dataset plus policy parameters.
///
/// Scoring borrows `&self` only, so one `Scorer` can serve any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub reference: ReferenceData,
    pub params: ScoringParams,
}

impl Scorer {
    pub fn new(reference: ReferenceData, params: ScoringParams) -> Self {
        Self { reference, params }
    }

    /// Embedded dataset with default parameters.
    pub fn with_defaults() -> CrResult<Self> {
        Ok(Self::new(ReferenceData::embedded()?, ScoringParams::default()))
    }

    /// Scores a core against every archetype and talent.
    pub fn score(&self, core: &Core) -> ScoringResult {
        engine::score_core(self, core)
    }

    /// Detailed evaluation of a single build.
    pub fn evaluate(&self, archetype: Archetype, talent: Talent, core: &Core) -> BuildEvaluation {
        engine::evaluate_build(self, archetype, talent, core)
    }
}
