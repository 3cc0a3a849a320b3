use crate::model::{Archetype, Color, EnhancementLevel, Shape, StatKey, SubStat, Talent};
use crate::reference::Pairing;
use serde::{Deserialize, Serialize};

/// Per sub-stat breakdown of one build evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDetail {
    pub key: StatKey,
    pub weight: f64,
    /// Rounded combined roll quality, 0..=100.
    pub quality: u8,
    pub upgrade_count: u8,
    pub total_rolls: u8,
    /// False when the reference data has no value range for the stat.
    pub scored: bool,
}

/// Result of running the pipeline for one (archetype, talent) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEvaluation {
    pub archetype: Archetype,
    pub talent: Talent,
    pub score: u8,
    pub sub_stat_score: u8,
    pub details: Vec<StatDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMainStat {
    pub key: StatKey,
    pub value: f64,
}

/// Recommended partners for the winning talent, or a placeholder text when
/// the table has nothing for the talent and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recommendation {
    Pairings(Vec<Pairing>),
    Unavailable(String),
}

impl Recommendation {
    pub fn pairings(&self) -> &[Pairing] {
        match self {
            Self::Pairings(p) => p,
            Self::Unavailable(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallBlock {
    pub score: u8,
    pub talent: Talent,
    pub recommend_sets: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeBlock {
    pub score: u8,
    pub talent: Talent,
    pub commentary: String,
}

/// The engine's output for one core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    #[serde(rename = "type")]
    pub shape: Shape,
    pub level: EnhancementLevel,
    pub color: Color,
    pub main_stat: ResolvedMainStat,
    pub sub_stats: Vec<SubStat>,
    pub overall: OverallBlock,
    pub crit: ArchetypeBlock,
    pub weak: ArchetypeBlock,
}

impl ScoringResult {
    pub fn archetype(&self, archetype: Archetype) -> &ArchetypeBlock {
        match archetype {
            Archetype::Crit => &self.crit,
            Archetype::Weak => &self.weak,
        }
    }

    /// The archetype whose talent is reported as overall. Crit keeps ties.
    pub fn winning_archetype(&self) -> Archetype {
        if self.weak.score > self.crit.score {
            Archetype::Weak
        } else {
            Archetype::Crit
        }
    }
}
