use crate::consts::SCORE_CEILING;
use crate::error::{CoreRateError, CrResult};
use crate::model::{Archetype, BuildTable, Color, Shape, StatKey, Talent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub const VALUE_RANGES_FILE: &str = "value_ranges.json";
pub const WEIGHTS_FILE: &str = "weights.json";
pub const RECOMMEND_SETS_FILE: &str = "recommend_sets.json";
pub const CORE_META_FILE: &str = "core_meta.json";

const EMBEDDED_VALUE_RANGES: &str = include_str!("../data/value_ranges.json");
const EMBEDDED_WEIGHTS: &str = include_str!("../data/weights.json");
const EMBEDDED_RECOMMEND_SETS: &str = include_str!("../data/recommend_sets.json");
const EMBEDDED_CORE_META: &str = include_str!("../data/core_meta.json");

/// Inclusive numeric range in the stat's native unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatRange {
    pub initial: ValueRange,
    pub upgrade: ValueRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainStatGrowth {
    pub base: f64,
    pub per_level: f64,
}

impl MainStatGrowth {
    pub fn value_at(&self, level: u8) -> f64 {
        self.base + self.per_level * f64::from(level)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTables {
    #[serde(rename = "subStatValueRanges")]
    pub sub_stat_ranges: HashMap<StatKey, StatRange>,
    #[serde(rename = "mainStatValue", default)]
    pub main_stat_values: HashMap<StatKey, MainStatGrowth>,
}

/// Importance weights of one (archetype, talent) build.
/// Absent entries weigh 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildWeights {
    #[serde(default)]
    pub sub_stats: HashMap<StatKey, f64>,
    #[serde(default)]
    pub triangle_main_stat: HashMap<StatKey, f64>,
}

impl BuildWeights {
    pub fn sub_stat_weight(&self, key: &StatKey) -> f64 {
        self.sub_stats.get(key).copied().unwrap_or(0.0)
    }

    pub fn triangle_main_weight(&self, key: &StatKey) -> f64 {
        self.triangle_main_stat.get(key).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub character: String,
    pub set: String,
    pub talent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainStatMeta {
    #[serde(default)]
    pub options: HashMap<StatKey, String>,
    pub diamond: StatKey,
    pub uni: StatKey,
    #[serde(default)]
    pub square: Vec<StatKey>,
    #[serde(default)]
    pub triangle: Vec<StatKey>,
}

/// Which main stats a shape may carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MainStatRule<'a> {
    Fixed(&'a StatKey),
    OneOf(&'a [StatKey]),
}

/// Display labels and main-stat catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreMeta {
    #[serde(default)]
    pub sub_stat: HashMap<StatKey, String>,
    pub main_stat: MainStatMeta,
    #[serde(rename = "type", default)]
    pub shape: HashMap<Shape, String>,
    #[serde(default)]
    pub color: HashMap<Color, String>,
}

impl CoreMeta {
    pub fn sub_stat_label<'a>(&'a self, key: &'a StatKey) -> &'a str {
        self.sub_stat
            .get(key)
            .map(String::as_str)
            .unwrap_or_else(|| key.as_str())
    }

    pub fn main_stat_label<'a>(&'a self, key: &'a StatKey) -> &'a str {
        self.main_stat
            .options
            .get(key)
            .map(String::as_str)
            .unwrap_or_else(|| key.as_str())
    }

    pub fn shape_label(&self, shape: Shape) -> String {
        self.shape
            .get(&shape)
            .cloned()
            .unwrap_or_else(|| shape.to_string())
    }

    pub fn color_label(&self, color: Color) -> String {
        self.color
            .get(&color)
            .cloned()
            .unwrap_or_else(|| color.to_string())
    }

    pub fn main_stat_rule(&self, shape: Shape) -> MainStatRule<'_> {
        match shape {
            Shape::Diamond => MainStatRule::Fixed(&self.main_stat.diamond),
            Shape::Uni => MainStatRule::Fixed(&self.main_stat.uni),
            Shape::Square => MainStatRule::OneOf(&self.main_stat.square),
            Shape::Triangle => MainStatRule::OneOf(&self.main_stat.triangle),
        }
    }
}

type RawWeights = HashMap<Archetype, HashMap<Talent, BuildWeights>>;
type RawRecommendations = HashMap<Talent, HashMap<Color, Vec<Pairing>>>;

/// The immutable reference dataset shared by every scoring call.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub values: ValueTables,
    pub weights: BuildTable<BuildWeights>,
    pub recommendations: HashMap<(Talent, Color), Vec<Pairing>>,
    pub meta: CoreMeta,
}

impl ReferenceData {
    /// The dataset compiled into the binary.
    pub fn embedded() -> CrResult<Self> {
        Self::from_readers(
            EMBEDDED_VALUE_RANGES.as_bytes(),
            EMBEDDED_WEIGHTS.as_bytes(),
            EMBEDDED_RECOMMEND_SETS.as_bytes(),
            EMBEDDED_CORE_META.as_bytes(),
        )
    }

    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> CrResult<Self> {
        let dir = dir.as_ref();
        info!("Loading reference data from {}", dir.display());

        let open = |name: &str| -> CrResult<BufReader<File>> {
            let path = dir.join(name);
            let file = File::open(&path).map_err(|e| {
                CoreRateError::Config(format!("could not open '{}': {}", path.display(), e))
            })?;
            Ok(BufReader::new(file))
        };

        Self::from_readers(
            open(VALUE_RANGES_FILE)?,
            open(WEIGHTS_FILE)?,
            open(RECOMMEND_SETS_FILE)?,
            open(CORE_META_FILE)?,
        )
    }

    pub fn from_readers<R1, R2, R3, R4>(
        values: R1,
        weights: R2,
        recommendations: R3,
        meta: R4,
    ) -> CrResult<Self>
    where
        R1: Read,
        R2: Read,
        R3: Read,
        R4: Read,
    {
        let values: ValueTables = serde_json::from_reader(values)?;
        let raw_weights: RawWeights = serde_json::from_reader(weights)?;
        let raw_recommendations: RawRecommendations = serde_json::from_reader(recommendations)?;
        let meta: CoreMeta = serde_json::from_reader(meta)?;

        let mut weights: BuildTable<BuildWeights> = BuildTable::default();
        for (archetype, talents) in raw_weights {
            for (talent, build) in talents {
                *weights.get_mut(archetype, talent) = build;
            }
        }

        let mut recommendations = HashMap::new();
        for (talent, colors) in raw_recommendations {
            for (color, pairings) in colors {
                recommendations.insert((talent, color), pairings);
            }
        }

        let data = Self {
            values,
            weights,
            recommendations,
            meta,
        };
        data.validate()?;

        info!(
            "Reference data ready: {} stat ranges, {} main stat curves, {} pairing entries",
            data.values.sub_stat_ranges.len(),
            data.values.main_stat_values.len(),
            data.recommendations.len()
        );
        Ok(data)
    }

    fn validate(&self) -> CrResult<()> {
        for (key, range) in &self.values.sub_stat_ranges {
            if !range.initial.is_valid() {
                return Err(CoreRateError::Validation(format!(
                    "subStatValueRanges.{}.initial has min {} > max {}",
                    key, range.initial.min, range.initial.max
                )));
            }
            if !range.upgrade.is_valid() {
                return Err(CoreRateError::Validation(format!(
                    "subStatValueRanges.{}.upgrade has min {} > max {}",
                    key, range.upgrade.min, range.upgrade.max
                )));
            }
        }

        for (key, growth) in &self.values.main_stat_values {
            if !growth.base.is_finite() || !growth.per_level.is_finite() {
                return Err(CoreRateError::Validation(format!(
                    "mainStatValue.{} is not a finite curve",
                    key
                )));
            }
        }

        for (archetype, talent, build) in self.weights.iter() {
            let tables = [
                ("subStats", &build.sub_stats),
                ("triangleMainStat", &build.triangle_main_stat),
            ];
            for (table, entries) in tables {
                for (key, &weight) in entries {
                    if !(0.0..=SCORE_CEILING).contains(&weight) {
                        return Err(CoreRateError::Validation(format!(
                            "weights.{}.{}.{}.{} = {} is outside [0, 100]",
                            archetype, talent, table, key, weight
                        )));
                    }
                }
            }
            debug!(
                "Build {}/{}: {} weighted sub stats",
                archetype,
                talent,
                build.sub_stats.len()
            );
        }

        Ok(())
    }

    pub fn stat_range(&self, key: &StatKey) -> Option<&StatRange> {
        self.values.sub_stat_ranges.get(key)
    }

    pub fn build_weights(&self, archetype: Archetype, talent: Talent) -> &BuildWeights {
        self.weights.get(archetype, talent)
    }

    /// Pairings for a talent and core color. An empty entry counts as absent.
    pub fn pairings(&self, talent: Talent, color: Color) -> Option<&[Pairing]> {
        self.recommendations
            .get(&(talent, color))
            .map(Vec::as_slice)
            .filter(|p| !p.is_empty())
    }

    pub fn main_stat_value(&self, key: &StatKey, level: u8) -> Option<f64> {
        self.values
            .main_stat_values
            .get(key)
            .map(|growth| growth.value_at(level))
    }
}
