#![allow(dead_code)]

use corerate::config::ScoringParams;
use corerate::model::{Color, Core, EnhancementLevel, RawValue, Shape, StatKey, SubStat};
use corerate::reference::ReferenceData;
use corerate::scorer::Scorer;
use std::fs;
use std::path::Path;

pub const VALUE_RANGES: &str = r#"{
  "subStatValueRanges": {
    "def":      { "initial": { "min": 80, "max": 120 }, "upgrade": { "min": 80, "max": 120 } },
    "atk":      { "initial": { "min": 10, "max": 20 },  "upgrade": { "min": 10, "max": 20 } },
    "critRate": { "initial": { "min": 2, "max": 4 },    "upgrade": { "min": 2, "max": 4 } },
    "critDmg":  { "initial": { "min": 4, "max": 8 },    "upgrade": { "min": 4, "max": 8 } },
    "weakDmg":  { "initial": { "min": 4, "max": 6 },    "upgrade": { "min": 4, "max": 6 } },
    "atkBoost": { "initial": { "min": 3, "max": 5 },    "upgrade": { "min": 3, "max": 5 } }
  },
  "mainStatValue": {
    "critDmg": { "base": 8, "perLevel": 1.5 },
    "atk":     { "base": 30, "perLevel": 6 },
    "def":     { "base": 30, "perLevel": 6 }
  }
}"#;

pub const WEIGHTS: &str = r#"{
  "crit": {
    "attack":  { "subStats": { "critRate": 100, "critDmg": 100, "atk": 50 },
                 "triangleMainStat": { "critDmg": 100, "atkBoost": 60 } },
    "defense": { "subStats": { "def": 100, "critRate": 50 },
                 "triangleMainStat": { "critRate": 100 } },
    "health":  { "subStats": { "critRate": 20 } }
  },
  "weak": {
    "attack":  { "subStats": { "weakDmg": 100, "atk": 80 },
                 "triangleMainStat": { "weakDmg": 100 } },
    "defense": { "subStats": { "weakDmg": 50 } },
    "health":  { "subStats": { "def": 100 } }
  }
}"#;

pub const RECOMMEND_SETS: &str = r#"{
  "attack": {
    "red": [
      { "character": "Ada", "set": "Crimson Oath", "talent": "attack" },
      { "character": "Bryn", "set": "Blazing Pulse", "talent": "attack" }
    ],
    "green": []
  },
  "health": {
    "blue": [ { "character": "Cora", "set": "Tidal Vow", "talent": "health" } ]
  }
}"#;

pub const CORE_META: &str = r#"{
  "subStat": {
    "hp": "HP", "atk": "ATK", "def": "DEF",
    "critRate": "Crit Rate", "critDmg": "Crit DMG",
    "weakDmg": "Weakness DMG", "atkBoost": "ATK Boost"
  },
  "mainStat": {
    "options": { "def": "DEF", "atk": "ATK", "hp": "HP", "critDmg": "Crit DMG", "atkBoost": "ATK Boost" },
    "diamond": "hp",
    "uni": "atk",
    "square": ["def", "atkBoost"],
    "triangle": ["critRate", "critDmg", "weakDmg", "atkBoost"]
  },
  "type": { "diamond": "Diamond Core", "square": "Square Core", "uni": "Uni Core", "triangle": "Triangle Core" },
  "color": { "red": "Red", "blue": "Blue", "green": "Green" }
}"#;

pub fn test_reference() -> ReferenceData {
    ReferenceData::from_readers(
        VALUE_RANGES.as_bytes(),
        WEIGHTS.as_bytes(),
        RECOMMEND_SETS.as_bytes(),
        CORE_META.as_bytes(),
    )
    .expect("test tables must load")
}

pub fn test_scorer() -> Scorer {
    Scorer::new(test_reference(), ScoringParams::default())
}

/// Writes the test tables into `dir` under their canonical file names.
pub fn write_dataset(dir: &Path) {
    use corerate::reference::{CORE_META_FILE, RECOMMEND_SETS_FILE, VALUE_RANGES_FILE, WEIGHTS_FILE};
    fs::write(dir.join(VALUE_RANGES_FILE), VALUE_RANGES).unwrap();
    fs::write(dir.join(WEIGHTS_FILE), WEIGHTS).unwrap();
    fs::write(dir.join(RECOMMEND_SETS_FILE), RECOMMEND_SETS).unwrap();
    fs::write(dir.join(CORE_META_FILE), CORE_META).unwrap();
}

/// Builder for Core to clean up tests
pub struct CoreBuilder {
    core: Core,
}

impl CoreBuilder {
    pub fn new(shape: Shape) -> Self {
        let main_stat = match shape {
            Shape::Diamond => StatKey::Hp,
            Shape::Uni => StatKey::Atk,
            Shape::Square => StatKey::Def,
            Shape::Triangle => StatKey::CritDmg,
        };
        Self {
            core: Core {
                shape,
                level: EnhancementLevel::MAX,
                color: Color::Red,
                main_stat,
                sub_stats: Vec::new(),
            },
        }
    }

    pub fn level(mut self, level: u8) -> Self {
        self.core.level = EnhancementLevel::new(level).unwrap();
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.core.color = color;
        self
    }

    pub fn main(mut self, key: StatKey) -> Self {
        self.core.main_stat = key;
        self
    }

    pub fn sub(mut self, key: StatKey, value: impl Into<RawValue>, upgrades: u8) -> Self {
        self.core.sub_stats.push(SubStat::new(key, value, upgrades));
        self
    }

    pub fn build(self) -> Core {
        self.core
    }
}
