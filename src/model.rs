use crate::consts::{LEVEL_STEP, MAX_LEVEL};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    strum_macros::EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Diamond,
    Square,
    Uni,
    Triangle,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    strum_macros::EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
    Purple,
}

/// Scoring profile. Declaration order is the evaluation order, and the
/// earlier archetype wins ties.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    strum_macros::EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Crit,
    Weak,
}

/// Character affinity. Declaration order is the evaluation order, and the
/// earlier talent wins ties.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    strum_macros::EnumCount,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Talent {
    Attack,
    Defense,
    Health,
}

/// Stat identifier as it appears in the reference tables and in input.
///
/// Unknown identifiers are kept as `Other` instead of being rejected: they
/// have no value range and no weight, so they simply score zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString)]
pub enum StatKey {
    #[strum(serialize = "hp")]
    Hp,
    #[strum(serialize = "atk")]
    Atk,
    #[strum(serialize = "def")]
    Def,
    #[strum(serialize = "critRate")]
    CritRate,
    #[strum(serialize = "critDmg")]
    CritDmg,
    #[strum(serialize = "oathDmg")]
    OathDmg,
    #[strum(serialize = "weakDmg")]
    WeakDmg,
    #[strum(serialize = "hpBoost")]
    HpBoost,
    #[strum(serialize = "atkBoost")]
    AtkBoost,
    #[strum(serialize = "defBoost")]
    DefBoost,
    #[strum(default)]
    Other(String),
}

impl StatKey {
    pub const KNOWN: [StatKey; 10] = [
        StatKey::Hp,
        StatKey::Atk,
        StatKey::Def,
        StatKey::CritRate,
        StatKey::CritDmg,
        StatKey::OathDmg,
        StatKey::WeakDmg,
        StatKey::HpBoost,
        StatKey::AtkBoost,
        StatKey::DefBoost,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Hp => "hp",
            Self::Atk => "atk",
            Self::Def => "def",
            Self::CritRate => "critRate",
            Self::CritDmg => "critDmg",
            Self::OathDmg => "oathDmg",
            Self::WeakDmg => "weakDmg",
            Self::HpBoost => "hpBoost",
            Self::AtkBoost => "atkBoost",
            Self::DefBoost => "defBoost",
            Self::Other(raw) => raw,
        }
    }

    /// Flat stats are denominated in raw amounts, never in percent.
    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Atk | Self::Def | Self::Hp)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StatKey::from_str(raw.trim()).map_err(serde::de::Error::custom)
    }
}

/// Enhancement level of a core, one of 0, 3, 6, 9, 12 or 15.
///
/// Accepts either a JSON number or a numeric string on input, since form
/// widgets hand the level over as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "LevelRepr", into = "u8")]
pub struct EnhancementLevel(u8);

impl EnhancementLevel {
    pub const MAX: EnhancementLevel = EnhancementLevel(MAX_LEVEL);

    pub fn new(level: u8) -> Result<Self, String> {
        if level <= MAX_LEVEL && level % LEVEL_STEP == 0 {
            Ok(Self(level))
        } else {
            Err(format!(
                "invalid enhancement level {} (expected a multiple of {} up to {})",
                level, LEVEL_STEP, MAX_LEVEL
            ))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_maxed(self) -> bool {
        self.0 >= MAX_LEVEL
    }

    /// Enhancement applications still available before the core is maxed.
    pub fn remaining_enhancements(self) -> u8 {
        MAX_LEVEL.saturating_sub(self.0) / LEVEL_STEP
    }
}

impl From<EnhancementLevel> for u8 {
    fn from(level: EnhancementLevel) -> Self {
        level.0
    }
}

impl TryFrom<u8> for EnhancementLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Number(u8),
    Text(String),
}

impl TryFrom<LevelRepr> for EnhancementLevel {
    type Error = String;

    fn try_from(repr: LevelRepr) -> Result<Self, Self::Error> {
        match repr {
            LevelRepr::Number(n) => Self::new(n),
            LevelRepr::Text(s) => {
                let n: u8 = s
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid enhancement level '{}'", s))?;
                Self::new(n)
            }
        }
    }
}

impl fmt::Display for EnhancementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

/// A stat value exactly as entered or recognized upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Numeric(f64),
    Text(String),
}

impl Default for RawValue {
    fn default() -> Self {
        Self::Numeric(0.0)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubStat {
    pub key: StatKey,
    pub value: RawValue,
    #[serde(default)]
    pub upgrade_count: u8,
}

impl SubStat {
    pub fn new(key: StatKey, value: impl Into<RawValue>, upgrade_count: u8) -> Self {
        Self {
            key,
            value: value.into(),
            upgrade_count,
        }
    }

    pub fn total_rolls(&self) -> u8 {
        self.upgrade_count.saturating_add(1)
    }
}

/// A validated core record, the input of the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Core {
    #[serde(rename = "type")]
    pub shape: Shape,
    pub level: EnhancementLevel,
    pub color: Color,
    pub main_stat: StatKey,
    pub sub_stats: Vec<SubStat>,
}

/// Dense storage for one value per (archetype, talent) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildTable<T> {
    cells: [[T; Talent::COUNT]; Archetype::COUNT],
}

impl<T> BuildTable<T> {
    pub fn get(&self, archetype: Archetype, talent: Talent) -> &T {
        &self.cells[archetype as usize][talent as usize]
    }

    pub fn get_mut(&mut self, archetype: Archetype, talent: Talent) -> &mut T {
        &mut self.cells[archetype as usize][talent as usize]
    }

    /// Iterates in evaluation order: every talent of the first archetype,
    /// then every talent of the next.
    pub fn iter(&self) -> impl Iterator<Item = (Archetype, Talent, &T)> {
        Archetype::iter().flat_map(move |a| Talent::iter().map(move |t| (a, t, self.get(a, t))))
    }
}
