use crate::consts::{MAX_SUB_STATS, MAX_UPGRADE_COUNT, MIN_SUB_STATS};
use crate::error::{CoreRateError, CrResult};
use crate::model::{Color, Core, EnhancementLevel, RawValue, Shape, StatKey, SubStat};
use crate::reference::{CoreMeta, MainStatRule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::debug;

/// Loosely typed core record as submitted by a form or a recognition step.
/// Header fields stay raw so that unknown or blank values surface as
/// validation errors. Turn it into a [`Core`] with [`CoreInput::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreInput {
    #[serde(rename = "type", default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub level: Option<RawValue>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub main_stat: Option<StatKey>,
    #[serde(default)]
    pub sub_stats: Vec<SubStatInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubStatInput {
    #[serde(default)]
    pub key: Option<StatKey>,
    #[serde(default)]
    pub value: Option<RawValue>,
    #[serde(default)]
    pub upgrade_count: u8,
}

fn invalid(msg: impl Into<String>) -> CoreRateError {
    CoreRateError::Validation(msg.into())
}

fn non_blank(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_level(raw: &Option<RawValue>) -> CrResult<EnhancementLevel> {
    let level = match raw {
        None => return Err(invalid("core level is required")),
        Some(RawValue::Text(s)) if s.trim().is_empty() => {
            return Err(invalid("core level is required"))
        }
        Some(RawValue::Text(s)) => s
            .trim()
            .parse::<u8>()
            .map_err(|_| invalid(format!("invalid enhancement level '{}'", s)))?,
        Some(RawValue::Numeric(n)) => {
            if n.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(n) {
                return Err(invalid(format!("invalid enhancement level {}", n)));
            }
            *n as u8
        }
    };
    EnhancementLevel::new(level).map_err(invalid)
}

fn parse_named<T: FromStr>(raw: &Option<String>, field: &str) -> CrResult<T> {
    let name = non_blank(raw).ok_or_else(|| invalid(format!("core {} is required", field)))?;
    name.parse()
        .map_err(|_| invalid(format!("unknown core {} '{}'", field, name)))
}

fn present(key: &Option<StatKey>) -> Option<&StatKey> {
    key.as_ref().filter(|k| !k.as_str().is_empty())
}

impl CoreInput {
    pub fn validate(self, meta: &CoreMeta) -> CrResult<Core> {
        let level = parse_level(&self.level)?;
        let shape: Shape = parse_named(&self.shape, "type")?;
        let color: Color = parse_named(&self.color, "color")?;

        let main_stat = match meta.main_stat_rule(shape) {
            MainStatRule::Fixed(fixed) => {
                if let Some(given) = present(&self.main_stat).filter(|k| *k != fixed) {
                    debug!(
                        "{} cores always carry '{}', ignoring supplied main stat '{}'",
                        shape, fixed, given
                    );
                }
                fixed.clone()
            }
            MainStatRule::OneOf(allowed) => {
                let given = present(&self.main_stat)
                    .ok_or_else(|| invalid("main stat is required"))?;
                if !allowed.contains(given) {
                    return Err(invalid(format!(
                        "main stat '{}' is not available on {} cores",
                        given, shape
                    )));
                }
                given.clone()
            }
        };

        let count = self.sub_stats.len();
        if !(MIN_SUB_STATS..=MAX_SUB_STATS).contains(&count) {
            return Err(invalid(format!(
                "a core carries {} to {} sub-stats, got {}",
                MIN_SUB_STATS, MAX_SUB_STATS, count
            )));
        }

        let mut seen = HashSet::new();
        for sub in &self.sub_stats {
            if let Some(key) = present(&sub.key) {
                if !seen.insert(key) {
                    return Err(invalid(format!("duplicate sub-stat '{}'", key)));
                }
            }
        }

        let sub_stats = self
            .sub_stats
            .into_iter()
            .enumerate()
            .map(|(i, sub)| {
                let key = present(&sub.key)
                    .cloned()
                    .ok_or_else(|| invalid(format!("sub-stat #{} has no stat selected", i + 1)))?;
                if sub.upgrade_count > MAX_UPGRADE_COUNT {
                    return Err(invalid(format!(
                        "sub-stat '{}' has {} enhancements, at most {} allowed",
                        key, sub.upgrade_count, MAX_UPGRADE_COUNT
                    )));
                }
                let value = match sub.value {
                    Some(RawValue::Text(s)) if s.trim().is_empty() => RawValue::Numeric(0.0),
                    Some(v) => v,
                    None => RawValue::Numeric(0.0),
                };
                Ok(SubStat {
                    key,
                    value,
                    upgrade_count: sub.upgrade_count,
                })
            })
            .collect::<CrResult<Vec<_>>>()?;

        Ok(Core {
            shape,
            level,
            color,
            main_stat,
            sub_stats,
        })
    }
}
