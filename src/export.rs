use crate::error::CrResult;
use crate::model::StatKey;
use crate::reference::CoreMeta;
use crate::scorer::types::ArchetypeBlock;
use crate::scorer::{Recommendation, ScoringResult};
use std::io::Write;
use std::str::FromStr;
use tracing::info;

/// One flattened result: `(column, value)` in output order.
pub type FlatRow = Vec<(String, String)>;

fn push(row: &mut FlatRow, column: impl Into<String>, value: impl ToString) {
    row.push((column.into(), value.to_string()));
}

fn push_block(row: &mut FlatRow, prefix: &str, block: &ArchetypeBlock) {
    push(row, format!("{}_score", prefix), block.score);
    push(row, format!("{}_talent", prefix), block.talent);
    push(row, format!("{}_commentary", prefix), &block.commentary);
}

/// Flattens a result into columns named after its JSON paths, joining nested
/// keys with `_` and numbering list entries from 1. The overall score is
/// left out.
pub fn flatten(result: &ScoringResult) -> FlatRow {
    let mut row = FlatRow::new();

    push(&mut row, "type", result.shape);
    push(&mut row, "level", result.level.value());
    push(&mut row, "color", result.color);
    push(&mut row, "mainStat_key", &result.main_stat.key);
    push(&mut row, "mainStat_value", result.main_stat.value);

    for (i, sub) in result.sub_stats.iter().enumerate() {
        let prefix = format!("subStats{}", i + 1);
        push(&mut row, format!("{}_key", prefix), &sub.key);
        push(&mut row, format!("{}_value", prefix), &sub.value);
        push(&mut row, format!("{}_upgradeCount", prefix), sub.upgrade_count);
    }

    push(&mut row, "overall_talent", result.overall.talent);
    match &result.overall.recommend_sets {
        Recommendation::Pairings(pairings) => {
            for (i, p) in pairings.iter().enumerate() {
                let prefix = format!("overall_recommendSets{}", i + 1);
                push(&mut row, format!("{}_character", prefix), &p.character);
                push(&mut row, format!("{}_set", prefix), &p.set);
                push(&mut row, format!("{}_talent", prefix), &p.talent);
            }
        }
        Recommendation::Unavailable(text) => push(&mut row, "overall_recommendSets", text),
    }

    push_block(&mut row, "crit", &result.crit);
    push_block(&mut row, "weak", &result.weak);
    row
}

pub fn translate_header(column: &str) -> String {
    let fixed = match column {
        "type" => Some("Core Type"),
        "level" => Some("Core Level"),
        "color" => Some("Color"),
        "mainStat_key" => Some("Main Stat"),
        "mainStat_value" => Some("Main Stat Value"),
        "overall_talent" => Some("Best Talent"),
        "overall_recommendSets" => Some("Recommended Pairings"),
        "crit_score" => Some("Crit Score"),
        "crit_talent" => Some("Crit Talent"),
        "crit_commentary" => Some("Crit Commentary"),
        "weak_score" => Some("Weak Score"),
        "weak_talent" => Some("Weak Talent"),
        "weak_commentary" => Some("Weak Commentary"),
        _ => None,
    };
    if let Some(label) = fixed {
        return label.to_string();
    }

    let suffixed = [
        ("subStats", "_key", "Sub Stat"),
        ("subStats", "_value", "Sub Stat Value"),
        ("subStats", "_upgradeCount", "Sub Stat Upgrades"),
        ("recommendSets", "_character", "Partner Character"),
        ("recommendSets", "_set", "Partner Set"),
        ("recommendSets", "_talent", "Partner Talent"),
    ];
    suffixed
        .iter()
        .find(|(group, suffix, _)| column.contains(group) && column.ends_with(suffix))
        .map(|(_, _, label)| label.to_string())
        .unwrap_or_else(|| column.to_string())
}

pub fn translate_value(column: &str, value: &str, meta: &CoreMeta) -> String {
    let stat = || StatKey::from_str(value).unwrap_or_else(|_| StatKey::Other(value.to_string()));

    if column == "type" {
        if let Ok(shape) = value.parse() {
            return meta.shape_label(shape);
        }
    } else if column == "color" {
        if let Ok(color) = value.parse() {
            return meta.color_label(color);
        }
    } else if column.contains("subStats") && column.ends_with("_key") {
        return meta.sub_stat_label(&stat()).to_string();
    } else if column.contains("mainStat") && column.ends_with("_key") {
        return meta.main_stat_label(&stat()).to_string();
    }
    value.to_string()
}

/// Writes results as CSV with translated headers and values.
///
/// The columns are the union of every row's columns in first-seen order;
/// rows lacking a column get an empty cell.
pub fn write_csv<W: Write>(results: &[ScoringResult], meta: &CoreMeta, out: W) -> CrResult<()> {
    let rows: Vec<FlatRow> = results.iter().map(flatten).collect();

    let mut columns: Vec<&str> = Vec::new();
    for row in &rows {
        for (column, _) in row {
            if !columns.contains(&column.as_str()) {
                columns.push(column);
            }
        }
    }

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns.iter().map(|c| translate_header(c)))?;

    for row in &rows {
        let record = columns.iter().map(|column| {
            row.iter()
                .find(|(c, _)| c == column)
                .map(|(_, v)| translate_value(column, v, meta))
                .unwrap_or_default()
        });
        writer.write_record(record)?;
    }
    writer.flush()?;

    info!("Exported {} results across {} columns", rows.len(), columns.len());
    Ok(())
}
