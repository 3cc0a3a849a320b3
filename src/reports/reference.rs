use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use corerate::model::{Archetype, StatKey, Talent};
use corerate::reference::ReferenceData;
use strum::IntoEnumIterator;

pub fn value_ranges(data: &ReferenceData) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Stat").add_attribute(Attribute::Bold),
        Cell::new("Initial"),
        Cell::new("Upgrade"),
        Cell::new("Main base"),
        Cell::new("Main /lvl"),
    ]);

    for key in StatKey::KNOWN.iter() {
        let range = data.stat_range(key);
        let growth = data.values.main_stat_values.get(key);
        if range.is_none() && growth.is_none() {
            continue;
        }
        let span = |r: Option<(f64, f64)>| {
            r.map(|(lo, hi)| format!("{} - {}", lo, hi))
                .unwrap_or_else(|| "-".to_string())
        };
        table.add_row(vec![
            Cell::new(data.meta.sub_stat_label(key)).add_attribute(Attribute::Bold),
            Cell::new(span(range.map(|r| (r.initial.min, r.initial.max)))),
            Cell::new(span(range.map(|r| (r.upgrade.min, r.upgrade.max)))),
            Cell::new(growth.map_or("-".to_string(), |g| g.base.to_string())),
            Cell::new(growth.map_or("-".to_string(), |g| g.per_level.to_string())),
        ]);
    }

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\nValue ranges\n{}", table);
}

/// Sub-stat weights per build, with the triangle main-stat weight after a
/// slash when it is non-zero.
pub fn weights(data: &ReferenceData, only: Option<Archetype>) {
    let builds: Vec<(Archetype, Talent)> = Archetype::iter()
        .filter(|a| only.map_or(true, |o| o == *a))
        .flat_map(|a| Talent::iter().map(move |t| (a, t)))
        .collect();

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Stat").add_attribute(Attribute::Bold)];
    header.extend(
        builds
            .iter()
            .map(|(a, t)| Cell::new(format!("{}\n{}", a, t)).fg(Color::Cyan)),
    );
    table.set_header(header);

    for key in StatKey::KNOWN.iter() {
        let mut row = vec![Cell::new(data.meta.sub_stat_label(key))];
        for (a, t) in &builds {
            let w = data.build_weights(*a, *t);
            let sub = w.sub_stat_weight(key);
            let main = w.triangle_main_weight(key);
            let text = if main > 0.0 {
                format!("{:.0} / {:.0}", sub, main)
            } else {
                format!("{:.0}", sub)
            };
            let cell = Cell::new(text);
            row.push(if sub == 0.0 && main == 0.0 {
                cell.fg(Color::DarkGrey)
            } else {
                cell
            });
        }
        table.add_row(row);
    }

    for i in 1..=builds.len() {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\nWeights (sub-stat / triangle main stat)\n{}", table);
}
