use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use corerate::model::Archetype;
use corerate::presentation::{
    emphasis_runs, format_main_value, format_stat_value, ordered_sub_stats, plain_lines, RankBand,
    Run,
};
use corerate::reference::CoreMeta;
use corerate::scorer::{BuildEvaluation, Recommendation, ScoringResult};
use strum::IntoEnumIterator;

fn band_color(band: RankBand) -> Color {
    match band {
        RankBand::Perfect => Color::Yellow,
        RankBand::Top => Color::Magenta,
        RankBand::Excellent => Color::Cyan,
        RankBand::Good => Color::Green,
        RankBand::Common | RankBand::Fodder => Color::Grey,
    }
}

fn progress_bar(score: u8) -> String {
    let filled = usize::from(score) / 5;
    format!("[{}{}] {}", "#".repeat(filled), ".".repeat(20 - filled), score)
}

/// Terminal rendering of commentary: emphasis becomes upper case.
fn render_commentary(commentary: &str) -> String {
    commentary
        .split('\n')
        .map(|line| {
            emphasis_runs(line)
                .into_iter()
                .map(|run| match run {
                    Run::Plain(s) => s.to_string(),
                    Run::Bold(s) => s.to_uppercase(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn single(result: &ScoringResult, detail: &BuildEvaluation, meta: &CoreMeta) {
    let band = RankBand::from_score(result.overall.score);

    println!(
        "\n{} {} {}",
        meta.color_label(result.color),
        meta.shape_label(result.shape),
        result.level
    );
    println!(
        "Rating: {} {}",
        progress_bar(result.overall.score),
        band
    );

    // Core stats
    let mut stats = Table::new();
    stats
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    stats.set_header(vec![
        Cell::new("Stat").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new("Upgrades"),
    ]);
    stats.add_row(vec![
        Cell::new(format!("Main: {}", meta.main_stat_label(&result.main_stat.key)))
            .add_attribute(Attribute::Bold),
        Cell::new(format_main_value(&result.main_stat.key, result.main_stat.value)),
        Cell::new(""),
    ]);
    for sub in ordered_sub_stats(&result.sub_stats) {
        stats.add_row(vec![
            Cell::new(meta.sub_stat_label(&sub.key)),
            Cell::new(format_stat_value(&sub.key, &sub.value)),
            Cell::new(sub.upgrade_count),
        ]);
    }
    for i in 1..=2 {
        if let Some(col) = stats.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", stats);

    // Archetype verdicts
    let mut verdicts = Table::new();
    verdicts
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    verdicts.set_header(vec![
        Cell::new("Build").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Talent"),
        Cell::new("Commentary"),
    ]);
    for archetype in Archetype::iter() {
        let block = result.archetype(archetype);
        verdicts.add_row(vec![
            Cell::new(archetype).add_attribute(Attribute::Bold),
            Cell::new(block.score).fg(band_color(RankBand::from_score(block.score))),
            Cell::new(block.talent),
            Cell::new(render_commentary(&block.commentary)),
        ]);
    }
    println!("{}", verdicts);

    // Winning build breakdown
    let mut breakdown = Table::new();
    breakdown
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    breakdown.set_header(vec![
        Cell::new(format!("{}/{}", detail.archetype, detail.talent)).add_attribute(Attribute::Bold),
        Cell::new("Weight"),
        Cell::new("Quality").fg(Color::Cyan),
        Cell::new("Rolls"),
    ]);
    for d in &detail.details {
        let quality = if d.scored {
            Cell::new(d.quality).fg(Color::Cyan)
        } else {
            Cell::new("n/a").fg(Color::Red)
        };
        breakdown.add_row(vec![
            Cell::new(meta.sub_stat_label(&d.key)),
            Cell::new(format!("{:.0}", d.weight)),
            quality,
            Cell::new(d.total_rolls),
        ]);
    }
    for i in 1..=3 {
        if let Some(col) = breakdown.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", breakdown);

    match &result.overall.recommend_sets {
        Recommendation::Pairings(pairings) => {
            let mut partners = Table::new();
            partners.load_preset(ASCII_FULL);
            partners.set_header(vec![
                Cell::new("Partner").add_attribute(Attribute::Bold),
                Cell::new("Set"),
                Cell::new("Talent"),
            ]);
            for p in pairings {
                partners.add_row(vec![
                    Cell::new(&p.character),
                    Cell::new(&p.set),
                    Cell::new(&p.talent),
                ]);
            }
            println!("Recommended pairings ({}):\n{}", result.overall.talent, partners);
        }
        Recommendation::Unavailable(text) => println!("Recommended pairings: {}", text),
    }
}

pub fn batch_summary(results: &[(usize, ScoringResult)], meta: &CoreMeta) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Core"),
        Cell::new("Main"),
        Cell::new("Crit"),
        Cell::new("Weak"),
        Cell::new("Overall").fg(Color::Cyan),
        Cell::new("Band"),
        Cell::new("Verdict"),
    ]);

    for (entry, r) in results {
        let band = RankBand::from_score(r.overall.score);
        let verdict = plain_lines(&r.archetype(r.winning_archetype()).commentary)
            .into_iter()
            .next()
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(entry),
            Cell::new(format!(
                "{} {} {}",
                meta.color_label(r.color),
                meta.shape_label(r.shape),
                r.level
            )),
            Cell::new(meta.main_stat_label(&r.main_stat.key)),
            Cell::new(format!("{} ({})", r.crit.score, r.crit.talent)),
            Cell::new(format!("{} ({})", r.weak.score, r.weak.talent)),
            Cell::new(r.overall.score).fg(band_color(band)),
            Cell::new(band),
            Cell::new(verdict),
        ]);
    }

    for i in 3..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("\n{}", table);
}
