use crate::reports;
use clap::Args;
use corerate::config::ScoringParams;
use corerate::error::{CoreRateError, CrResult};
use corerate::export;
use corerate::input::CoreInput;
use corerate::scorer::{Scorer, ScoringResult};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::BufWriter;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub params: ScoringParams,

    /// JSON file holding an array of cores.
    #[arg(short, long)]
    pub input: String,

    /// Write the flattened results to this CSV file.
    #[arg(long)]
    pub csv: Option<String>,
}

pub fn run(args: BatchArgs, scorer: Arc<Scorer>) -> CrResult<()> {
    let content = fs::read_to_string(&args.input)?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content)?;
    info!("🔥 Scoring {} cores from {}", entries.len(), args.input);

    let start = Instant::now();
    let outcomes: Vec<(usize, CrResult<ScoringResult>)> = entries
        .into_par_iter()
        .enumerate()
        .map(|(i, entry)| {
            let outcome = serde_json::from_value::<CoreInput>(entry)
                .map_err(CoreRateError::from)
                .and_then(|input| input.validate(&scorer.reference.meta))
                .map(|core| scorer.score(&core));
            (i + 1, outcome)
        })
        .collect();

    let mut scored: Vec<(usize, ScoringResult)> = Vec::with_capacity(outcomes.len());
    let mut skipped = 0usize;
    for (entry, outcome) in outcomes {
        match outcome {
            Ok(result) => scored.push((entry, result)),
            Err(e) => {
                warn!("⚠️  Skipping entry #{}: {}", entry, e);
                skipped += 1;
            }
        }
    }

    info!(
        "🏁 Scored {} cores in {:.2?} ({} skipped)",
        scored.len(),
        start.elapsed(),
        skipped
    );

    reports::print_batch_summary(&scored, &scorer.reference.meta);

    if let Some(path) = &args.csv {
        let results: Vec<ScoringResult> = scored.into_iter().map(|(_, r)| r).collect();
        let file = BufWriter::new(File::create(path)?);
        export::write_csv(&results, &scorer.reference.meta, file)?;
        info!("💾 CSV written to {}", path);
    }
    Ok(())
}
