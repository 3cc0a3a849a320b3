use crate::reports;
use clap::Args;
use corerate::config::ScoringParams;
use corerate::error::CrResult;
use corerate::input::CoreInput;
use corerate::scorer::Scorer;
use std::fs;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub params: ScoringParams,

    /// JSON file describing one core.
    #[arg(short, long)]
    pub input: String,

    /// Print the raw scoring result as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ScoreArgs, scorer: Arc<Scorer>) -> CrResult<()> {
    info!("🔎 Scoring core from {}", args.input);
    let content = fs::read_to_string(&args.input)?;
    let input: CoreInput = serde_json::from_str(&content)?;
    let core = input.validate(&scorer.reference.meta)?;

    let result = scorer.score(&core);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let detail = scorer.evaluate(result.winning_archetype(), result.overall.talent, &core);
    reports::print_result(&result, &detail, &scorer.reference.meta);
    Ok(())
}
