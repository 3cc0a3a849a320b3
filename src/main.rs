use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use corerate::config::ScoringParams;
use corerate::error::CrResult;
use corerate::reference::ReferenceData;
use corerate::scorer::Scorer;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the reference tables. Embedded tables otherwise.
    #[arg(global = true, short, long)]
    data: Option<String>,

    /// JSON file with scoring parameter overrides.
    #[arg(global = true, short, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Score(cmd::score::ScoreArgs),
    Batch(cmd::batch::BatchArgs),
    Tables(cmd::tables::TablesArgs),
}

fn resolve_params(
    cli_params: Option<&ScoringParams>,
    params_path: Option<&str>,
    sub_matches: Option<&ArgMatches>,
) -> CrResult<ScoringParams> {
    let params = match params_path {
        Some(path) => {
            info!("⚖️  Loading scoring parameters from: {}", path);
            let mut file_params = ScoringParams::load_from_file(path)?;
            if let (Some(cli), Some(m)) = (cli_params, sub_matches) {
                file_params.merge_from_cli(cli, m);
            }
            file_params
        }
        None => cli_params.cloned().unwrap_or_default(),
    };
    params.validate()?;
    Ok(params)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let reference = match &cli.data {
        Some(dir) => {
            info!("📂 Loading reference tables: {}", dir);
            ReferenceData::load_from_dir(dir)
        }
        None => {
            info!("📂 Using embedded reference tables");
            ReferenceData::embedded()
        }
    };
    let reference = reference.unwrap_or_else(|e| {
        error!("❌ FATAL ERROR LOADING REFERENCE DATA: {}", e);
        process::exit(1);
    });

    let sub_matches = matches.subcommand().map(|(_, m)| m);
    let cli_params = match &cli.command {
        Commands::Score(args) => Some(&args.params),
        Commands::Batch(args) => Some(&args.params),
        Commands::Tables(_) => None,
    };

    let params = resolve_params(cli_params, cli.params.as_deref(), sub_matches)
        .unwrap_or_else(|e| {
            error!("❌ {}", e);
            process::exit(1);
        });

    let scorer = Arc::new(Scorer::new(reference, params));

    let outcome = match cli.command {
        Commands::Score(args) => cmd::score::run(args, scorer),
        Commands::Batch(args) => cmd::batch::run(args, scorer),
        Commands::Tables(args) => {
            cmd::tables::run(args, &scorer);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
