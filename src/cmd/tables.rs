use crate::reports;
use clap::Args;
use corerate::model::Archetype;
use corerate::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct TablesArgs {
    /// Only show the weights of this archetype.
    #[arg(short, long)]
    pub archetype: Option<Archetype>,
}

pub fn run(args: TablesArgs, scorer: &Scorer) {
    reports::print_value_ranges(&scorer.reference);
    reports::print_weights(&scorer.reference, args.archetype);
}
