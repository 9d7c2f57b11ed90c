use crate::reports;
use clap::Args;
use mixforge::api;
use mixforge::config::{Config, ScoringParams};
use mixforge::error::MixResult;
use mixforge::loader;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Component file (.csv rows of name,position or .json)
    pub components: String,

    /// JSON object mapping mixture names to component names
    pub mixtures: String,

    #[command(flatten)]
    pub scoring: ScoringParams,
}

pub fn run(args: EvaluateArgs) -> MixResult<()> {
    let components = loader::load_components(&args.components)?;
    let mixtures = loader::load_mixtures(&args.mixtures)?;
    println!(
        "📂 {} components, {} mixtures",
        components.len(),
        mixtures.len()
    );

    let config = Config {
        scoring: args.scoring,
        ..Config::default()
    };
    let design = api::evaluate_mixtures(&components, &mixtures, &config)?;
    reports::print_design_report(&design);
    Ok(())
}
