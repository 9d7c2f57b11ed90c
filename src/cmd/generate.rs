use crate::reports;
use clap::Args;
use mixforge::api;
use mixforge::config::Config;
use mixforge::error::MixResult;
use mixforge::loader;
use mixforge::optimizer::progress::{LogProgress, SilentProgress};
use std::fs;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Component file (.csv rows of name,position or .json)
    pub components: String,

    #[command(flatten)]
    pub config: Config,

    /// JSON configuration file; replaces all design options given here.
    #[arg(long)]
    pub config_file: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Write the design as JSON to this path.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log every optimizer pass.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn run(args: GenerateArgs) -> MixResult<()> {
    let config = match &args.config_file {
        Some(path) => {
            println!("📂 Loading configuration: {}", path);
            Config::load_from_file(path)?
        }
        None => args.config.clone(),
    };

    println!("📂 Loading components: {}", args.components);
    let components = loader::load_components(&args.components)?;
    println!("   {} components loaded", components.len());

    let start = Instant::now();
    let design = if args.verbose {
        api::design_mixtures_with_progress(&components, &config, args.seed, &LogProgress)?
    } else {
        api::design_mixtures_with_progress(&components, &config, args.seed, &SilentProgress)?
    };
    println!(
        "🧪 Designed {} mixtures in {:.2?} ({} / {})",
        design.pools.len(),
        start.elapsed(),
        config.design.method,
        config.design.mode
    );

    reports::print_design_report(&design);

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&design)?)?;
        println!("💾 Saved design to {}", path);
    }
    Ok(())
}
