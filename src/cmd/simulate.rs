use clap::Args;
use mixforge::error::{MixError, MixResult};
use mixforge::{loader, synthetic};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Output file (.csv or .json)
    pub output: String,

    #[arg(short = 'c', long, default_value_t = 20)]
    pub count: usize,

    #[arg(short = 'p', long, default_value_t = 5)]
    pub peaks: usize,

    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    pub ppm_start: f64,

    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub ppm_end: f64,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: SimulateArgs) -> MixResult<()> {
    if args.count == 0 || args.peaks == 0 {
        return Err(MixError::Config(
            "count and peaks must both be at least 1".to_string(),
        ));
    }
    let compounds =
        synthetic::generate_compounds(args.seed, args.count, args.peaks, args.ppm_start, args.ppm_end);

    if args.output.to_ascii_lowercase().ends_with(".json") {
        std::fs::write(&args.output, serde_json::to_string_pretty(&compounds)?)?;
    } else {
        loader::save_components_csv(&args.output, &compounds)?;
    }
    println!(
        "💾 Wrote {} compounds with {} peaks each to {}",
        compounds.len(),
        args.peaks,
        args.output
    );
    Ok(())
}
