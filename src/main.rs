use clap::{Parser, Subcommand};
use std::process;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a component library into mixtures.
    Generate(cmd::generate::GenerateArgs),
    /// Score an existing set of mixtures.
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Write a library of random compounds.
    Simulate(cmd::simulate::SimulateArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => cmd::generate::run(args),
        Commands::Evaluate(args) => cmd::evaluate::run(args),
        Commands::Simulate(args) => cmd::simulate::run(args),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}
