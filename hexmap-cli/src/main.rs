//! HEXMAP CLI - Command-line interface
//!
//! Commands:
//! - generate: Generate symmetric maps for radii 8 through 15
//! - evaluate: Play agents on every map and tally wins by radius

mod evaluate;
mod generate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexmap")]
#[command(about = "HEXMAP symmetric map generator and agent evaluator")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate maps into a fresh output directory
    Generate(generate::GenerateArgs),
    /// Run the simulator on every map and report wins by radius
    Evaluate(evaluate::EvaluateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate::run(args, cli.seed),
        Commands::Evaluate(args) => evaluate::run(args),
    }
}
