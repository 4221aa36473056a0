//! Evaluate command - play three agents on every generated map
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), report_results()
//! - Level 3: (delegated to hexmap-eval crate)
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexmap_eval::{run_evaluation, summarize_logs, EvalConfig, EvaluationResult, RadiusRecord, SimulatorCommand, AGENT_COUNT};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct EvaluateArgs {
    /// Directory of map JSON files
    #[arg(long, default_value = "maps")]
    pub map: PathBuf,

    /// Paths to the three agent executables
    #[arg(long, num_args = AGENT_COUNT, required = true, value_name = "AGENT")]
    pub agents: Vec<String>,

    /// Output directory for game logs
    #[arg(long, default_value = "./output/json")]
    pub output: PathBuf,

    /// Program that runs the simulator
    #[arg(long, default_value = "python")]
    pub program: String,

    /// Simulator entry script passed to the program
    #[arg(long, default_value = "main.py")]
    pub script: String,

    /// Worker threads (default: one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Only aggregate logs already in the output directory
    #[arg(long)]
    pub skip_run: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run evaluate command
///
/// 1. Build the evaluation config
/// 2. Simulate every map (unless skipped) and aggregate logs
/// 3. Report wins by radius
pub fn run(args: EvaluateArgs) -> Result<()> {
    let config = build_config(&args);

    let result = if args.skip_run {
        summarize_logs(&config)
    } else {
        run_evaluation(&config)
    }
    .with_context(|| format!("Evaluation failed for maps in {}", args.map.display()))?;

    report_results(&result, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &EvaluateArgs) -> EvalConfig {
    let simulator = SimulatorCommand::new(args.program.clone()).arg(args.script.clone());
    let config = EvalConfig::new(args.agents.clone())
        .with_maps_dir(&args.map)
        .with_output_dir(&args.output)
        .with_simulator(simulator);

    match args.threads {
        Some(threads) => config.with_threads(threads),
        None => config,
    }
}

fn report_results(result: &EvaluationResult, args: &EvaluateArgs) -> Result<()> {
    if args.json {
        print_json_results(result)
    } else {
        print_text_results(result);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print results as JSON
fn print_json_results(result: &EvaluationResult) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        simulations: usize,
        failed_simulations: usize,
        games: u32,
        skipped_logs: usize,
        radii: Vec<RadiusRecord>,
        total_wins: Vec<u32>,
    }

    let output = JsonOutput {
        simulations: result.outcomes.len(),
        failed_simulations: result.failures().count(),
        games: result.table.games(),
        skipped_logs: result.table.skipped,
        radii: result.table.rows(),
        total_wins: result.table.totals(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(result: &EvaluationResult) {
    let table = &result.table;
    let players = table.players();

    println!("\n=== Wins by Map Radius ===");
    if !result.outcomes.is_empty() {
        println!(
            "Simulations: {} ({} failed)",
            result.outcomes.len(),
            result.failures().count()
        );
    }
    println!("Games: {} ({} logs skipped)", table.games(), table.skipped);

    print!("\n{:>8} {:>6}", "radius", "games");
    for player in 0..players {
        print!(" {:>10}", format!("player_{}", player));
    }
    println!(" {:>10}", "avg turns");

    for row in table.rows() {
        print!("{:>8} {:>6}", row.radius, row.games);
        for wins in &row.wins {
            print!(" {:>10}", wins);
        }
        println!(" {:>10.1}", row.avg_turns());
    }

    print!("{:>8} {:>6}", "total", table.games());
    for wins in table.totals() {
        print!(" {:>10}", wins);
    }
    println!();
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> EvaluateArgs {
        EvaluateArgs {
            map: PathBuf::from("maps"),
            agents: vec!["a".into(), "b".into(), "c".into()],
            output: PathBuf::from("out"),
            program: "python3".into(),
            script: "sim.py".into(),
            threads: Some(4),
            skip_run: false,
            json: false,
        }
    }

    #[test]
    fn test_build_config() {
        let config = build_config(&args());
        assert_eq!(config.maps_dir, PathBuf::from("maps"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.simulator, SimulatorCommand::new("python3").arg("sim.py"));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.agents.len(), 3);
    }
}
