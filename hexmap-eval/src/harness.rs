//! Evaluation run - simulate every map, then tally the logs
//!
//! Level 1 - Orchestration

use crate::config::EvalConfig;
use crate::error::EvalError;
use crate::runner::{SimulationOutcome, SimulationRunner};
use crate::standings::{aggregate_logs, WinTable};

/// Result of an evaluation run
#[derive(Clone, Debug)]
pub struct EvaluationResult {
    /// One entry per simulated map (empty when simulation was skipped)
    pub outcomes: Vec<SimulationOutcome>,
    /// Wins by radius from the logs in the output directory
    pub table: WinTable,
}

impl EvaluationResult {
    /// Simulations that did not finish cleanly
    pub fn failures(&self) -> impl Iterator<Item = &SimulationOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}

/// Run an evaluation (Level 1 orchestration)
///
/// 1. List the maps
/// 2. Simulate them in parallel
/// 3. Aggregate the match logs
pub fn run_evaluation(config: &EvalConfig) -> Result<EvaluationResult, EvalError> {
    let runner = SimulationRunner::new(config.clone());
    let maps = runner.list_maps()?;

    tracing::info!(
        "Simulating {} maps from {} with agents {:?}",
        maps.len(),
        config.maps_dir.display(),
        config.agents
    );

    let outcomes = runner.run_all(&maps)?;
    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    if failed > 0 {
        tracing::warn!("{} of {} simulations failed", failed, outcomes.len());
    }

    let table = aggregate_logs(&config.output_dir)?;
    Ok(EvaluationResult { outcomes, table })
}

/// Aggregate existing logs without running the simulator
pub fn summarize_logs(config: &EvalConfig) -> Result<EvaluationResult, EvalError> {
    let table = aggregate_logs(&config.output_dir)?;
    Ok(EvaluationResult {
        outcomes: Vec::new(),
        table,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::SimulatorCommand;

    /// Fake simulator: player 1 wins every match on a radius 8 map
    fn fake_simulator() -> SimulatorCommand {
        let script = r#"while [ $# -gt 0 ]; do
  if [ "$1" = "--output" ]; then out="$2"; fi
  shift
done
echo '[{"players":[{"points":1},{"points":5},{"points":2}],"map":{"radius":8}}]' > "$out""#;
        SimulatorCommand::new("sh").arg("-c").arg(script).arg("sim")
    }

    #[test]
    fn test_run_evaluation_end_to_end() {
        let maps = tempfile::tempdir().unwrap();
        let logs = tempfile::tempdir().unwrap();
        for id in 1..=3 {
            std::fs::write(maps.path().join(format!("map_{}.json", id)), "{}").unwrap();
        }
        let config = EvalConfig::new(vec!["a".into(), "b".into(), "c".into()])
            .with_maps_dir(maps.path())
            .with_output_dir(logs.path())
            .with_simulator(fake_simulator());

        let result = run_evaluation(&config).unwrap();

        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.failures().count(), 0);
        assert_eq!(result.table.games(), 3);
        assert_eq!(result.table.get(8).unwrap().wins, vec![0, 3, 0]);

        let summary = summarize_logs(&config).unwrap();
        assert!(summary.outcomes.is_empty());
        assert_eq!(summary.table, result.table);
    }
}
