//! Simulation runner - one simulator process per map
//!
//! Level 3 - Step-level implementation

use std::path::{Path, PathBuf};

use hexmap_core::parse_map_id;
use rayon::prelude::*;

use crate::config::EvalConfig;
use crate::error::EvalError;

/// How a simulator process ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimulationStatus {
    /// Exited successfully
    Completed,
    /// Exited with a failure code (None if killed by a signal)
    Failed { code: Option<i32> },
    /// The process could not be started
    SpawnFailed { message: String },
}

/// Outcome of simulating a single map
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    pub map_file: PathBuf,
    pub log_file: PathBuf,
    pub status: SimulationStatus,
    pub stdout: String,
    pub stderr: String,
}

impl SimulationOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == SimulationStatus::Completed
    }
}

/// Launches the external simulator for each map
pub struct SimulationRunner {
    config: EvalConfig,
}

impl SimulationRunner {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// JSON files in the maps directory, numbered maps first in id order
    pub fn list_maps(&self) -> Result<Vec<PathBuf>, EvalError> {
        list_json_files(&self.config.maps_dir)
    }

    /// Log path for a map: `<output>/<map stem>.json`
    pub fn log_path_for(&self, map_file: &Path) -> PathBuf {
        let stem = map_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.config.output_dir.join(format!("{}.json", stem))
    }

    /// Simulate every map; independent tasks, results in input order
    pub fn run_all(&self, maps: &[PathBuf]) -> Result<Vec<SimulationOutcome>, EvalError> {
        std::fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| EvalError::io(&self.config.output_dir, e))?;

        if !self.config.parallel {
            return Ok(maps.iter().map(|m| self.run_one(m)).collect());
        }

        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                Ok(pool.install(|| self.run_parallel(maps)))
            }
            None => Ok(self.run_parallel(maps)),
        }
    }

    fn run_parallel(&self, maps: &[PathBuf]) -> Vec<SimulationOutcome> {
        maps.par_iter().map(|m| self.run_one(m)).collect()
    }

    /// Run the simulator on one map and wait for it
    pub fn run_one(&self, map_file: &Path) -> SimulationOutcome {
        let log_file = self.log_path_for(map_file);
        let mut command = self
            .config
            .simulator
            .build(map_file, &self.config.agents, &log_file);

        let outcome = match command.output() {
            Ok(output) => SimulationOutcome {
                map_file: map_file.to_path_buf(),
                log_file,
                status: if output.status.success() {
                    SimulationStatus::Completed
                } else {
                    SimulationStatus::Failed {
                        code: output.status.code(),
                    }
                },
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => SimulationOutcome {
                map_file: map_file.to_path_buf(),
                log_file,
                status: SimulationStatus::SpawnFailed {
                    message: e.to_string(),
                },
                stdout: String::new(),
                stderr: String::new(),
            },
        };

        match &outcome.status {
            SimulationStatus::Completed => {
                tracing::debug!("Simulated {}", map_file.display());
            }
            status => {
                tracing::warn!(
                    "Simulation of {} failed: {:?} {}",
                    map_file.display(),
                    status,
                    outcome.stderr.trim()
                );
            }
        }

        outcome
    }
}

/// JSON files in a directory, numbered maps first by id, then by name
pub(crate) fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, EvalError> {
    let entries = std::fs::read_dir(dir).map_err(|e| EvalError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| EvalError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }

    files.sort_by_key(|p| {
        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        (parse_map_id(&name).unwrap_or(u64::MAX), name)
    });
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorCommand;

    fn agents() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_log_path_for() {
        let runner = SimulationRunner::new(EvalConfig::new(agents()).with_output_dir("out"));
        assert_eq!(
            runner.log_path_for(Path::new("maps/map_3.json")),
            PathBuf::from("out/map_3.json")
        );
    }

    #[test]
    fn test_list_maps_orders_by_id() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["map_10.json", "map_2.json", "custom.json", "readme.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let runner = SimulationRunner::new(EvalConfig::new(agents()).with_maps_dir(dir.path()));

        let names: Vec<String> = runner
            .list_maps()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["map_2.json", "map_10.json", "custom.json"]);
    }

    #[test]
    fn test_missing_maps_dir_is_an_error() {
        let runner = SimulationRunner::new(
            EvalConfig::new(agents()).with_maps_dir("/nonexistent/hexmap/maps"),
        );
        assert!(matches!(runner.list_maps(), Err(EvalError::Io { .. })));
    }

    #[test]
    fn test_spawn_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let config = EvalConfig::new(agents())
            .with_output_dir(dir.path())
            .with_simulator(SimulatorCommand::new("/nonexistent/hexmap/simulator"))
            .sequential();
        let runner = SimulationRunner::new(config);

        let outcomes = runner.run_all(&[PathBuf::from("map_1.json")]).unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].succeeded());
        assert!(matches!(outcomes[0].status, SimulationStatus::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let simulator = SimulatorCommand::new("sh").arg("-c").arg("exit 3").arg("sim");
        let config = EvalConfig::new(agents())
            .with_output_dir(dir.path())
            .with_simulator(simulator)
            .with_threads(2);
        let runner = SimulationRunner::new(config);

        let maps = vec![PathBuf::from("map_1.json"), PathBuf::from("map_2.json")];
        let outcomes = runner.run_all(&maps).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].map_file, maps[0]);
        assert_eq!(outcomes[1].map_file, maps[1]);
        assert!(outcomes
            .iter()
            .all(|o| o.status == SimulationStatus::Failed { code: Some(3) }));
    }
}
