//! Configuration types for evaluation runs
//!
//! Level 4 - Utilities and configuration

use std::path::{Path, PathBuf};
use std::process::Command;

/// Number of agents in every match
pub const AGENT_COUNT: usize = 3;

/// How to launch the game simulator
///
/// The simulator is invoked as
/// `<program> <args..> --map <map> --agents <a> <b> <c> --output <log>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for SimulatorCommand {
    fn default() -> Self {
        Self {
            program: "python".to_string(),
            args: vec!["main.py".to_string()],
        }
    }
}

impl SimulatorCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a leading argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Build the process command for one map
    pub fn build(&self, map: &Path, agents: &[String], log: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg("--map")
            .arg(map)
            .arg("--agents")
            .args(agents)
            .arg("--output")
            .arg(log);
        command
    }
}

/// Configuration for an evaluation run
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Directory of map files to play
    pub maps_dir: PathBuf,
    /// Agent executables, one per player
    pub agents: Vec<String>,
    /// Directory the simulator writes match logs into
    pub output_dir: PathBuf,
    /// Simulator launch command
    pub simulator: SimulatorCommand,
    /// Whether to run simulations in parallel
    pub parallel: bool,
    /// Worker threads (None = rayon default)
    pub threads: Option<usize>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("maps"),
            agents: Vec::new(),
            output_dir: PathBuf::from("./output/json"),
            simulator: SimulatorCommand::default(),
            parallel: true,
            threads: None,
        }
    }
}

impl EvalConfig {
    /// Create config for the given agents
    pub fn new(agents: Vec<String>) -> Self {
        Self {
            agents,
            ..Default::default()
        }
    }

    pub fn with_maps_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.maps_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_simulator(mut self, simulator: SimulatorCommand) -> Self {
        self.simulator = simulator;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Run simulations one after another
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
