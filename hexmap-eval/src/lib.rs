//! HEXMAP Eval - Agent evaluation on generated maps
//!
//! This crate provides the evaluation harness:
//! - Launching the external game simulator once per map
//! - Parsing the match logs it writes
//! - Tallying wins per player and map radius
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_evaluation (orchestration)
//! - Level 2: run_all, aggregate_logs (phases)
//! - Level 3: run_one, read_match_log (steps)
//! - Level 4: utilities, configuration

mod config;
mod error;
mod harness;
mod match_log;
mod runner;
mod standings;

pub use config::{EvalConfig, SimulatorCommand, AGENT_COUNT};
pub use error::{EvalError, LogError};
pub use harness::{run_evaluation, summarize_logs, EvaluationResult};
pub use match_log::{parse_match_log, read_match_log, MatchSummary};
pub use runner::{SimulationOutcome, SimulationRunner, SimulationStatus};
pub use standings::{aggregate_logs, RadiusRecord, WinTable};
