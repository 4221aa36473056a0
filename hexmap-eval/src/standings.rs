//! Win counts per map radius
//!
//! Level 2 - Phases (aggregation)

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::EvalError;
use crate::match_log::{read_match_log, MatchSummary};
use crate::runner::list_json_files;

/// Results for all matches played on one radius
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RadiusRecord {
    pub radius: i32,
    /// Matches recorded
    pub games: u32,
    /// Wins, indexed by player
    pub wins: Vec<u32>,
    /// Sum of turns over all matches
    pub total_turns: u64,
}

impl RadiusRecord {
    /// Average match length in turns
    pub fn avg_turns(&self) -> f32 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f32 / self.games as f32
        }
    }

    /// Win rate of a player on this radius
    pub fn win_rate(&self, player: usize) -> f32 {
        if self.games == 0 {
            0.0
        } else {
            self.wins.get(player).copied().unwrap_or(0) as f32 / self.games as f32
        }
    }
}

/// Wins by player and radius across many matches
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WinTable {
    records: BTreeMap<i32, RadiusRecord>,
    players: usize,
    /// Logs that could not be used
    pub skipped: usize,
}

impl WinTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one finished match
    pub fn record(&mut self, summary: &MatchSummary) {
        self.players = self.players.max(summary.points.len());

        let record = self
            .records
            .entry(summary.radius)
            .or_insert_with(|| RadiusRecord {
                radius: summary.radius,
                ..Default::default()
            });
        record.games += 1;
        record.total_turns += summary.turns as u64;
        if record.wins.len() < summary.points.len() {
            record.wins.resize(summary.points.len(), 0);
        }
        if let Some(winner) = summary.winner() {
            record.wins[winner] += 1;
        }
    }

    /// Largest player count seen
    pub fn players(&self) -> usize {
        self.players
    }

    /// Records sorted by radius, wins padded to the player count
    pub fn rows(&self) -> Vec<RadiusRecord> {
        self.records
            .values()
            .map(|r| {
                let mut row = r.clone();
                row.wins.resize(self.players, 0);
                row
            })
            .collect()
    }

    pub fn get(&self, radius: i32) -> Option<&RadiusRecord> {
        self.records.get(&radius)
    }

    /// Wins per player across every radius
    pub fn totals(&self) -> Vec<u32> {
        let mut totals = vec![0; self.players];
        for record in self.records.values() {
            for (total, wins) in totals.iter_mut().zip(&record.wins) {
                *total += wins;
            }
        }
        totals
    }

    /// Matches recorded across every radius
    pub fn games(&self) -> u32 {
        self.records.values().map(|r| r.games).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build a win table from every `.json` log in a directory
///
/// Logs that cannot be read or parsed are logged and skipped.
pub fn aggregate_logs(dir: &Path) -> Result<WinTable, EvalError> {
    let mut table = WinTable::new();

    for path in list_json_files(dir)? {
        match read_match_log(&path) {
            Ok(summary) => table.record(&summary),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                table.skipped += 1;
            }
        }
    }

    tracing::info!(
        "Aggregated {} matches over {} radii ({} skipped)",
        table.games(),
        table.records.len(),
        table.skipped
    );
    Ok(table)
}
