//! Match logs written by the simulator
//!
//! A log is a JSON array of turn snapshots. Only the last snapshot matters
//! here: it carries the final `players[].points` and the `map.radius`.

use std::path::Path;

use serde::Deserialize;

use crate::error::LogError;

#[derive(Debug, Deserialize)]
struct PlayerSnapshot {
    points: f64,
}

#[derive(Debug, Deserialize)]
struct MapSnapshot {
    radius: i32,
}

#[derive(Debug, Deserialize)]
struct FinalSnapshot {
    players: Vec<PlayerSnapshot>,
    map: MapSnapshot,
}

/// Final result of one match
#[derive(Clone, Debug, PartialEq)]
pub struct MatchSummary {
    /// Radius of the map the match was played on
    pub radius: i32,
    /// Final points, indexed by player
    pub points: Vec<f64>,
    /// Turns played (snapshots after the initial one)
    pub turns: usize,
}

impl MatchSummary {
    /// Player with the most points; the earlier player wins ties
    pub fn winner(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, &points) in self.points.iter().enumerate() {
            if best.map_or(true, |(_, top)| points > top) {
                best = Some((index, points));
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Parse the contents of a match log
pub fn parse_match_log(content: &str) -> Result<MatchSummary, LogError> {
    let mut snapshots: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let turns = snapshots.len().saturating_sub(1);
    let last = snapshots.pop().ok_or(LogError::Empty)?;
    let snapshot: FinalSnapshot = serde_json::from_value(last)?;

    Ok(MatchSummary {
        radius: snapshot.map.radius,
        points: snapshot.players.into_iter().map(|p| p.points).collect(),
        turns,
    })
}

/// Read and parse a match log file
pub fn read_match_log(path: &Path) -> Result<MatchSummary, LogError> {
    let content = std::fs::read_to_string(path)?;
    parse_match_log(&content)
}
