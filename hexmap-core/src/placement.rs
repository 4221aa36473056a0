//! Tile placers: danger, shield and gold
//!
//! Each placer only adds to the [`Selection`], always a whole orbit at a
//! time. They run in the order danger, shield, gold.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use crate::board::{disk, Cube};
use crate::config::GeneratorConfig;
use crate::symmetry::Orbit;
use crate::tile::{Selection, Tile};

/// Largest random increment for a 3-cell orbit
const GOLD_ORBIT_STEP_MAX: u32 = 3;

// ============================================================================
// Outcomes
// ============================================================================

/// Result of danger placement
#[derive(Clone, Debug, PartialEq)]
pub enum DangerOutcome {
    /// A candidate passed the connectivity check and was committed
    Placed {
        /// 1-based attempt that succeeded
        attempt: u32,
        /// Probability drawn for that attempt
        probability: f64,
        /// Number of danger cells committed
        cells: usize,
    },
    /// Every attempt failed; the map has no danger tiles
    Degraded { attempts: u32 },
}

impl DangerOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, DangerOutcome::Degraded { .. })
    }

    pub fn cells(&self) -> usize {
        match self {
            DangerOutcome::Placed { cells, .. } => *cells,
            DangerOutcome::Degraded { .. } => 0,
        }
    }
}

/// Result of shield placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShieldOutcome {
    /// The orbit with this representative now carries shields
    Placed { representative: Cube },
    /// Every 3-cell orbit was already taken
    NoEligibleOrbit,
}

/// Result of gold placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GoldOutcome {
    QuotaReached { accrued: u32, draws: u32 },
    /// Every open orbit hit the cap before the quota was met
    QuotaUnreachable { accrued: u32, quota: u32 },
}

impl GoldOutcome {
    pub fn accrued(&self) -> u32 {
        match self {
            GoldOutcome::QuotaReached { accrued, .. } => *accrued,
            GoldOutcome::QuotaUnreachable { accrued, .. } => *accrued,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, GoldOutcome::QuotaReached { .. })
    }
}

// ============================================================================
// Danger
// ============================================================================

/// Place danger orbits while keeping the rest of the board connected
///
/// Each attempt draws its own probability and builds a fresh candidate; only
/// a candidate that passes [`is_connected`] is written to the selection.
pub fn place_danger<R: Rng>(
    orbits: &[Orbit],
    selection: &mut Selection,
    radius: i32,
    config: &GeneratorConfig,
    rng: &mut R,
) -> DangerOutcome {
    for attempt in 1..=config.danger_attempts {
        let probability = draw_probability(config, rng);
        let candidate = draw_danger_candidate(orbits, probability, rng);
        let blocked: FxHashSet<Cube> = candidate
            .iter()
            .flat_map(|orbit| orbit.cells().iter().copied())
            .collect();

        if is_connected(radius, &blocked) {
            for orbit in &candidate {
                selection.assign_orbit(orbit, Tile::Danger);
            }
            tracing::debug!(
                "Danger placed on attempt {} (p={:.3}, {} cells)",
                attempt,
                probability,
                blocked.len()
            );
            return DangerOutcome::Placed {
                attempt,
                probability,
                cells: blocked.len(),
            };
        }

        tracing::debug!(
            "Danger attempt {} rejected (p={:.3}, {} cells)",
            attempt,
            probability,
            blocked.len()
        );
    }

    tracing::warn!(
        "No connected danger layout after {} attempts at radius {}, map has no danger",
        config.danger_attempts,
        radius
    );
    DangerOutcome::Degraded {
        attempts: config.danger_attempts,
    }
}

fn draw_probability<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> f64 {
    let (min, max) = (config.danger_min_probability, config.danger_max_probability);
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Include each orbit whole with the given probability
fn draw_danger_candidate<'a, R: Rng>(
    orbits: &'a [Orbit],
    probability: f64,
    rng: &mut R,
) -> Vec<&'a Orbit> {
    orbits
        .iter()
        .filter(|_| rng.gen::<f64>() < probability)
        .collect()
}

/// True when the unblocked cells of the board form one non-empty component
pub fn is_connected(radius: i32, blocked: &FxHashSet<Cube>) -> bool {
    let cells = disk(radius);
    let Some(&start) = cells.iter().find(|c| !blocked.contains(*c)) else {
        return false;
    };

    let mut visited: FxHashSet<Cube> = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in current.neighbors_within(radius) {
            if !blocked.contains(&next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    cells
        .iter()
        .all(|c| blocked.contains(c) || visited.contains(c))
}

// ============================================================================
// Shield
// ============================================================================

/// Put shields on one untouched 3-cell orbit
pub fn place_shield<R: Rng>(
    orbits: &[Orbit],
    selection: &mut Selection,
    rng: &mut R,
) -> ShieldOutcome {
    let eligible: Vec<&Orbit> = orbits
        .iter()
        .filter(|o| o.len() == 3 && !selection.contains(o.representative()))
        .collect();

    match eligible.choose(rng) {
        Some(orbit) => {
            selection.assign_orbit(orbit, Tile::Shield);
            ShieldOutcome::Placed {
                representative: orbit.representative(),
            }
        }
        None => {
            tracing::debug!("No free 3-cell orbit for a shield");
            ShieldOutcome::NoEligibleOrbit
        }
    }
}

// ============================================================================
// Gold
// ============================================================================

/// Spread gold over orbits until the weighted quota is met
///
/// Draws are uniform over the orbits that can still take gold, which is the
/// same distribution as drawing over all orbits and skipping the rest. An
/// orbit leaves the pool once it reaches the cap, so the loop always ends.
pub fn place_gold<R: Rng>(
    orbits: &[Orbit],
    selection: &mut Selection,
    config: &GeneratorConfig,
    rng: &mut R,
) -> GoldOutcome {
    let quota = config.gold_quota;
    let cap = config.gold_cap;

    let mut open: Vec<&Orbit> = orbits
        .iter()
        .filter(|o| match selection.orbit_tile(o) {
            None => true,
            Some(tile) => tile.is_gold() && tile.gold() < cap,
        })
        .collect();

    let mut accrued = 0u32;
    let mut draws = 0u32;

    while accrued < quota {
        if open.is_empty() {
            tracing::warn!(
                "Gold quota unreachable: {} of {} placed before every orbit hit the cap",
                accrued,
                quota
            );
            return GoldOutcome::QuotaUnreachable { accrued, quota };
        }

        let slot = rng.gen_range(0..open.len());
        let orbit = open[slot];
        let count = selection.orbit_tile(orbit).map_or(0, |t| t.gold());
        let increment = gold_increment(orbit.len(), quota - accrued, cap - count, config, rng);

        selection.assign_orbit(orbit, Tile::Gold { count: count + increment });
        accrued += u32::from(increment) * orbit.len() as u32;
        draws += 1;

        if count + increment >= cap {
            open.swap_remove(slot);
        }
    }

    GoldOutcome::QuotaReached { accrued, draws }
}

/// Gold to add to one orbit; `headroom` is at least 1
fn gold_increment<R: Rng>(
    orbit_size: usize,
    remaining: u32,
    headroom: u8,
    config: &GeneratorConfig,
    rng: &mut R,
) -> u8 {
    let headroom = u32::from(headroom);
    let increment = if orbit_size == 1 {
        remaining
            .min(headroom)
            .min(u32::from(config.gold_single_step))
    } else {
        let share = (f64::from(remaining) / orbit_size as f64).round() as u32;
        // 1..=3, weighted towards 2
        let step = (rng.gen::<f64>() * (GOLD_ORBIT_STEP_MAX - 1) as f64).round() as u32 + 1;
        share.min(headroom).min(step)
    };
    increment.clamp(1, headroom) as u8
}
