//! Generate command - write a batch of maps for every radius
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: prepare_store(), generate_all(), report_results()
//! - Level 3: generate_one(), summarize()
//! - Level 4: rng and formatting utilities

use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexmap_core::{generate_map, GenerationReport, GeneratorConfig, MapStore};

/// Radii generated on every run
const RADII: RangeInclusive<i32> = 8..=15;

/// Range `max_moves` is drawn from
const MAX_MOVES: RangeInclusive<u32> = 50..=150;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of maps for each radius
    #[arg(long, default_value = "10")]
    pub num: usize,

    /// Output directory (removed and recreated)
    #[arg(long, default_value = "maps")]
    pub output: PathBuf,

    /// Output summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// One written map
#[derive(Clone, Debug)]
struct MapRecord {
    path: PathBuf,
    max_moves: u32,
    report: GenerationReport,
}

/// Aggregated batch statistics
#[derive(Clone, Debug, Default, serde::Serialize)]
struct BatchSummary {
    maps: usize,
    degraded_danger: usize,
    unreachable_gold: usize,
    without_shield: usize,
    avg_danger_cells: f32,
    avg_max_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
///
/// 1. Recreate the output directory
/// 2. Generate `num` maps per radius
/// 3. Report results
pub fn run(args: GenerateArgs, seed: Option<u64>) -> Result<()> {
    let store = prepare_store(&args)?;
    let mut rng = create_rng(seed);

    tracing::info!(
        "Generating {} maps per radius {}-{} into {}",
        args.num,
        RADII.start(),
        RADII.end(),
        store.dir().display()
    );

    let records = generate_all(&store, args.num, &GeneratorConfig::default(), &mut rng)?;
    let summary = summarize(&records);

    report_results(&summary, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn prepare_store(args: &GenerateArgs) -> Result<MapStore> {
    MapStore::recreate(&args.output)
        .with_context(|| format!("Failed to recreate output directory: {}", args.output.display()))
}

/// Generate and write every map, radius by radius
fn generate_all(
    store: &MapStore,
    per_radius: usize,
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<MapRecord>> {
    let mut records = Vec::with_capacity(per_radius * RADII.count());

    for radius in RADII {
        for _ in 0..per_radius {
            let record = generate_one(store, radius, config, rng)?;
            tracing::debug!("Wrote {} (max_moves={})", record.path.display(), record.max_moves);
            records.push(record);
        }
        tracing::info!("Radius {}: {} maps written", radius, per_radius);
    }

    Ok(records)
}

fn report_results(summary: &BatchSummary, args: &GenerateArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_text_summary(summary, args);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn generate_one(
    store: &MapStore,
    radius: i32,
    config: &GeneratorConfig,
    rng: &mut ChaCha8Rng,
) -> Result<MapRecord> {
    let max_moves = rng.gen_range(MAX_MOVES);
    let map = generate_map(radius, max_moves, config, rng);
    let path = store
        .write(&map.document)
        .with_context(|| format!("Failed to write radius {} map", radius))?;

    Ok(MapRecord {
        path,
        max_moves,
        report: map.report,
    })
}

fn summarize(records: &[MapRecord]) -> BatchSummary {
    let maps = records.len();
    let danger_cells: usize = records.iter().map(|r| r.report.danger.cells()).sum();
    let max_moves: u32 = records.iter().map(|r| r.max_moves).sum();
    let average = |total: f32| if maps == 0 { 0.0 } else { total / maps as f32 };

    BatchSummary {
        maps,
        degraded_danger: records.iter().filter(|r| r.report.danger.is_degraded()).count(),
        unreachable_gold: records.iter().filter(|r| !r.report.gold.is_reached()).count(),
        without_shield: records
            .iter()
            .filter(|r| r.report.shield == hexmap_core::ShieldOutcome::NoEligibleOrbit)
            .count(),
        avg_danger_cells: average(danger_cells as f32),
        avg_max_moves: average(max_moves as f32),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_text_summary(summary: &BatchSummary, args: &GenerateArgs) {
    println!("\n=== Generated Maps ===");
    println!("Output:            {}", args.output.display());
    println!("Maps:              {}", summary.maps);
    println!("Avg danger cells:  {:.1}", summary.avg_danger_cells);
    println!("Avg max moves:     {:.1}", summary.avg_max_moves);
    println!("No danger (retry): {}", summary.degraded_danger);
    println!("No shield:         {}", summary.without_shield);
    println!("Gold short:        {}", summary.unreachable_gold);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_all_writes_every_radius() {
        let dir = tempfile::tempdir().unwrap();
        let store = MapStore::recreate(dir.path().join("maps")).unwrap();
        let mut rng = create_rng(Some(4));

        let records = generate_all(&store, 2, &GeneratorConfig::default(), &mut rng).unwrap();

        assert_eq!(records.len(), 16);
        let radii: Vec<i32> = records.iter().map(|r| r.report.radius).collect();
        assert_eq!(radii, vec![8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13, 13, 14, 14, 15, 15]);
        assert!(records.iter().all(|r| MAX_MOVES.contains(&r.max_moves)));
        assert!(records.iter().all(|r| r.path.exists()));
        assert_eq!(
            records.last().unwrap().path.file_name().unwrap(),
            "map_16.json"
        );
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.maps, 0);
        assert_eq!(summary.avg_danger_cells, 0.0);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}
