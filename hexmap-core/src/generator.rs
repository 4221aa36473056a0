//! Full map generation: board, orbits, placers, document

use rand::Rng;

use crate::board::disk;
use crate::config::GeneratorConfig;
use crate::map::MapDocument;
use crate::placement::{place_danger, place_gold, place_shield, DangerOutcome, GoldOutcome, ShieldOutcome};
use crate::symmetry::group_orbits;
use crate::tile::Selection;

/// What each placer did for one map
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    pub radius: i32,
    pub cells: usize,
    pub orbits: usize,
    pub danger: DangerOutcome,
    pub shield: ShieldOutcome,
    pub gold: GoldOutcome,
}

/// A generated map and how it came about
#[derive(Clone, Debug)]
pub struct GeneratedMap {
    pub document: MapDocument,
    pub report: GenerationReport,
}

/// Generate one map
pub fn generate_map<R: Rng>(
    radius: i32,
    max_moves: u32,
    config: &GeneratorConfig,
    rng: &mut R,
) -> GeneratedMap {
    let (selection, report) = generate_selection(radius, config, rng);
    let document = MapDocument::from_selection(&selection, radius, max_moves);

    tracing::debug!(
        "Generated radius {} map: {} danger, {:?}, gold {}",
        radius,
        report.danger.cells(),
        report.shield,
        report.gold.accrued()
    );

    GeneratedMap { document, report }
}

/// Run the placers in order and return the filled selection
pub fn generate_selection<R: Rng>(
    radius: i32,
    config: &GeneratorConfig,
    rng: &mut R,
) -> (Selection, GenerationReport) {
    let cells = disk(radius);
    let orbits = group_orbits(&cells);
    let mut selection = Selection::new();

    let danger = place_danger(&orbits, &mut selection, radius, config, rng);
    let shield = place_shield(&orbits, &mut selection, rng);
    let gold = place_gold(&orbits, &mut selection, config, rng);

    let report = GenerationReport {
        radius,
        cells: cells.len(),
        orbits: orbits.len(),
        danger,
        shield,
        gold,
    };
    (selection, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cube;
    use crate::placement::is_connected;
    use crate::symmetry::Orbit;
    use crate::tile::Tile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashSet;

    fn assert_orbits_homogeneous(radius: i32, selection: &Selection) {
        for orbit in group_orbits(&disk(radius)) {
            let tiles: Vec<Option<Tile>> = orbit.cells().iter().map(|&c| selection.get(c)).collect();
            assert!(tiles.windows(2).all(|w| w[0] == w[1]), "orbit {:?} split", orbit);
        }
    }

    #[test]
    fn test_radius_one_scenario() {
        let config = GeneratorConfig::default();
        for seed in 0..25 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (selection, report) = generate_selection(1, &config, &mut rng);

            assert_eq!(report.cells, 7);
            assert_eq!(report.orbits, 3);
            assert!(selection.iter().all(|(c, _)| c.is_within(1)));
            assert_orbits_homogeneous(1, &selection);
            assert!(!report.gold.is_reached());
        }
    }

    #[test]
    fn test_full_maps_hold_invariants() {
        let config = GeneratorConfig::default();
        for (seed, radius) in (8..=15).enumerate() {
            let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
            let map = generate_map(radius, 100, &config, &mut rng);
            let selection = map.document.to_selection().unwrap();

            assert_eq!(map.document.map_radius, radius);
            assert_eq!(map.document.max_moves, 100);
            assert_eq!(map.document.cells.len(), selection.len());
            assert_orbits_homogeneous(radius, &selection);

            let danger: FxHashSet<Cube> = selection
                .iter()
                .filter(|(_, t)| *t == Tile::Danger)
                .map(|(c, _)| c)
                .collect();
            assert_eq!(danger.len(), map.report.danger.cells());
            assert!(is_connected(radius, &danger));

            let shields = selection.count_where(|t| *t == Tile::Shield);
            match map.report.shield {
                ShieldOutcome::Placed { representative } => {
                    assert_eq!(shields, 3);
                    assert!(Orbit::of(representative)
                        .cells()
                        .iter()
                        .all(|&c| selection.get(c) == Some(Tile::Shield)));
                }
                ShieldOutcome::NoEligibleOrbit => assert_eq!(shields, 0),
            }

            assert_eq!(selection.total_gold(), map.report.gold.accrued());
        }
    }

    #[test]
    fn test_same_seed_same_map() {
        let config = GeneratorConfig::default();
        let a = generate_map(10, 75, &config, &mut ChaCha8Rng::seed_from_u64(99));
        let b = generate_map(10, 75, &config, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a.document, b.document);
        assert_eq!(a.report, b.report);
    }
}
