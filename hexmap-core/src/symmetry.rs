//! Rotational symmetry groups (orbits) of the board

use rustc_hash::FxHashMap;

use crate::board::Cube;

/// Cells related by 120 degree rotation about the origin
///
/// Size 1 for the origin, 3 for every other cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Orbit {
    cells: Vec<Cube>,
}

impl Orbit {
    /// Orbit of a single cell, deduplicated
    pub fn of(cell: Cube) -> Self {
        let mut cells = Vec::with_capacity(3);
        for rotated in cell.rotations() {
            if !cells.contains(&rotated) {
                cells.push(rotated);
            }
        }
        Self { cells }
    }

    /// First member; placement decisions are keyed on it
    pub fn representative(&self) -> Cube {
        self.cells[0]
    }

    pub fn cells(&self) -> &[Cube] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cube) -> bool {
        self.cells.contains(&cell)
    }
}

/// Canonical orbit identifier: the smallest of the three rotations
pub fn canonical(cell: Cube) -> Cube {
    let [a, b, c] = cell.rotations();
    a.min(b).min(c)
}

/// Partition cells into orbits
///
/// Orbits come out in order of first appearance; each orbit lists its
/// members in rotation order from the first cell seen. Every rotation of an
/// input cell is assumed to be in the input too, which holds for any disk.
pub fn group_orbits(cells: &[Cube]) -> Vec<Orbit> {
    let mut index: FxHashMap<Cube, usize> = FxHashMap::default();
    let mut orbits = Vec::new();

    for &cell in cells {
        index.entry(canonical(cell)).or_insert_with(|| {
            orbits.push(Orbit::of(cell));
            orbits.len() - 1
        });
    }

    orbits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{cell_count, disk};
    use rustc_hash::FxHashSet;

    #[test]
    fn test_orbit_sizes() {
        assert_eq!(Orbit::of(Cube::ORIGIN).len(), 1);
        assert_eq!(Orbit::of(Cube::new(1, 0)).len(), 3);
        assert_eq!(Orbit::of(Cube::new(3, -1)).representative(), Cube::new(3, -1));
    }

    #[test]
    fn test_canonical_shared_by_rotations() {
        let c = Cube::new(2, -1);
        assert_eq!(canonical(c), canonical(c.rotate()));
        assert_eq!(canonical(c), canonical(c.rotate().rotate()));
        assert_ne!(canonical(c), canonical(Cube::new(-2, 1)));
    }

    #[test]
    fn test_radius_one_has_three_orbits() {
        let orbits = group_orbits(&disk(1));
        assert_eq!(orbits.len(), 3);
        let mut sizes: Vec<usize> = orbits.iter().map(Orbit::len).collect();
        sizes.sort();
        assert_eq!(sizes, vec![1, 3, 3]);
        assert_eq!(orbits.iter().map(Orbit::len).sum::<usize>(), 7);
    }

    #[test]
    fn test_orbits_partition_disk() {
        for radius in 0..=12 {
            let cells = disk(radius);
            let orbits = group_orbits(&cells);

            let mut seen = FxHashSet::default();
            for orbit in &orbits {
                assert!(orbit.len() == 1 || orbit.len() == 3);
                for &cell in orbit.cells() {
                    assert!(seen.insert(cell), "{} appears twice", cell);
                }
            }
            assert_eq!(seen.len(), cell_count(radius));
            assert!(cells.iter().all(|c| seen.contains(c)));

            let singles: Vec<&Orbit> = orbits.iter().filter(|o| o.len() == 1).collect();
            assert_eq!(singles.len(), 1);
            assert_eq!(singles[0].representative(), Cube::ORIGIN);
            assert_eq!(orbits.len(), (cell_count(radius) - 1) / 3 + 1);
        }
    }
}
