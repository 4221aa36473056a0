//! Tile types and the selected-cells map

use rustc_hash::FxHashMap;

use crate::board::Cube;
use crate::symmetry::Orbit;

/// Maximum gold on a single cell
pub const MAX_GOLD: u8 = 6;

/// A special tile attached to a cell; cells without one are empty
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Danger,
    Shield,
    Gold { count: u8 },
}

impl Tile {
    pub fn is_gold(&self) -> bool {
        matches!(self, Tile::Gold { .. })
    }

    /// Gold count, 0 for anything else
    pub fn gold(&self) -> u8 {
        match self {
            Tile::Gold { count } => *count,
            _ => 0,
        }
    }
}

/// Cells that carry a tile
///
/// Writes go through [`Selection::assign_orbit`], so every orbit is either
/// entirely absent or entirely carrying the same tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    tiles: FxHashMap<Cube, Tile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `tile` on every cell of the orbit
    pub fn assign_orbit(&mut self, orbit: &Orbit, tile: Tile) {
        for &cell in orbit.cells() {
            self.tiles.insert(cell, tile);
        }
    }

    pub fn get(&self, cell: Cube) -> Option<Tile> {
        self.tiles.get(&cell).copied()
    }

    pub fn contains(&self, cell: Cube) -> bool {
        self.tiles.contains_key(&cell)
    }

    /// Tile shared by an orbit, looked up on its representative
    pub fn orbit_tile(&self, orbit: &Orbit) -> Option<Tile> {
        self.get(orbit.representative())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cube, Tile)> + '_ {
        self.tiles.iter().map(|(&cell, &tile)| (cell, tile))
    }

    /// Number of cells carrying a tile matching `pred`
    pub fn count_where(&self, pred: impl Fn(&Tile) -> bool) -> usize {
        self.tiles.values().filter(|t| pred(t)).count()
    }

    /// Sum of gold over all cells
    pub fn total_gold(&self) -> u32 {
        self.tiles.values().map(|t| u32::from(t.gold())).sum()
    }

    /// Insert a single cell; only used when rebuilding from a saved map
    pub(crate) fn insert_cell(&mut self, cell: Cube, tile: Tile) {
        self.tiles.insert(cell, tile);
    }
}
