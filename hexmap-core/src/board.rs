//! Hex board geometry with cube coordinates

use serde::{Deserialize, Serialize};

/// Cube hex coordinates, invariant `q + r + s == 0`
///
/// Doubles as the cell key for tile assignments: equality and hashing are
/// structural, so no string round-trips are needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Cube {
    /// The center of the board
    pub const ORIGIN: Cube = Cube { q: 0, r: 0, s: 0 };

    /// Build a cube coordinate from its two free axes
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Build from all three axes, `None` if they do not sum to zero
    pub fn from_qrs(q: i32, r: i32, s: i32) -> Option<Self> {
        (q + r + s == 0).then_some(Self { q, r, s })
    }

    /// Distance from center (0,0,0)
    pub fn distance_to_center(&self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.s.abs())
    }

    /// Check if this hex lies on a board of the given radius
    pub fn is_within(&self, radius: i32) -> bool {
        self.distance_to_center() <= radius
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Cube {
        let (dq, dr, ds) = DIRECTIONS[direction % 6];
        Cube {
            q: self.q + dq,
            r: self.r + dr,
            s: self.s + ds,
        }
    }

    /// Neighbors that stay on a board of the given radius
    pub fn neighbors_within(&self, radius: i32) -> impl Iterator<Item = Cube> + '_ {
        (0..DIRECTIONS.len())
            .map(move |d| self.neighbor(d))
            .filter(move |n| n.is_within(radius))
    }

    /// 120 degree rotation about the origin: (q, r, s) -> (r, s, q)
    pub fn rotate(&self) -> Cube {
        Cube {
            q: self.r,
            r: self.s,
            s: self.q,
        }
    }

    /// The three cyclic rotations, starting with `self`
    pub fn rotations(&self) -> [Cube; 3] {
        let once = self.rotate();
        [*self, once, once.rotate()]
    }
}

impl std::fmt::Display for Cube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.q, self.r, self.s)
    }
}

/// Direction vectors in cube coordinates (dq, dr, ds)
pub const DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

/// Number of cells on a board of the given radius: 3R² + 3R + 1
pub fn cell_count(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// Every cell of the board, ordered by q then r
pub fn disk(radius: i32) -> Vec<Cube> {
    let mut cells = Vec::with_capacity(cell_count(radius));
    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        for r in r_min..=r_max {
            cells.push(Cube::new(q, r));
        }
    }
    cells
}
