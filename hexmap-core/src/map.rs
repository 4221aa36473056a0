//! Map document - the JSON file handed to the game simulator

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;

use crate::board::Cube;
use crate::error::{MapError, Result};
use crate::tile::{Selection, Tile, MAX_GOLD};

/// Encoded tile value: gold count, `"D"` for danger, `"S"` for shield
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellValue {
    Gold(u8),
    Danger,
    Shield,
}

const DANGER_CODE: &str = "D";
const SHIELD_CODE: &str = "S";

impl From<Tile> for CellValue {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Danger => CellValue::Danger,
            Tile::Shield => CellValue::Shield,
            Tile::Gold { count } => CellValue::Gold(count),
        }
    }
}

impl From<CellValue> for Tile {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Danger => Tile::Danger,
            CellValue::Shield => Tile::Shield,
            CellValue::Gold(count) => Tile::Gold { count },
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Gold(count) => serializer.serialize_u8(*count),
            CellValue::Danger => serializer.serialize_str(DANGER_CODE),
            CellValue::Shield => serializer.serialize_str(SHIELD_CODE),
        }
    }
}

struct CellValueVisitor;

impl<'de> Visitor<'de> for CellValueVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "a gold count 1-{}, \"D\" or \"S\"", MAX_GOLD)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<CellValue, E> {
        if (1..=u64::from(MAX_GOLD)).contains(&v) {
            Ok(CellValue::Gold(v as u8))
        } else {
            Err(E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<CellValue, E> {
        match u64::try_from(v) {
            Ok(v) => self.visit_u64(v),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<CellValue, E> {
        match v {
            DANGER_CODE => Ok(CellValue::Danger),
            SHIELD_CODE => Ok(CellValue::Shield),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CellValueVisitor)
    }
}

/// One non-empty cell in a map file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCell {
    pub q: i32,
    pub r: i32,
    pub s: i32,
    pub value: CellValue,
}

impl MapCell {
    pub fn cube(&self) -> Option<Cube> {
        Cube::from_qrs(self.q, self.r, self.s)
    }
}

/// A generated map as stored on disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDocument {
    pub map_radius: i32,
    pub max_moves: u32,
    pub cells: Vec<MapCell>,
}

impl MapDocument {
    /// Export the selected cells; empty cells are left out
    pub fn from_selection(selection: &Selection, radius: i32, max_moves: u32) -> Self {
        let mut cells: Vec<MapCell> = selection
            .iter()
            .map(|(cube, tile)| MapCell {
                q: cube.q,
                r: cube.r,
                s: cube.s,
                value: tile.into(),
            })
            .collect();
        cells.sort_by_key(|c| (c.q, c.r, c.s));

        Self {
            map_radius: radius,
            max_moves,
            cells,
        }
    }

    /// Rebuild the selection; cells not listed are empty
    pub fn to_selection(&self) -> Result<Selection> {
        let mut selection = Selection::new();
        for cell in &self.cells {
            let cube = cell
                .cube()
                .filter(|c| c.is_within(self.map_radius))
                .ok_or(MapError::InvalidCell {
                    q: cell.q,
                    r: cell.r,
                    s: cell.s,
                    radius: self.map_radius,
                })?;
            selection.insert_cell(cube, cell.value.into());
        }
        Ok(selection)
    }

    /// Tile at a cell, `None` for empty cells
    pub fn tile_at(&self, cube: Cube) -> Option<Tile> {
        self.cells
            .iter()
            .find(|c| (c.q, c.r, c.s) == (cube.q, cube.r, cube.s))
            .map(|c| c.value.into())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
        let document = serde_json::from_str(&content)?;
        Ok(document)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|e| MapError::io(path, e))?;
        Ok(())
    }

    /// Pretty JSON with 2-space indentation
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetry::Orbit;

    fn sample_selection() -> Selection {
        let mut selection = Selection::new();
        selection.assign_orbit(&Orbit::of(Cube::new(1, 0)), Tile::Danger);
        selection.assign_orbit(&Orbit::of(Cube::new(2, -1)), Tile::Shield);
        selection.assign_orbit(&Orbit::of(Cube::ORIGIN), Tile::Gold { count: 4 });
        selection
    }

    #[test]
    fn test_value_encoding() {
        let json = serde_json::to_string(&vec![
            CellValue::Gold(3),
            CellValue::Danger,
            CellValue::Shield,
        ])
        .unwrap();
        assert_eq!(json, r#"[3,"D","S"]"#);
    }

    #[test]
    fn test_value_decoding_rejects_bad_values() {
        assert!(serde_json::from_str::<CellValue>("0").is_err());
        assert!(serde_json::from_str::<CellValue>("7").is_err());
        assert!(serde_json::from_str::<CellValue>("-2").is_err());
        assert!(serde_json::from_str::<CellValue>(r#""X""#).is_err());
        assert_eq!(serde_json::from_str::<CellValue>("6").unwrap(), CellValue::Gold(6));
        assert_eq!(serde_json::from_str::<CellValue>(r#""S""#).unwrap(), CellValue::Shield);
    }

    #[test]
    fn test_document_layout() {
        let doc = MapDocument::from_selection(&sample_selection(), 3, 120);
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(value["map_radius"], 3);
        assert_eq!(value["max_moves"], 120);
        assert_eq!(value["cells"].as_array().unwrap().len(), 7);
        assert_eq!(value["cells"][0]["value"], "S"); // (-1, -1, 2) sorts first
        assert!(doc.cells.windows(2).all(|w| (w[0].q, w[0].r) < (w[1].q, w[1].r)));
    }

    #[test]
    fn test_round_trip() {
        let selection = sample_selection();
        let doc = MapDocument::from_selection(&selection, 3, 80);

        let parsed: MapDocument = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(parsed, doc);
        assert_eq!(parsed.to_selection().unwrap(), selection);
        assert_eq!(parsed.tile_at(Cube::ORIGIN), Some(Tile::Gold { count: 4 }));
        assert_eq!(parsed.tile_at(Cube::new(0, 3)), None);
    }

    #[test]
    fn test_to_selection_rejects_off_board_cells() {
        let doc = MapDocument {
            map_radius: 1,
            max_moves: 50,
            cells: vec![MapCell { q: 2, r: -2, s: 0, value: CellValue::Danger }],
        };
        assert!(matches!(doc.to_selection(), Err(MapError::InvalidCell { .. })));

        let doc = MapDocument {
            map_radius: 1,
            max_moves: 50,
            cells: vec![MapCell { q: 1, r: 1, s: 1, value: CellValue::Gold(1) }],
        };
        assert!(doc.to_selection().is_err());
    }
}
