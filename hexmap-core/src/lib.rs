//! HEXMAP Core - Symmetric hex map generation
//!
//! This crate provides the map generator:
//! - Board geometry (hex grid with cube coordinates)
//! - Rotational symmetry orbits
//! - Danger, shield and gold placement
//! - Map documents and the numbered map store

pub mod board;
pub mod symmetry;
pub mod tile;
pub mod config;
pub mod placement;
pub mod generator;
pub mod map;
pub mod store;
pub mod error;

// Re-exports for convenient access
pub use board::{Cube, DIRECTIONS, cell_count, disk};
pub use symmetry::{Orbit, group_orbits};
pub use tile::{Selection, Tile, MAX_GOLD};
pub use config::GeneratorConfig;
pub use placement::{place_danger, place_shield, place_gold, is_connected, DangerOutcome, ShieldOutcome, GoldOutcome};
pub use generator::{generate_map, generate_selection, GeneratedMap, GenerationReport};
pub use map::{CellValue, MapCell, MapDocument};
pub use store::{MapStore, map_file_name, parse_map_id, scan_next_id};
pub use error::MapError;
