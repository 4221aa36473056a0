//! Output directory of numbered map files (`map_<id>.json`)

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{MapError, Result};
use crate::map::MapDocument;

const MAP_FILE_PREFIX: &str = "map_";
const MAP_FILE_SUFFIX: &str = ".json";

/// File name for a map id
pub fn map_file_name(id: u64) -> String {
    format!("{}{}{}", MAP_FILE_PREFIX, id, MAP_FILE_SUFFIX)
}

/// Map id encoded in a file name, `None` for anything else
pub fn parse_map_id(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix(MAP_FILE_PREFIX)?
        .strip_suffix(MAP_FILE_SUFFIX)?
        .parse()
        .ok()
}

/// Next free id: one past the largest existing map id, or 1
pub fn scan_next_id(dir: &Path) -> Result<u64> {
    let entries = std::fs::read_dir(dir).map_err(|e| MapError::io(dir, e))?;
    let mut max_id = 0;
    for entry in entries {
        let entry = entry.map_err(|e| MapError::io(dir, e))?;
        if let Some(id) = entry.file_name().to_str().and_then(parse_map_id) {
            max_id = max_id.max(id);
        }
    }
    Ok(max_id + 1)
}

/// A directory of generated maps
///
/// Ids come from an atomic counter seeded by a directory scan, and files are
/// created with create-new semantics. Writers sharing a store never get the
/// same id; a file dropped in by another process is skipped over.
#[derive(Debug)]
pub struct MapStore {
    dir: PathBuf,
    next_id: AtomicU64,
}

impl MapStore {
    /// Use an existing directory, continuing after its highest map id
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let next_id = scan_next_id(&dir)?;
        Ok(Self {
            dir,
            next_id: AtomicU64::new(next_id),
        })
    }

    /// Remove everything under `dir` and start again from id 1
    pub fn recreate(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.exists() {
            std::fs::remove_dir_all(&dir).map_err(|e| MapError::io(&dir, e))?;
        }
        std::fs::create_dir_all(&dir).map_err(|e| MapError::io(&dir, e))?;
        Ok(Self {
            dir,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a map under the next free id and return its path
    pub fn write(&self, document: &MapDocument) -> Result<PathBuf> {
        let content = document.to_json()?;
        loop {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let path = self.dir.join(map_file_name(id));

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())
                        .map_err(|e| MapError::io(&path, e))?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!("{} already exists, trying next id", path.display());
                }
                Err(e) => return Err(MapError::io(&path, e)),
            }
        }
    }
}
