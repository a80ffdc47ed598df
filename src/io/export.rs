//! JSON export of level data for rendering and spawning collaborators

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::executor::Level;
use crate::algorithm::placement::SpawnCategory;
use crate::io::error::{CaveError, Result, ensure_parent_dir};

/// One tile as handed to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Grid column
    pub x: usize,
    /// Grid row
    pub y: usize,
    /// Tile type in `0..7`
    pub tile_type: u8,
    /// Quarter turns counter-clockwise
    pub orientation: u8,
    /// Centred world coordinates
    pub world: [i64; 2],
    /// Rotation in degrees
    pub rotation_degrees: u16,
}

/// One spawn as handed to a spawner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnExport {
    /// Grid column
    pub x: usize,
    /// Grid row
    pub y: usize,
    /// Entity category
    pub category: SpawnCategory,
    /// Initial facing in degrees
    pub heading_degrees: u16,
    /// Centred world coordinates
    pub world: [i64; 2],
}

/// Serializable snapshot of a generated level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelExport {
    /// Seed text the level was generated from
    pub seed: String,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Rows of `#` and `.`, northernmost first
    pub rows: Vec<String>,
    /// Tiles in generation order
    pub tiles: Vec<TileRecord>,
    /// Accepted spawns, primaries first
    pub spawns: Vec<SpawnExport>,
}

impl LevelExport {
    /// Flatten a level into its exported form
    pub fn from_level(level: &Level) -> Self {
        let grid = level.grid();
        let (width, height) = (grid.width(), grid.height());

        let tiles = level
            .tiles()
            .iter()
            .map(|tile| TileRecord {
                x: tile.position.x,
                y: tile.position.y,
                tile_type: tile.kind.index(),
                orientation: tile.orientation,
                world: tile.position.world(width, height),
                rotation_degrees: tile.rotation_degrees(),
            })
            .collect();

        let spawns = level
            .spawns()
            .iter()
            .map(|spawn| SpawnExport {
                x: spawn.position.x,
                y: spawn.position.y,
                category: spawn.category,
                heading_degrees: spawn.heading_degrees,
                world: spawn.position.world(width, height),
            })
            .collect();

        Self {
            seed: level.seed().to_string(),
            width,
            height,
            rows: grid.to_rows(),
            tiles,
            spawns,
        }
    }
}

/// Write a level as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails
pub fn export_level_as_json(level: &Level, output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = std::fs::File::create(output_path).map_err(|e| CaveError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LevelExport::from_level(level)).map_err(|e| {
        CaveError::Serialization {
            path: output_path.to_path_buf(),
            source: e,
        }
    })
}
