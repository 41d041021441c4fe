//! CSV terrain loader.
//!
//! # CSV format
//!
//! One row per painted cell.  The map is sized to the bounding box of all
//! rows; cells without a row stay [`SectorType::Field`] at elevation zero.
//!
//! ```csv
//! x,y,sector,elevation
//! 0,0,field,0
//! 1,0,forest,5
//! 2,0,mountain,420
//! ```
//!
//! `sector` accepts the names produced by [`SectorType::name`]
//! (`high_mountain`, `water_noswim`, `underdark`, ...), case-insensitively.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use sense_core::SectorType;

use crate::{TerrainMap, TerrainMapBuilder, WorldError, WorldResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TerrainRecord {
    x:         i32,
    y:         i32,
    sector:    String,
    #[serde(default)]
    elevation: i32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`TerrainMap`] from a CSV file.
pub fn load_terrain_csv(path: &Path) -> WorldResult<TerrainMap> {
    let file = std::fs::File::open(path).map_err(WorldError::Io)?;
    load_terrain_reader(file)
}

/// Like [`load_terrain_csv`] but accepts any `Read` source.
pub fn load_terrain_reader<R: Read>(reader: R) -> WorldResult<TerrainMap> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut cells: Vec<(i32, i32, SectorType, i32)> = Vec::new();

    for result in csv_reader.deserialize::<TerrainRecord>() {
        let row = result.map_err(|e| WorldError::Parse(e.to_string()))?;
        let sector = row
            .sector
            .parse::<SectorType>()
            .map_err(|e| WorldError::Parse(format!("row ({}, {}): {e}", row.x, row.y)))?;
        cells.push((row.x, row.y, sector, row.elevation));
    }

    // ── Size the map to the bounding box ──────────────────────────────────
    let Some(&(x, y, _, _)) = cells.first() else {
        return Ok(TerrainMapBuilder::new((0, 0), 0, 0).build());
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (x, x, y, y);
    for &(x, y, _, _) in &cells {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let width = u32::try_from(i64::from(max_x) - i64::from(min_x) + 1)
        .map_err(|_| WorldError::Parse("terrain too wide".into()))?;
    let height = u32::try_from(i64::from(max_y) - i64::from(min_y) + 1)
        .map_err(|_| WorldError::Parse("terrain too tall".into()))?;

    let mut map = TerrainMapBuilder::new((min_x, min_y), width, height).build();
    for &(x, y, sector, elevation) in &cells {
        map.set(x, y, sector, elevation)?;
    }
    debug!(cells = cells.len(), width, height, "terrain loaded");
    Ok(map)
}
