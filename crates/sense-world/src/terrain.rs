//! Dense sector and elevation grids.
//!
//! # Data layout
//!
//! A `TerrainMap` covers the rectangle `[min_x, min_x + width) ×
//! [min_y, min_y + height)`.  Both grids are row-major with `y` as the row:
//!
//! ```text
//! cell(x, y) = (y - min_y) * width + (x - min_x)
//! ```
//!
//! Cells outside the rectangle read as the map's default sector at
//! elevation zero, so strategies may sample any coordinate safely.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sense_core::SectorType;

use crate::{WorldError, WorldResult};

// ── TerrainMap ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TerrainMap {
    min_x:          i32,
    min_y:          i32,
    width:          u32,
    height:         u32,
    default_sector: SectorType,
    sectors:        Vec<SectorType>,
    elevation:      Vec<i32>,
}

impl TerrainMap {
    #[inline]
    fn cell(&self, x: i32, y: i32) -> Option<usize> {
        let cx = i64::from(x) - i64::from(self.min_x);
        let cy = i64::from(y) - i64::from(self.min_y);
        if cx < 0 || cy < 0 || cx >= i64::from(self.width) || cy >= i64::from(self.height) {
            return None;
        }
        Some(cy as usize * self.width as usize + cx as usize)
    }

    /// `true` if `(x, y)` lies inside the stored rectangle.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some()
    }

    /// Sector at `(x, y)`; the default sector outside the map.
    #[inline]
    pub fn sector(&self, x: i32, y: i32) -> SectorType {
        self.cell(x, y).map_or(self.default_sector, |i| self.sectors[i])
    }

    /// Ground elevation at `(x, y)`; zero outside the map.
    #[inline]
    pub fn elevation(&self, x: i32, y: i32) -> i32 {
        self.cell(x, y).map_or(0, |i| self.elevation[i])
    }

    /// Overwrite one cell.
    pub fn set(&mut self, x: i32, y: i32, sector: SectorType, elevation: i32) -> WorldResult<()> {
        let i = self.cell(x, y).ok_or(WorldError::OutOfBounds { x, y })?;
        self.sectors[i] = sector;
        self.elevation[i] = elevation;
        Ok(())
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn origin(&self) -> (i32, i32) { (self.min_x, self.min_y) }
    pub fn default_sector(&self) -> SectorType { self.default_sector }
}

// ── TerrainMapBuilder ─────────────────────────────────────────────────────────

/// Paints a [`TerrainMap`] from a blank rectangle.
///
/// Operations apply in call order, so later paint wins:
///
/// ```rust,ignore
/// let map = TerrainMapBuilder::new((-100, -100), 200, 200)
///     .fill_rect((-100, -100), (99, 99), SectorType::Field)
///     .scatter(SectorType::Forest, 0.15, 42)
///     .fill_rect((10, -5), (12, 5), SectorType::Mountain)
///     .elevation_rect((10, -5), (12, 5), 400)
///     .build();
/// ```
pub struct TerrainMapBuilder {
    map: TerrainMap,
}

impl TerrainMapBuilder {
    /// A `width × height` map whose south-west corner is `origin`, filled
    /// with [`SectorType::Field`] at elevation zero.
    pub fn new(origin: (i32, i32), width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            map: TerrainMap {
                min_x:          origin.0,
                min_y:          origin.1,
                width,
                height,
                default_sector: SectorType::Field,
                sectors:        vec![SectorType::Field; n],
                elevation:      vec![0; n],
            },
        }
    }

    /// Sector reported for coordinates outside the map.
    pub fn default_sector(mut self, sector: SectorType) -> Self {
        self.map.default_sector = sector;
        self
    }

    /// Paint every cell in the inclusive rectangle `a..=b` with `sector`.
    /// Parts of the rectangle outside the map are ignored.
    pub fn fill_rect(mut self, a: (i32, i32), b: (i32, i32), sector: SectorType) -> Self {
        self.for_each_in(a, b, |map, i| map.sectors[i] = sector);
        self
    }

    /// Set the elevation of every cell in the inclusive rectangle `a..=b`.
    pub fn elevation_rect(mut self, a: (i32, i32), b: (i32, i32), elevation: i32) -> Self {
        self.for_each_in(a, b, |map, i| map.elevation[i] = elevation);
        self
    }

    /// Set a single cell.  Out-of-map coordinates are ignored.
    pub fn cell(mut self, x: i32, y: i32, sector: SectorType, elevation: i32) -> Self {
        let _ = self.map.set(x, y, sector, elevation);
        self
    }

    /// Repaint a random `density` fraction of cells with `sector`,
    /// deterministically for a given `seed`.
    pub fn scatter(mut self, sector: SectorType, density: f64, seed: u64) -> Self {
        let density = density.clamp(0.0, 1.0);
        let mut rng = SmallRng::seed_from_u64(seed);
        for s in self.map.sectors.iter_mut() {
            if rng.gen_bool(density) {
                *s = sector;
            }
        }
        self
    }

    /// Add a random offset in `-amplitude..=amplitude` to every cell's
    /// elevation.
    pub fn roughen(mut self, amplitude: i32, seed: u64) -> Self {
        if amplitude <= 0 {
            return self;
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        for e in self.map.elevation.iter_mut() {
            *e += rng.gen_range(-amplitude..=amplitude);
        }
        self
    }

    fn for_each_in(&mut self, a: (i32, i32), b: (i32, i32), mut f: impl FnMut(&mut TerrainMap, usize)) {
        let m = &self.map;
        if m.width == 0 || m.height == 0 {
            return;
        }
        let max_x = m.min_x.saturating_add(m.width as i32 - 1);
        let max_y = m.min_y.saturating_add(m.height as i32 - 1);
        let (x0, x1) = (a.0.min(b.0).max(m.min_x), a.0.max(b.0).min(max_x));
        let (y0, y1) = (a.1.min(b.1).max(m.min_y), a.1.max(b.1).min(max_y));
        for y in y0..=y1 {
            for x in x0..=x1 {
                if let Some(i) = self.map.cell(x, y) {
                    f(&mut self.map, i);
                }
            }
        }
    }

    pub fn build(self) -> TerrainMap {
        self.map
    }
}
