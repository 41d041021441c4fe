//! World-grid coordinates and distance helpers.
//!
//! Positions are integer grid cells on the wilderness map: `x` grows east,
//! `y` grows north and `z` is elevation in the same units.  Distances are
//! returned as `f32`; at the engine's ranges (a few thousand cells at most)
//! single precision is exact to well under one cell.

use std::fmt;

/// A point on the world grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0, z: 0 };

    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same cell with a different elevation.
    #[inline]
    pub fn with_z(self, z: i32) -> Self {
        Self { z, ..self }
    }

    /// Component-wise `other - self`, widened so opposite corners of the
    /// grid cannot overflow.
    #[inline]
    pub fn delta_to(self, other: Position) -> (i64, i64, i64) {
        (
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
            i64::from(other.z) - i64::from(self.z),
        )
    }

    /// Straight-line Euclidean distance in three dimensions.
    pub fn distance_to(self, other: Position) -> f32 {
        let (dx, dy, dz) = self.delta_to(other);
        let (dx, dy, dz) = (dx as f32, dy as f32, dz as f32);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance on the map plane, ignoring elevation.
    pub fn horizontal_distance_to(self, other: Position) -> f32 {
        let (dx, dy, _) = self.delta_to(other);
        let (dx, dy) = (dx as f32, dy as f32);
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev distance on the map plane: the number of cells a digital
    /// line walk visits between the two points.
    #[inline]
    pub fn grid_steps_to(self, other: Position) -> u32 {
        let (dx, dy, _) = self.delta_to(other);
        // At most `u32::MAX` for any pair of `i32` coordinates.
        dx.unsigned_abs().max(dy.unsigned_abs()) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
