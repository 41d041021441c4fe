//! Elevation-aware visibility range.
//!
//! From a ridge (or looking up at something high in the sky) you see
//! farther across the map.  When source and observer differ in height by
//! more than [`ELEVATION_THRESHOLD`], the horizontal range grows by half for
//! every 100 units of difference, up to double.

use sense_core::Position;

/// Height difference below which range is unchanged.
pub const ELEVATION_THRESHOLD: i32 = 50;

/// Range bonus per unit of height difference.
const BONUS_PER_UNIT: f32 = 0.5 / 100.0;

/// Largest bonus, as a fraction of `base_range`.
const MAX_BONUS: f32 = 1.0;

/// Horizontal range between an observer at `observer_z` and a target at
/// `target_z`.
pub fn elevation_range(observer_z: i32, target_z: i32, base_range: f32) -> f32 {
    let diff = (i64::from(target_z) - i64::from(observer_z)).abs();
    if diff <= i64::from(ELEVATION_THRESHOLD) {
        return base_range;
    }
    let bonus = (diff as f32 * BONUS_PER_UNIT).min(MAX_BONUS);
    base_range * (1.0 + bonus)
}

/// `true` if `target` is within the elevation-adjusted range of `observer`,
/// measured on the map plane.
pub fn within_elevation_range(observer: Position, target: Position, base_range: f32) -> bool {
    let range = elevation_range(observer.z, target.z, base_range);
    observer.horizontal_distance_to(target) <= range
}
