//! `sense-visual` — sight.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`stimulus`]  | `VisualStimulus`, `VisualTier` — falloff and message tiers      |
//! | [`los`]       | `PhysicalLos`, `TerrainClass` — terrain sampled along the ray   |
//! | [`modifier`]  | `VisualWeatherModifier` — weather × daylight, message framing   |
//! | [`elevation`] | Elevation-aware horizontal range for high or distant sources    |
//!
//! [`sense`] bundles the three strategies under [`SYSTEM_NAME`] for
//! registration with the engine.

use std::sync::Arc;

use sense_strategy::Sense;

pub mod elevation;
pub mod los;
pub mod modifier;
pub mod stimulus;

#[cfg(test)]
mod tests;

pub use elevation::{elevation_range, within_elevation_range, ELEVATION_THRESHOLD};
pub use los::{PhysicalLos, TerrainClass};
pub use modifier::VisualWeatherModifier;
pub use stimulus::{VisualStimulus, VisualTier, VISUAL_BASE_RANGE};

/// Registry name of the visual system.
pub const SYSTEM_NAME: &str = "Visual";

/// The standard visual sense.
pub fn sense() -> Sense {
    Sense::new(
        SYSTEM_NAME,
        Arc::new(VisualStimulus),
        Arc::new(PhysicalLos),
        Arc::new(VisualWeatherModifier),
    )
}
