//! The `Stimulus` trait: how strong an event is and how it reads.

use sense_core::{SpatialResult, StimulusType};

use crate::SpatialContext;

/// Intensity model and message renderer for one sense.
///
/// # Required methods
///
/// [`calculate_intensity`](Self::calculate_intensity) writes
/// `ctx.base_intensity` from `ctx.distance` (already filled in by the engine
/// via [`measure_distance`](Self::measure_distance)).
/// [`generate_base_message`](Self::generate_base_message) writes
/// `ctx.message` from `ctx.final_intensity`.  Both fail with
/// `InvalidParam` when a required field is missing and are otherwise total.
pub trait Stimulus: Send + Sync + 'static {
    /// Short display name, e.g. `"visual_basic"`.
    fn name(&self) -> &str;

    /// The sense this strategy models.
    fn stimulus_type(&self) -> StimulusType;

    /// Farthest distance at which the stimulus can register at all.  The
    /// engine rejects observers beyond this (times the system multiplier)
    /// before any other stage runs.
    fn base_range(&self, ctx: &SpatialContext<'_>) -> f32;

    /// Distance between source and observer as this sense perceives it.
    ///
    /// Default: straight 3-D Euclidean distance.
    fn measure_distance(&self, ctx: &SpatialContext<'_>) -> f32 {
        ctx.source.distance_to(ctx.observer_position)
    }

    fn calculate_intensity(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()>;

    fn generate_base_message(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()>;

    /// Post-intensity hook for sense-specific effects (blinding flashes,
    /// deafening blasts).  Default: no-op.
    fn apply_stimulus_effects(&self, _ctx: &mut SpatialContext<'_>) -> SpatialResult<()> {
        Ok(())
    }

    /// Cheap pre-filter run before the pipeline, e.g. to skip non-player
    /// observers.  Default: every observer is processed.
    fn should_process_observer(&self, _ctx: &SpatialContext<'_>) -> bool {
        true
    }
}
