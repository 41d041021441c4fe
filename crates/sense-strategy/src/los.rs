//! The `LineOfSight` trait: what the terrain between source and observer
//! takes away.

use sense_core::{SectorType, SpatialResult, StimulusSet, StimulusType};

use crate::SpatialContext;

/// Obstruction model for one or more senses.
pub trait LineOfSight: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Stimulus types this strategy can serve.
    fn supported(&self) -> StimulusSet;

    /// Fraction of the stimulus blocked on the way, in `[0, 1]`.  The engine
    /// clamps the result again before storing it in `ctx.obstruction`.
    ///
    /// Coincident source and observer must yield `0.0`.
    fn calculate_obstruction(&self, ctx: &SpatialContext<'_>) -> SpatialResult<f32>;

    /// Hard-block predicate: can `stimulus` pass through a cell of `terrain`
    /// at all?
    fn can_transmit_through(&self, terrain: SectorType, stimulus: StimulusType) -> bool;

    /// Fill `ctx.obstacles` with the cells that attenuate the stimulus and
    /// return how many were recorded.  Default: records nothing.
    fn blocking_elements(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<usize> {
        ctx.obstacles.clear();
        Ok(0)
    }
}
