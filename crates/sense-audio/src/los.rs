//! Line of sound.
//!
//! Walks from the listener toward the source.  A mountain cell strictly
//! inside the middle band of the path (between 30% and 70% of the steps)
//! blocks the direct path; anything nearer either end can be heard around.
//! A blocked path still lets sound through by diffraction: the obstruction
//! is `0.6`, scaled by `0.7`, for `0.42` in total.

use sense_core::{SectorType, SpatialResult, StimulusSet, StimulusType};
use sense_strategy::{GridStep, GridWalk, LineOfSight, Obstacle, SpatialContext};
use tracing::trace;

/// Obstruction of a path with a mountain in its middle band.
const BLOCKED_OBSTRUCTION: f32 = 0.6;

/// Sound bends around obstacles better than light.
const DIFFRACTION: f32 = 0.7;

const MIDDLE_BAND: (f32, f32) = (0.3, 0.7);

#[inline]
fn in_middle_band(step: &GridStep) -> bool {
    let i = step.index as f32;
    let n = step.steps as f32;
    i > n * MIDDLE_BAND.0 && i < n * MIDDLE_BAND.1
}

#[derive(Copy, Clone, Debug, Default)]
pub struct AcousticLos;

impl AcousticLos {
    fn listener_walk(ctx: &SpatialContext<'_>) -> GridWalk {
        GridWalk::new(
            (ctx.observer_position.x, ctx.observer_position.y),
            (ctx.source.x, ctx.source.y),
        )
    }

    /// `true` unless a mountain sits in the middle band of the path.
    pub fn has_line_of_sound(ctx: &SpatialContext<'_>) -> bool {
        let host = ctx.host();
        !Self::listener_walk(ctx)
            .any(|s| host.terrain_at(s.x, s.y) == SectorType::Mountain && in_middle_band(&s))
    }
}

impl LineOfSight for AcousticLos {
    fn name(&self) -> &str {
        "acoustic"
    }

    fn supported(&self) -> StimulusSet {
        StimulusSet::of(&[StimulusType::Audio])
    }

    fn calculate_obstruction(&self, ctx: &SpatialContext<'_>) -> SpatialResult<f32> {
        let raw = if Self::has_line_of_sound(ctx) { 0.0 } else { BLOCKED_OBSTRUCTION };
        let obstruction = raw * DIFFRACTION;
        trace!(obstruction, "acoustic obstruction");
        Ok(obstruction)
    }

    /// Sound needs a medium and cannot pass through solid rock.
    fn can_transmit_through(&self, terrain: SectorType, stimulus: StimulusType) -> bool {
        stimulus == StimulusType::Audio
            && !matches!(terrain, SectorType::Mountain | SectorType::UnderdarkNoGround)
    }

    /// Records the mountain cells that block the middle of the path.
    fn blocking_elements(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<usize> {
        ctx.obstacles.clear();
        let host = ctx.host();
        for s in Self::listener_walk(ctx) {
            if ctx.obstacles.is_full() {
                break;
            }
            let sector = host.terrain_at(s.x, s.y);
            if sector == SectorType::Mountain && in_middle_band(&s) {
                ctx.obstacles.push(Obstacle {
                    x: s.x,
                    y: s.y,
                    sector,
                    weight: BLOCKED_OBSTRUCTION * DIFFRACTION,
                })?;
            }
        }
        Ok(ctx.obstacles.len())
    }
}
