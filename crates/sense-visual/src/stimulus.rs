//! Visual intensity falloff and message tiers.

use sense_core::{Direction, SpatialError, SpatialResult, StimulusType};
use sense_strategy::{SpatialContext, Stimulus};
use tracing::trace;

/// Farthest distance (cells) at which anything can be seen.
pub const VISUAL_BASE_RANGE: f32 = 1000.0;

/// Distance at which falloff halves the intensity.
const FALLOFF_SCALE: f32 = 100.0;

// ── Tiers ─────────────────────────────────────────────────────────────────────

/// How well the observer makes the source out, by final intensity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum VisualTier {
    Glimpse,
    Silhouette,
    Obscured,
    Distant,
    Clear,
}

impl VisualTier {
    pub fn from_intensity(intensity: f32) -> Self {
        match intensity {
            i if i >= 0.6  => VisualTier::Clear,
            i if i >= 0.4  => VisualTier::Distant,
            i if i >= 0.25 => VisualTier::Obscured,
            i if i >= 0.1  => VisualTier::Silhouette,
            _ => VisualTier::Glimpse,
        }
    }

    /// Render the sentence for `description` seen in `direction`.
    pub fn render(self, description: &str, direction: Direction) -> String {
        let here = direction == Direction::Here;
        let toward = direction.toward();
        match self {
            VisualTier::Clear if here => format!("You clearly see {description}."),
            VisualTier::Clear => format!("You clearly see {description} {toward}."),
            VisualTier::Distant if here => format!("You see {description}."),
            VisualTier::Distant => format!("In the distance {toward}, you see {description}."),
            VisualTier::Obscured if here => format!("Through the haze, you make out {description}."),
            VisualTier::Obscured => format!("Through the haze {toward}, you make out {description}."),
            VisualTier::Silhouette if here => {
                format!("You glimpse the silhouette of {description}.")
            }
            VisualTier::Silhouette => {
                format!("Somewhere {toward}, you glimpse the silhouette of {description}.")
            }
            VisualTier::Glimpse if here => {
                "You catch a brief glimpse of something moving nearby.".to_owned()
            }
            VisualTier::Glimpse => {
                format!("You catch a brief glimpse of something moving {toward}.")
            }
        }
    }
}

// ── VisualStimulus ────────────────────────────────────────────────────────────

/// Sight: intensity falls off as `1 / (1 + d/100)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct VisualStimulus;

impl VisualStimulus {
    /// Distance falloff alone, before source strength.
    #[inline]
    pub fn falloff(distance: f32) -> f32 {
        if distance <= 0.0 { 1.0 } else { 1.0 / (1.0 + distance / FALLOFF_SCALE) }
    }
}

impl Stimulus for VisualStimulus {
    fn name(&self) -> &str {
        "visual_basic"
    }

    fn stimulus_type(&self) -> StimulusType {
        StimulusType::Visual
    }

    fn base_range(&self, _ctx: &SpatialContext<'_>) -> f32 {
        VISUAL_BASE_RANGE
    }

    fn calculate_intensity(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()> {
        let falloff = Self::falloff(ctx.distance);
        ctx.base_intensity = ctx.source_strength * falloff;
        trace!(distance = ctx.distance, falloff, base = ctx.base_intensity, "visual intensity");
        Ok(())
    }

    fn generate_base_message(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()> {
        if ctx.source_description.is_empty() {
            return Err(SpatialError::invalid_param("visual source has no description"));
        }
        let tier = VisualTier::from_intensity(ctx.final_intensity);
        let text = tier.render(&ctx.source_description, ctx.direction);
        ctx.message.set(&text);
        Ok(())
    }

    /// Players standing outdoors only.
    fn should_process_observer(&self, ctx: &SpatialContext<'_>) -> bool {
        ctx.observer_info.is_some_and(|o| o.is_player() && o.outdoors)
    }
}
