//! The `Modifier` trait: weather, daylight and terrain effects.

use sense_core::{SpatialResult, StimulusSet};

use crate::SpatialContext;

/// Multipliers an environment applies to a stimulus.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentalModifiers {
    /// Scales the stimulus' effective reach (and so its final intensity).
    pub range:   f32,
    /// How sharp the perception is once it arrives.
    pub clarity: f32,
}

impl EnvironmentalModifiers {
    pub const NEUTRAL: EnvironmentalModifiers = EnvironmentalModifiers { range: 1.0, clarity: 1.0 };

    #[inline]
    pub fn new(range: f32, clarity: f32) -> Self {
        Self { range, clarity }
    }

    /// Component-wise product.
    #[inline]
    #[must_use]
    pub fn combine(self, other: EnvironmentalModifiers) -> Self {
        Self { range: self.range * other.range, clarity: self.clarity * other.clarity }
    }
}

impl Default for EnvironmentalModifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Environmental model for one or more senses.
pub trait Modifier: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Stimulus types this strategy can serve.
    fn supported(&self) -> StimulusSet;

    fn apply_environmental_modifiers(
        &self,
        ctx: &SpatialContext<'_>,
    ) -> SpatialResult<EnvironmentalModifiers>;

    /// Background noise competing with the stimulus, `0.0` (none) upward.
    fn calculate_interference(&self, ctx: &SpatialContext<'_>) -> SpatialResult<f32>;

    /// Rewrite `ctx.message` with environmental framing ("Through the thick
    /// fog, ...").  Leaves the message unchanged when nothing applies.
    fn modify_message(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()>;
}
