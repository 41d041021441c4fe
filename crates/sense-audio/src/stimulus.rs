//! Audio falloff, distance metric and message tiers.
//!
//! # Falloff
//!
//! With `d` the audio distance and `R` the band's effective range:
//!
//! ```text
//! f = 1 / (1 + d² / (0.01 · R))
//! f *= 1 / (1 + d / 50)            if d > 5      (near-field attenuation)
//! f *= 1 / (1 + d / 30)            high band     (steep extra loss)
//! f  = √f                          low band      (gentle decay)
//! ```
//!
//! | Band | Base range | Range factor | `R`  |
//! |------|------------|--------------|------|
//! | Low  | 3000       | 1.3          | 3900 |
//! | Mid  | 1500       | 1.0          | 1500 |
//! | High | 1500       | 0.6          | 900  |

use sense_core::{Direction, FrequencyBand, Position, SpatialError, SpatialResult, StimulusType};
use sense_strategy::{SpatialContext, Stimulus};
use tracing::trace;

/// Farthest an ordinary sound can register.
pub const AUDIO_BASE_RANGE: f32 = 1500.0;

/// Farthest a low rumble (thunder, avalanches) can register.
pub const AUDIO_THUNDER_RANGE: f32 = 3000.0;

/// Distance past which near-field attenuation applies.
const NEAR_FIELD: f32 = 5.0;

/// Divisor on vertical separation in the audio distance metric.
const VERTICAL_WEIGHT: i32 = 4;

/// 3-D distance with height differences counting a quarter as much.  The
/// vertical component is divided with integer truncation.
pub fn audio_distance(a: Position, b: Position) -> f32 {
    let (dx, dy, dz) = a.delta_to(b);
    let dz = dz / i64::from(VERTICAL_WEIGHT);
    let (dx, dy, dz) = (dx as f32, dy as f32, dz as f32);
    (dx * dx + dy * dy + dz * dz).sqrt()
}

fn band_range(band: FrequencyBand) -> f32 {
    match band {
        FrequencyBand::Low => AUDIO_THUNDER_RANGE,
        FrequencyBand::Mid | FrequencyBand::High => AUDIO_BASE_RANGE,
    }
}

fn band_factor(band: FrequencyBand) -> f32 {
    match band {
        FrequencyBand::Low  => 1.3,
        FrequencyBand::Mid  => 1.0,
        FrequencyBand::High => 0.6,
    }
}

// ── Tiers ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AudioTier {
    Rumble,
    Faint,
    Echo,
    Muffled,
    Distant,
    Clear,
}

impl AudioTier {
    pub fn from_intensity(intensity: f32) -> Self {
        match intensity {
            i if i >= 0.8  => AudioTier::Clear,
            i if i >= 0.5  => AudioTier::Distant,
            i if i >= 0.3  => AudioTier::Muffled,
            i if i >= 0.15 => AudioTier::Echo,
            i if i >= 0.05 => AudioTier::Faint,
            _ => AudioTier::Rumble,
        }
    }

    /// Render the sentence for `description` heard from `direction`.
    pub fn render(self, description: &str, direction: Direction) -> String {
        // " from the north", " from above", " nearby", or nothing when coincident.
        let from = match direction {
            Direction::Here => String::new(),
            d => format!(" {}", d.from()),
        };
        match self {
            AudioTier::Clear | AudioTier::Distant => format!("You hear {description}{from}."),
            AudioTier::Muffled => format!("You hear the muffled sound of {description}{from}."),
            AudioTier::Echo => format!("An echo of {description} reaches you{from}."),
            AudioTier::Faint => format!("You faintly hear {description}{from}."),
            AudioTier::Rumble if direction == Direction::Here => {
                "You hear a low rumble nearby.".to_owned()
            }
            AudioTier::Rumble => format!("You hear a low rumble{from}."),
        }
    }
}

// ── AudioStimulus ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
pub struct AudioStimulus;

impl AudioStimulus {
    /// Distance falloff for `band`, before source strength.
    pub fn falloff(distance: f32, band: FrequencyBand) -> f32 {
        if distance <= 0.0 {
            return 1.0;
        }
        let effective = band_range(band) * band_factor(band);
        let mut f = 1.0 / (1.0 + distance * distance / (effective * 0.01));
        if distance > NEAR_FIELD {
            f *= 1.0 / (1.0 + distance / 50.0);
        }
        match band {
            FrequencyBand::High => f *= 1.0 / (1.0 + distance / 30.0),
            FrequencyBand::Low => f = f.sqrt(),
            FrequencyBand::Mid => {}
        }
        f
    }
}

impl Stimulus for AudioStimulus {
    fn name(&self) -> &str {
        "audio_basic"
    }

    fn stimulus_type(&self) -> StimulusType {
        StimulusType::Audio
    }

    /// Low sounds reach twice as far as the rest.
    fn base_range(&self, ctx: &SpatialContext<'_>) -> f32 {
        band_range(ctx.frequency)
    }

    fn measure_distance(&self, ctx: &SpatialContext<'_>) -> f32 {
        audio_distance(ctx.source, ctx.observer_position)
    }

    fn calculate_intensity(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()> {
        let falloff = Self::falloff(ctx.distance, ctx.frequency);
        ctx.base_intensity = ctx.source_strength * falloff;
        trace!(
            distance = ctx.distance,
            band = ?ctx.frequency,
            falloff,
            base = ctx.base_intensity,
            "audio intensity"
        );
        Ok(())
    }

    fn generate_base_message(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()> {
        if ctx.source_description.is_empty() {
            return Err(SpatialError::invalid_param("audio source has no description"));
        }
        let tier = AudioTier::from_intensity(ctx.final_intensity);
        let text = tier.render(&ctx.source_description, ctx.direction);
        ctx.message.set(&text);
        Ok(())
    }

    /// Conscious players only; sleeping counts as conscious.
    fn should_process_observer(&self, ctx: &SpatialContext<'_>) -> bool {
        ctx.observer_info.is_some_and(|o| o.is_player() && o.posture.is_conscious())
    }
}
