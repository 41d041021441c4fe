//! `sense-audio` — hearing.
//!
//! Sound differs from sight in three ways that shape this crate:
//!
//! - **Pitch matters.**  Low sounds (thunder) carry far and fade gently;
//!   high sounds (a whistle) die quickly.  See [`FrequencyBand`] handling in
//!   [`stimulus`].
//! - **It bends.**  Only a mountain squarely in the middle of the path muffles
//!   a sound, and even then only partly.  See [`los`].
//! - **Ground shapes it.**  Forest soaks sound up, rock echoes it, water
//!   carries it, and sound rolls downhill better than up.  See [`modifier`].
//!
//! [`FrequencyBand`]: sense_core::FrequencyBand
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`stimulus`]  | `AudioStimulus`, `AudioTier`, audio distance metric        |
//! | [`los`]       | `AcousticLos` — line of sound                              |
//! | [`modifier`]  | `AudioWeatherModifier`, sector and elevation factors       |

use std::sync::Arc;

use sense_strategy::Sense;

pub mod los;
pub mod modifier;
pub mod stimulus;

#[cfg(test)]
mod tests;

pub use los::AcousticLos;
pub use modifier::{elevation_effect, sector_audio_factor, AudioWeatherModifier};
pub use stimulus::{
    audio_distance, AudioStimulus, AudioTier, AUDIO_BASE_RANGE, AUDIO_THUNDER_RANGE,
};

/// Registry name of the audio system.
pub const SYSTEM_NAME: &str = "Audio";

/// The standard audio sense.
pub fn sense() -> Sense {
    Sense::new(
        SYSTEM_NAME,
        Arc::new(AudioStimulus),
        Arc::new(AcousticLos),
        Arc::new(AudioWeatherModifier),
    )
}
