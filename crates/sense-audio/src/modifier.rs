//! Terrain, elevation and weather effects on hearing.
//!
//! The range modifier is the product of three factors:
//!
//! - the mean of [`sector_audio_factor`] at the listener and at the source;
//! - [`elevation_effect`] from the ground height at each end;
//! - the weather range factor.
//!
//! Clarity depends on weather alone.

use sense_core::{SectorType, SpatialResult, StimulusSet, StimulusType, Weather};
use sense_strategy::{EnvironmentalModifiers, Modifier, SpatialContext};
use tracing::trace;

/// How a sector shapes sound passing over it.
pub fn sector_audio_factor(sector: SectorType) -> f32 {
    match sector {
        SectorType::Forest => 0.7,
        SectorType::Mountain | SectorType::Hills => 1.3,
        SectorType::WaterSwim | SectorType::WaterNoSwim | SectorType::Ocean => 1.1,
        SectorType::UnderdarkWild | SectorType::UnderdarkNoGround => 0.5,
        _ => 1.0,
    }
}

/// Downhill sound gains 1% per unit of drop; uphill loses 0.5% per unit of
/// climb, never below zero.
pub fn elevation_effect(listener_ground: i32, source_ground: i32) -> f32 {
    let diff = (i64::from(source_ground) - i64::from(listener_ground)) as f32;
    if diff > 0.0 {
        1.0 + diff * 0.01
    } else if diff < 0.0 {
        (1.0 + diff * 0.005).max(0.0)
    } else {
        1.0
    }
}

fn weather_factors(weather: Weather) -> EnvironmentalModifiers {
    match weather {
        Weather::Clear  => EnvironmentalModifiers::new(1.0, 1.0),
        // Low cloud reflects sound back down.
        Weather::Cloudy => EnvironmentalModifiers::new(1.1, 0.95),
        Weather::Rainy  => EnvironmentalModifiers::new(0.7, 0.6),
        Weather::Foggy  => EnvironmentalModifiers::new(0.8, 0.7),
        Weather::Storm  => EnvironmentalModifiers::new(0.4, 0.3),
    }
}

// ── AudioWeatherModifier ──────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
pub struct AudioWeatherModifier;

impl Modifier for AudioWeatherModifier {
    fn name(&self) -> &str {
        "weather_terrain_audio"
    }

    fn supported(&self) -> StimulusSet {
        StimulusSet::of(&[StimulusType::Audio])
    }

    fn apply_environmental_modifiers(
        &self,
        ctx: &SpatialContext<'_>,
    ) -> SpatialResult<EnvironmentalModifiers> {
        let host = ctx.host();
        let (lx, ly) = (ctx.observer_position.x, ctx.observer_position.y);
        let (sx, sy) = (ctx.source.x, ctx.source.y);

        let terrain =
            (sector_audio_factor(host.terrain_at(lx, ly)) + sector_audio_factor(host.terrain_at(sx, sy))) / 2.0;
        let elevation = elevation_effect(host.elevation_at(lx, ly), host.elevation_at(sx, sy));
        let weather = weather_factors(ctx.weather);

        let modifiers = EnvironmentalModifiers::new(terrain * elevation * weather.range, weather.clarity);
        trace!(terrain, elevation, ?weather, ?modifiers, "audio modifiers");
        Ok(modifiers)
    }

    fn calculate_interference(&self, ctx: &SpatialContext<'_>) -> SpatialResult<f32> {
        Ok(match ctx.weather {
            Weather::Rainy => 0.3,
            Weather::Storm => 0.8,
            Weather::Clear | Weather::Cloudy | Weather::Foggy => 0.0,
        })
    }

    /// Rain and storms get a closing clause; other weather leaves the
    /// message alone.
    fn modify_message(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()> {
        let clause = match ctx.weather {
            Weather::Rainy => "muffled by the rain",
            Weather::Storm => "barely audible over the storm",
            _ => return Ok(()),
        };
        let base = ctx.message.as_str();
        let base = base.strip_suffix('.').unwrap_or(base);
        let framed = format!("{base}, {clause}.");
        ctx.message.set(&framed);
        Ok(())
    }
}
