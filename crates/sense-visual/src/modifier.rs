//! Weather and daylight effects on sight.

use sense_core::{SpatialResult, StimulusSet, StimulusType, TimeOfDay, Weather};
use sense_strategy::{EnvironmentalModifiers, Modifier, SpatialContext};
use tracing::trace;

/// `(range, clarity)` for a weather state.
fn weather_factors(weather: Weather) -> EnvironmentalModifiers {
    match weather {
        Weather::Clear  => EnvironmentalModifiers::new(1.0, 1.0),
        Weather::Cloudy => EnvironmentalModifiers::new(0.9, 0.9),
        Weather::Rainy  => EnvironmentalModifiers::new(0.6, 0.7),
        Weather::Foggy  => EnvironmentalModifiers::new(0.3, 0.4),
        Weather::Storm  => EnvironmentalModifiers::new(0.2, 0.3),
    }
}

/// `(range, clarity)` for the state of the sun.
fn daylight_factors(time: TimeOfDay) -> EnvironmentalModifiers {
    match time {
        TimeOfDay::Day                   => EnvironmentalModifiers::new(1.0, 1.0),
        TimeOfDay::Dawn | TimeOfDay::Dusk => EnvironmentalModifiers::new(0.8, 0.9),
        TimeOfDay::Dark                  => EnvironmentalModifiers::new(0.3, 0.5),
    }
}

/// Prefix the sentence with `lead` ("Through the rain"), rephrasing the
/// verb so the result still reads naturally.
fn frame(lead: &str, message: &str) -> String {
    if let Some(rest) = message.strip_prefix("You clearly see") {
        format!("{lead}, you make out{rest}")
    } else if let Some(rest) = message.strip_prefix("You see") {
        format!("{lead}, you glimpse{rest}")
    } else if let Some(rest) = message.strip_prefix("You ") {
        format!("{lead}, you {rest}")
    } else {
        let mut chars = message.chars();
        match chars.next() {
            Some(first) => format!("{lead}, {}{}", first.to_ascii_lowercase(), chars.as_str()),
            None => message.to_owned(),
        }
    }
}

// ── VisualWeatherModifier ─────────────────────────────────────────────────────

/// The two tables multiply: a foggy night is `0.3 × 0.3` range.
#[derive(Copy, Clone, Debug, Default)]
pub struct VisualWeatherModifier;

impl Modifier for VisualWeatherModifier {
    fn name(&self) -> &str {
        "weather_terrain"
    }

    fn supported(&self) -> StimulusSet {
        StimulusSet::of(&[StimulusType::Visual])
    }

    fn apply_environmental_modifiers(
        &self,
        ctx: &SpatialContext<'_>,
    ) -> SpatialResult<EnvironmentalModifiers> {
        let weather = weather_factors(ctx.weather);
        let daylight = daylight_factors(ctx.time_of_day);
        let combined = weather.combine(daylight);
        trace!(?weather, ?daylight, ?combined, "visual modifiers");
        Ok(combined)
    }

    fn calculate_interference(&self, ctx: &SpatialContext<'_>) -> SpatialResult<f32> {
        Ok(match ctx.weather {
            Weather::Rainy => 0.2,
            Weather::Foggy => 0.5,
            Weather::Storm => 0.7,
            Weather::Clear | Weather::Cloudy => 0.0,
        })
    }

    /// Fog, then rain, then darkness; only the first that applies is used.
    fn modify_message(&self, ctx: &mut SpatialContext<'_>) -> SpatialResult<()> {
        let lead = match (ctx.weather, ctx.time_of_day) {
            (Weather::Foggy, _) => "Through the thick fog",
            (Weather::Rainy, _) => "Through the rain",
            (_, TimeOfDay::Dark) => "In the darkness",
            _ => return Ok(()),
        };
        let framed = frame(lead, ctx.message.as_str());
        ctx.message.set(&framed);
        Ok(())
    }
}
