//! Environmental snapshot types.
//!
//! These mirror the coarse scales the host game exposes: a five-step weather
//! scale, the sun's state, the pitch band of a sound, and the wilderness
//! sector classification returned by `terrain_at`.

use std::fmt;
use std::str::FromStr;

use crate::SpatialError;

// ── Weather ───────────────────────────────────────────────────────────────────

/// Coarse weather scale (0–4) sampled at the observer's location.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rainy,
    Foggy,
    Storm,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Cloudy,
        Weather::Rainy,
        Weather::Foggy,
        Weather::Storm,
    ];

    /// Map the 0–4 scale onto a variant.  Out-of-range values are `None`.
    pub fn from_scale(scale: u8) -> Option<Weather> {
        Self::ALL.get(scale as usize).copied()
    }

    /// Position on the 0–4 scale.
    #[inline]
    pub fn scale(self) -> u8 {
        self as u8
    }

    /// Collapse a raw 0–255 weather-noise sample (as produced by the
    /// wilderness weather field) onto the coarse scale.
    pub fn from_noise(raw: u8) -> Weather {
        match raw {
            225..=255 => Weather::Storm,
            200..=224 => Weather::Foggy,
            178..=199 => Weather::Rainy,
            128..=177 => Weather::Cloudy,
            _ => Weather::Clear,
        }
    }
}

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// State of the sun.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeOfDay {
    #[default]
    Day,
    Dawn,
    Dusk,
    Dark,
}

impl TimeOfDay {
    /// Convert the host's sunlight code (0 dark, 1 rise, 2 light, 3 set).
    /// Unknown codes are treated as dark.
    pub fn from_sunlight(code: u8) -> TimeOfDay {
        match code {
            1 => TimeOfDay::Dawn,
            2 => TimeOfDay::Day,
            3 => TimeOfDay::Dusk,
            _ => TimeOfDay::Dark,
        }
    }
}

// ── FrequencyBand ─────────────────────────────────────────────────────────────

/// Pitch band of an audio stimulus.  Different bands carry differently.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrequencyBand {
    /// Thunder, drums, rockfalls.
    Low,
    /// Speech and most everyday sounds.
    #[default]
    Mid,
    /// Whistles, screams, birdsong.
    High,
}

// ── SectorType ────────────────────────────────────────────────────────────────

/// Wilderness sector classification of a single map cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectorType {
    Inside,
    City,
    #[default]
    Field,
    Forest,
    Jungle,
    Hills,
    Mountain,
    HighMountain,
    WaterSwim,
    WaterNoSwim,
    Ocean,
    Underwater,
    Flying,
    Road,
    Desert,
    Marshland,
    Planes,
    UnderdarkWild,
    UnderdarkNoGround,
}

impl SectorType {
    /// Stable lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SectorType::Inside            => "inside",
            SectorType::City              => "city",
            SectorType::Field             => "field",
            SectorType::Forest            => "forest",
            SectorType::Jungle            => "jungle",
            SectorType::Hills             => "hills",
            SectorType::Mountain          => "mountain",
            SectorType::HighMountain      => "high_mountain",
            SectorType::WaterSwim         => "water_swim",
            SectorType::WaterNoSwim       => "water_noswim",
            SectorType::Ocean             => "ocean",
            SectorType::Underwater        => "underwater",
            SectorType::Flying            => "flying",
            SectorType::Road              => "road",
            SectorType::Desert            => "desert",
            SectorType::Marshland         => "marshland",
            SectorType::Planes            => "planes",
            SectorType::UnderdarkWild     => "underdark",
            SectorType::UnderdarkNoGround => "underdark_noground",
        }
    }

    /// `true` for the rock sectors both senses treat as solid.
    #[inline]
    pub fn is_mountainous(self) -> bool {
        matches!(self, SectorType::Mountain | SectorType::HighMountain)
    }
}

impl FromStr for SectorType {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sector = match s.trim().to_ascii_lowercase().as_str() {
            "inside"             => SectorType::Inside,
            "city"               => SectorType::City,
            "field"              => SectorType::Field,
            "forest"             => SectorType::Forest,
            "jungle"             => SectorType::Jungle,
            "hills"              => SectorType::Hills,
            "mountain"           => SectorType::Mountain,
            "high_mountain"      => SectorType::HighMountain,
            "water_swim"         => SectorType::WaterSwim,
            "water_noswim"       => SectorType::WaterNoSwim,
            "ocean"              => SectorType::Ocean,
            "underwater"         => SectorType::Underwater,
            "flying"             => SectorType::Flying,
            "road"               => SectorType::Road,
            "desert"             => SectorType::Desert,
            "marshland"          => SectorType::Marshland,
            "planes"             => SectorType::Planes,
            "underdark"          => SectorType::UnderdarkWild,
            "underdark_noground" => SectorType::UnderdarkNoGround,
            other => {
                return Err(SpatialError::invalid_param(format!(
                    "unknown sector type {other:?}"
                )))
            }
        };
        Ok(sector)
    }
}

impl fmt::Display for SectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
