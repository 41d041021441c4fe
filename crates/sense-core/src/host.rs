//! Interfaces the engine consumes from the embedding game.
//!
//! The engine never owns world state.  Observer lookup, weather, daylight
//! and terrain all come through [`WorldHost`]; rendered text leaves through
//! [`MessageSink`].  Both are object-safe so hosts can hand out `&dyn`.

use crate::{ObserverId, Position, SectorType, TimeOfDay, Weather};

// ── Observer snapshot ─────────────────────────────────────────────────────────

/// Whether an observer is controlled by a connected player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObserverKind {
    #[default]
    Player,
    NonPlayer,
}

/// Physical state of an observer, ordered from least to most alert.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Posture {
    Dead,
    MortallyWounded,
    Incapacitated,
    Stunned,
    Sleeping,
    Resting,
    Sitting,
    Fighting,
    #[default]
    Standing,
}

impl Posture {
    /// `true` once the observer is above [`Posture::Stunned`].  Sleeping
    /// observers count; a loud enough sound can still reach them.
    #[inline]
    pub fn is_conscious(self) -> bool {
        self > Posture::Stunned
    }
}

/// What the engine needs to know about one observer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverInfo {
    /// World coordinates; `z` is the observer's elevation.
    pub position:  Position,
    pub kind:      ObserverKind,
    pub posture:   Posture,
    /// Standing in the open (wilderness) rather than indoors.
    pub outdoors:  bool,
    /// Has a live session that can receive text.
    pub connected: bool,
}

impl ObserverInfo {
    /// A connected, standing player out in the open at `position`.
    pub fn player_at(position: Position) -> Self {
        Self {
            position,
            kind:      ObserverKind::Player,
            posture:   Posture::Standing,
            outdoors:  true,
            connected: true,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == ObserverKind::Player
    }
}

// ── Host traits ───────────────────────────────────────────────────────────────

/// Read-only view of the game world.
pub trait WorldHost {
    /// Snapshot of an observer, or `None` if the handle is stale.
    fn observer(&self, id: ObserverId) -> Option<ObserverInfo>;

    /// Weather at a location.
    fn weather_at(&self, pos: Position) -> Weather;

    /// Current state of the sun.
    fn time_of_day(&self) -> TimeOfDay;

    /// Sector classification of a map cell.
    fn terrain_at(&self, x: i32, y: i32) -> SectorType;

    /// Ground elevation of a map cell.
    fn elevation_at(&self, x: i32, y: i32) -> i32;
}

/// Delivers rendered text to an observer's session.
pub trait MessageSink {
    fn deliver(&mut self, observer: ObserverId, text: &str);
}

impl<F> MessageSink for F
where
    F: FnMut(ObserverId, &str),
{
    fn deliver(&mut self, observer: ObserverId, text: &str) {
        self(observer, text)
    }
}
