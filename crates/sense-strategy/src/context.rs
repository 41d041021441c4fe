//! The per-event, per-observer working record.

use sense_core::{
    Direction, FrequencyBand, ObserverId, ObserverInfo, Position, SpatialError, SpatialResult,
    StimulusType, SystemId, TimeOfDay, Weather, WorldHost,
};
use tracing::trace;

use crate::{
    Bounded, EntityList, MessageBuffer, ObstacleList, MAX_NEARBY_ENTITIES, MAX_OBSTACLES,
};

/// One stimulus event as seen by one observer.
///
/// A context is created once per event, pointed at each candidate observer in
/// turn with [`set_observer`](Self::set_observer), and consumed by
/// [`free`](Self::free).  Because `free` takes `self`, a context cannot be
/// released twice or used after release.
///
/// # Field validity
///
/// `distance`, `base_intensity`, `obstruction`, the modifiers and
/// `final_intensity` hold neutral values after `set_observer` and are only
/// meaningful once the engine stage that computes them has run.  The
/// rendered `message` is only meaningful if the engine returned `Ok`.
pub struct SpatialContext<'w> {
    host: &'w dyn WorldHost,

    // ── Source ────────────────────────────────────────────────────────────
    pub source:             Position,
    pub source_description: String,
    pub stimulus_type:      StimulusType,
    /// Amplitude applied on top of the distance falloff.  `1.0` is an
    /// ordinary event; dramatic ones (a meteor) go higher.
    pub source_strength:    f32,
    /// Explicit range for the engine's range gate.  Replaces the stimulus
    /// strategy's base range when set.
    pub range_override:     Option<f32>,
    /// Pitch band, only consulted by audio strategies.
    pub frequency:          FrequencyBand,

    // ── Observer ──────────────────────────────────────────────────────────
    pub observer:           ObserverId,
    pub observer_info:      Option<ObserverInfo>,
    pub observer_position:  Position,

    // ── Environment snapshot ──────────────────────────────────────────────
    pub weather:            Weather,
    pub time_of_day:        TimeOfDay,

    // ── Computed ──────────────────────────────────────────────────────────
    pub distance:           f32,
    pub base_intensity:     f32,
    pub obstruction:        f32,
    pub range_modifier:     f32,
    pub clarity_modifier:   f32,
    pub final_intensity:    f32,
    pub direction:          Direction,
    pub message:            MessageBuffer,

    // ── Working buffers ───────────────────────────────────────────────────
    pub obstacles:          ObstacleList,
    pub nearby:             EntityList,

    /// System currently driving this context; set by the engine for the
    /// duration of one propagation call.
    pub active_system:      Option<SystemId>,
    /// Consult and fill the engine's result cache for this event.
    pub use_cache:          bool,
}

impl<'w> SpatialContext<'w> {
    /// Allocate a blank context bound to `host`.
    pub fn create(host: &'w dyn WorldHost) -> SpatialResult<Self> {
        Ok(Self {
            host,
            source:             Position::ORIGIN,
            source_description: String::new(),
            stimulus_type:      StimulusType::Visual,
            source_strength:    1.0,
            range_override:     None,
            frequency:          FrequencyBand::Mid,
            observer:           ObserverId::INVALID,
            observer_info:      None,
            observer_position:  Position::ORIGIN,
            weather:            Weather::Clear,
            time_of_day:        TimeOfDay::Day,
            distance:           0.0,
            base_intensity:     0.0,
            obstruction:        0.0,
            range_modifier:     1.0,
            clarity_modifier:   1.0,
            final_intensity:    0.0,
            direction:          Direction::Here,
            message:            MessageBuffer::try_new()?,
            obstacles:          Bounded::try_with_capacity("obstacle list", MAX_OBSTACLES)?,
            nearby:             Bounded::try_with_capacity("entity list", MAX_NEARBY_ENTITIES)?,
            active_system:      None,
            use_cache:          false,
        })
    }

    /// Populate source and observer in one call.  The observer is resolved
    /// first, so on error the context is left as it was.
    pub fn setup(
        &mut self,
        source:      Position,
        observer:    ObserverId,
        description: &str,
    ) -> SpatialResult<()> {
        self.set_observer(observer)?;
        self.set_source(source, description);
        Ok(())
    }

    /// Set the event origin and what it looks or sounds like.
    pub fn set_source(&mut self, source: Position, description: &str) {
        self.source = source;
        self.source_description.clear();
        self.source_description.push_str(description);
        self.update_direction();
    }

    /// Point the context at `observer`: look it up on the host, snapshot the
    /// weather at its location and the time of day, and reset every computed
    /// field.
    pub fn set_observer(&mut self, observer: ObserverId) -> SpatialResult<()> {
        if observer == ObserverId::INVALID {
            return Err(SpatialError::invalid_param("observer is required"));
        }
        let info = self
            .host
            .observer(observer)
            .ok_or_else(|| SpatialError::NotFound(format!("observer {observer}")))?;

        self.observer = observer;
        self.observer_info = Some(info);
        self.observer_position = info.position;
        self.weather = self.host.weather_at(info.position);
        self.time_of_day = self.host.time_of_day();
        self.reset_computed();
        self.update_direction();
        trace!(%observer, position = %info.position, weather = ?self.weather, "context observer set");
        Ok(())
    }

    /// Return every computed field to its neutral value.
    pub fn reset_computed(&mut self) {
        self.distance = 0.0;
        self.base_intensity = 0.0;
        self.obstruction = 0.0;
        self.range_modifier = 1.0;
        self.clarity_modifier = 1.0;
        self.final_intensity = 0.0;
        self.message.clear();
        self.obstacles.clear();
        self.nearby.clear();
        self.active_system = None;
    }

    /// Recompute the bearing from observer to source.
    #[inline]
    pub fn update_direction(&mut self) {
        self.direction = Direction::between(self.observer_position, self.source);
    }

    /// The host this context reads world state from.
    #[inline]
    pub fn host(&self) -> &'w dyn WorldHost {
        self.host
    }

    /// `true` once an observer has been set.
    #[inline]
    pub fn has_observer(&self) -> bool {
        self.observer_info.is_some()
    }

    /// Map-plane distance between source and observer.
    #[inline]
    pub fn horizontal_distance(&self) -> f32 {
        self.source.horizontal_distance_to(self.observer_position)
    }

    /// Release the context and its buffers.
    pub fn free(self) {
        trace!(observer = %self.observer, "context freed");
    }
}

impl std::fmt::Debug for SpatialContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialContext")
            .field("source", &self.source)
            .field("stimulus_type", &self.stimulus_type)
            .field("observer", &self.observer)
            .field("observer_position", &self.observer_position)
            .field("distance", &self.distance)
            .field("final_intensity", &self.final_intensity)
            .field("message", &self.message.as_str())
            .finish_non_exhaustive()
    }
}
