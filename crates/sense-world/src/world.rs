//! `StaticWorld` — an in-memory [`WorldHost`].

use tracing::debug;

use sense_core::{
    ObserverId, ObserverInfo, Position, SectorType, TimeOfDay, Weather, WorldHost,
};

use crate::{ObserverIndex, TerrainMap};

/// A terrain map, one global weather state, a sun, and a population of
/// observers indexed by position.
///
/// Observer handles are dense: the `n`-th observer added gets
/// `ObserverId(n)`.
pub struct StaticWorld {
    terrain:     TerrainMap,
    weather:     Weather,
    time_of_day: TimeOfDay,
    observers:   Vec<ObserverInfo>,
    index:       ObserverIndex,
}

impl StaticWorld {
    pub fn new(terrain: TerrainMap) -> Self {
        Self {
            terrain,
            weather:     Weather::Clear,
            time_of_day: TimeOfDay::Day,
            observers:   Vec::new(),
            index:       ObserverIndex::new(),
        }
    }

    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    pub fn set_time_of_day(&mut self, time_of_day: TimeOfDay) {
        self.time_of_day = time_of_day;
    }

    /// Register an observer and return its handle.
    pub fn add_observer(&mut self, info: ObserverInfo) -> ObserverId {
        let id = ObserverId(self.observers.len() as u32);
        self.observers.push(info);
        self.index.insert(id, info.position);
        debug!(%id, position = %info.position, kind = ?info.kind, "observer added");
        id
    }

    /// Add a standing, connected, outdoor player at `(x, y)`, standing on
    /// the ground (its `z` is the terrain elevation there).
    pub fn place_player(&mut self, x: i32, y: i32) -> ObserverId {
        let z = self.terrain.elevation(x, y);
        self.add_observer(ObserverInfo::player_at(Position::new(x, y, z)))
    }

    /// Move an existing observer.  Returns `false` for an unknown handle.
    pub fn move_observer(&mut self, id: ObserverId, to: Position) -> bool {
        let Some(info) = self.observers.get_mut(id.index()) else {
            return false;
        };
        self.index.remove(id, info.position);
        info.position = to;
        self.index.insert(id, to);
        true
    }

    /// Mutable access for changing posture, kind or connection state.
    /// Use [`move_observer`](Self::move_observer) to change position.
    pub fn observer_mut(&mut self, id: ObserverId) -> Option<&mut ObserverInfo> {
        self.observers.get_mut(id.index())
    }

    /// Every observer handle, in id order.
    pub fn observer_ids(&self) -> impl Iterator<Item = ObserverId> + '_ {
        (0..self.observers.len() as u32).map(ObserverId)
    }

    /// Observers within `radius` cells of `center` on the map plane.
    pub fn observers_within(&self, center: Position, radius: u32) -> Vec<ObserverId> {
        self.index.within_radius(center, radius)
    }

    /// Every connected player standing outdoors: the usual audience for a
    /// wilderness-wide event.
    pub fn outdoor_players(&self) -> Vec<ObserverId> {
        self.observers
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_player() && o.connected && o.outdoors)
            .map(|(i, _)| ObserverId(i as u32))
            .collect()
    }

    pub fn terrain(&self) -> &TerrainMap {
        &self.terrain
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl WorldHost for StaticWorld {
    fn observer(&self, id: ObserverId) -> Option<ObserverInfo> {
        self.observers.get(id.index()).copied()
    }

    fn weather_at(&self, _pos: Position) -> Weather {
        self.weather
    }

    fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    fn terrain_at(&self, x: i32, y: i32) -> SectorType {
        self.terrain.sector(x, y)
    }

    fn elevation_at(&self, x: i32, y: i32) -> i32 {
        self.terrain.elevation(x, y)
    }
}
