//! Registered systems and the registry that owns them.

use std::fmt;
use std::sync::Arc;

use sense_core::{SpatialError, SpatialResult, StimulusType, SystemId};
use sense_strategy::{LineOfSight, Modifier, Sense, Stimulus};
use tracing::info;

// ── SystemStats ───────────────────────────────────────────────────────────────

/// Per-system counters.  Only successful propagations are counted.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemStats {
    pub total_processed:   u64,
    pub successful:        u64,
    /// Running mean of wall-clock processing time per success.
    pub avg_processing_ms: f64,
}

impl SystemStats {
    /// Fold one successful propagation that took `sample_ms` into the stats.
    pub(crate) fn record_success(&mut self, sample_ms: f64) {
        self.total_processed += 1;
        self.successful += 1;
        let n = self.total_processed as f64;
        self.avg_processing_ms = (self.avg_processing_ms * (n - 1.0) + sample_ms) / n;
    }
}

// ── System ────────────────────────────────────────────────────────────────────

/// A sense as registered with the engine: its strategies plus switches,
/// multipliers and counters.
pub struct System {
    id:       SystemId,
    name:     String,
    stimulus: Arc<dyn Stimulus>,
    los:      Arc<dyn LineOfSight>,
    modifier: Arc<dyn Modifier>,
    enabled:  bool,

    /// Scales the stimulus base range in the engine's range gate.
    pub range_multiplier:     f32,
    /// Scales the composed final intensity.
    pub intensity_multiplier: f32,

    pub(crate) stats: SystemStats,
}

impl System {
    fn new(id: SystemId, sense: Sense) -> Self {
        Self {
            id,
            name:                 sense.name,
            stimulus:             sense.stimulus,
            los:                  sense.los,
            modifier:             sense.modifier,
            enabled:              true,
            range_multiplier:     1.0,
            intensity_multiplier: 1.0,
            stats:                SystemStats::default(),
        }
    }

    #[inline] pub fn id(&self) -> SystemId { self.id }
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn stimulus(&self) -> &dyn Stimulus { self.stimulus.as_ref() }
    #[inline] pub fn los(&self) -> &dyn LineOfSight { self.los.as_ref() }
    #[inline] pub fn modifier(&self) -> &dyn Modifier { self.modifier.as_ref() }
    #[inline] pub fn is_enabled(&self) -> bool { self.enabled }
    #[inline] pub fn stats(&self) -> SystemStats { self.stats }

    /// The sense this system propagates.
    #[inline]
    pub fn stimulus_type(&self) -> StimulusType {
        self.stimulus.stimulus_type()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Zero the counters.
    pub fn reset_stats(&mut self) {
        self.stats = SystemStats::default();
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("stimulus", &self.stimulus.name())
            .field("los", &self.los.name())
            .field("modifier", &self.modifier.name())
            .field("enabled", &self.enabled)
            .field("range_multiplier", &self.range_multiplier)
            .field("intensity_multiplier", &self.intensity_multiplier)
            .field("stats", &self.stats)
            .finish()
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Bounded list of systems in registration order.
///
/// Lookups are linear; a registry holds a handful of senses.
#[derive(Debug)]
pub struct Registry {
    systems:  Vec<System>,
    capacity: usize,
    next_id:  u16,
}

impl Registry {
    /// Create an empty registry, reserving room for `capacity` systems up
    /// front.  Allocation failure is reported as `Memory`.
    pub fn with_capacity(capacity: usize) -> SpatialResult<Self> {
        let mut systems = Vec::new();
        systems
            .try_reserve_exact(capacity)
            .map_err(|e| SpatialError::Memory(format!("system registry: {e}")))?;
        Ok(Self { systems, capacity, next_id: 0 })
    }

    /// Register `sense` as a new system and return its id.
    ///
    /// # Errors
    ///
    /// - `InvalidParam` if the name is empty or already taken, or if the LOS
    ///   or modifier strategy does not support the stimulus type.
    /// - `Capacity` if the registry is full.
    pub fn register(&mut self, sense: Sense) -> SpatialResult<SystemId> {
        if sense.name.is_empty() {
            return Err(SpatialError::invalid_param("system name is empty"));
        }
        if self.find(&sense.name).is_some() {
            return Err(SpatialError::invalid_param(format!(
                "system {:?} is already registered",
                sense.name
            )));
        }
        if self.is_full() {
            return Err(SpatialError::Capacity { what: "system registry", capacity: self.capacity });
        }

        let stimulus_type = sense.stimulus.stimulus_type();
        if !sense.los.supported().contains(stimulus_type) {
            return Err(SpatialError::invalid_param(format!(
                "line of sight {:?} does not support {stimulus_type}",
                sense.los.name()
            )));
        }
        if !sense.modifier.supported().contains(stimulus_type) {
            return Err(SpatialError::invalid_param(format!(
                "modifier {:?} does not support {stimulus_type}",
                sense.modifier.name()
            )));
        }

        let id = SystemId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(SpatialError::Capacity { what: "system id space", capacity: usize::from(u16::MAX) })?;

        info!(%id, name = %sense.name, %stimulus_type, "system registered");
        self.systems.push(System::new(id, sense));
        Ok(id)
    }

    /// Remove the system called `name` and hand it back.
    pub fn unregister(&mut self, name: &str) -> SpatialResult<System> {
        let idx = self
            .systems
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| SpatialError::NotFound(format!("system {name:?}")))?;
        let system = self.systems.remove(idx);
        info!(id = %system.id, name, "system unregistered");
        Ok(system)
    }

    pub fn find(&self, name: &str) -> Option<&System> {
        self.systems.iter().find(|s| s.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut System> {
        self.systems.iter_mut().find(|s| s.name == name)
    }

    pub fn get(&self, id: SystemId) -> Option<&System> {
        self.systems.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SystemId) -> Option<&mut System> {
        self.systems.iter_mut().find(|s| s.id == id)
    }

    /// All systems in registration order.
    pub fn list(&self) -> &[System] {
        &self.systems
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut System> {
        self.systems.iter_mut()
    }

    /// Ids of the enabled systems in registration order.
    pub fn enabled_ids(&self) -> Vec<SystemId> {
        self.systems.iter().filter(|s| s.enabled).map(|s| s.id).collect()
    }

    #[inline] pub fn len(&self) -> usize { self.systems.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.systems.is_empty() }
    #[inline] pub fn capacity(&self) -> usize { self.capacity }
    #[inline] pub fn is_full(&self) -> bool { self.systems.len() >= self.capacity }
}
