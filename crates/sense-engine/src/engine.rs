//! The `Engine`: owned process-wide state with an explicit lifecycle.

use std::sync::Arc;
use std::time::Instant;

use sense_core::{SpatialError, SpatialResult, SystemId, Tick, WorldHost};
use sense_strategy::{LineOfSight, Modifier, Sense, SpatialContext, Stimulus};
use tracing::{debug, info, warn};

use crate::pipeline::propagate;
use crate::{CacheConfig, CacheKey, CacheStats, CachedResult, EngineConfig, Registry, ResultCache, System};

// ── EngineStats ───────────────────────────────────────────────────────────────

/// Engine-wide counters.  Only successful propagations are counted.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineStats {
    pub total_processed:     u64,
    pub successful:          u64,
    pub total_processing_ms: f64,
}

impl EngineStats {
    fn record_success(&mut self, sample_ms: f64) {
        self.total_processed += 1;
        self.successful += 1;
        self.total_processing_ms += sample_ms;
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Registry, configuration, counters and result cache for one host process.
///
/// Constructed by [`Engine::init`] and consumed by [`Engine::shutdown`].
/// The engine is single-owner; a host that shares it across threads wraps
/// it in a `Mutex`.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = Engine::init(EngineConfig::default())?;
/// let visual = engine.register_sense(sense_visual::sense())?;
///
/// let mut ctx = engine.create_context(&world)?;
/// ctx.setup(source, observer, "a merchant ship")?;
/// match engine.process_stimulus(&mut ctx, visual) {
///     Ok(()) => sink.deliver(observer, ctx.message.as_str()),
///     Err(e) if e.is_below_threshold() => {}
///     Err(e) => warn!(%e, "visual propagation failed"),
/// }
/// ctx.free();
/// ```
#[derive(Debug)]
pub struct Engine {
    config:   EngineConfig,
    registry: Registry,
    cache:    ResultCache,
    stats:    EngineStats,
    tick:     Tick,
}

impl Engine {
    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Validate `config` and build an engine with an empty registry.
    pub fn init(config: EngineConfig) -> SpatialResult<Self> {
        config.validate()?;
        let registry = Registry::with_capacity(config.max_systems)?;
        let cache = ResultCache::new(&config.cache);
        info!(
            enabled = config.enabled,
            debug = config.debug,
            max_systems = config.max_systems,
            cache = config.cache.enabled,
            "sense engine initialized"
        );
        Ok(Self { config, registry, cache, stats: EngineStats::default(), tick: Tick::ZERO })
    }

    /// Tear the engine down and return the final counters.
    pub fn shutdown(self) -> EngineStats {
        info!(
            systems = self.registry.len(),
            total_processed = self.stats.total_processed,
            successful = self.stats.successful,
            "sense engine shut down"
        );
        self.stats
    }

    #[inline] pub fn config(&self) -> &EngineConfig { &self.config }
    #[inline] pub fn is_enabled(&self) -> bool { self.config.enabled }
    #[inline] pub fn is_debug(&self) -> bool { self.config.debug }

    pub fn set_enabled(&mut self, enabled: bool) {
        info!(enabled, "sense engine switched");
        self.config.enabled = enabled;
    }

    /// Toggle the per-stage trace.
    pub fn set_debug(&mut self, debug: bool) {
        let value = debug;
        info!(debug = value, "sense engine debug trace");
        self.config.debug = debug;
    }

    // ── Registry ──────────────────────────────────────────────────────────

    /// Register a bundled sense.  See [`Registry::register`] for errors.
    pub fn register_sense(&mut self, sense: Sense) -> SpatialResult<SystemId> {
        self.registry.register(sense)
    }

    /// Register a system assembled from individual strategies.
    pub fn register_system(
        &mut self,
        name:     &str,
        stimulus: Arc<dyn Stimulus>,
        los:      Arc<dyn LineOfSight>,
        modifier: Arc<dyn Modifier>,
    ) -> SpatialResult<SystemId> {
        self.registry.register(Sense::new(name, stimulus, los, modifier))
    }

    pub fn find_system(&self, name: &str) -> Option<&System> {
        self.registry.find(name)
    }

    pub fn find_system_mut(&mut self, name: &str) -> Option<&mut System> {
        self.registry.find_mut(name)
    }

    pub fn system(&self, id: SystemId) -> Option<&System> {
        self.registry.get(id)
    }

    pub fn system_mut(&mut self, id: SystemId) -> Option<&mut System> {
        self.registry.get_mut(id)
    }

    /// Remove a system.  Results cached for it are dropped too.
    pub fn unregister_system(&mut self, name: &str) -> SpatialResult<()> {
        self.registry.unregister(name)?;
        self.cache.clear();
        Ok(())
    }

    /// All systems in registration order.
    pub fn list_systems(&self) -> &[System] {
        self.registry.list()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ── Per-event API ─────────────────────────────────────────────────────

    /// Allocate a context bound to `host`, opted into the result cache when
    /// the cache is on.
    pub fn create_context<'w>(&self, host: &'w dyn WorldHost) -> SpatialResult<SpatialContext<'w>> {
        let mut ctx = SpatialContext::create(host)?;
        ctx.use_cache = self.config.cache.enabled;
        Ok(ctx)
    }

    /// Propagate the event in `ctx` to its observer through one system.
    ///
    /// On `Ok` the rendered text is in `ctx.message`.  Otherwise the message
    /// holds whatever an earlier call left there and must not be delivered.
    ///
    /// # Errors
    ///
    /// - `InvalidParam` if the context has no observer.
    /// - `NotFound` if `system` is not registered.
    /// - `Disabled` if the engine or the system is switched off.
    /// - `BelowThreshold` if nothing perceptible reaches the observer.
    /// - `Stimulus`, `Los` or `Modifiers` if a strategy stage failed.
    pub fn process_stimulus(&mut self, ctx: &mut SpatialContext<'_>, system: SystemId) -> SpatialResult<()> {
        if !ctx.has_observer() {
            return Err(SpatialError::invalid_param("context has no observer"));
        }
        let sys = self
            .registry
            .get(system)
            .ok_or_else(|| SpatialError::NotFound(format!("system {system}")))?;
        if !self.config.enabled {
            return Err(SpatialError::Disabled("sense engine".to_owned()));
        }
        if !sys.is_enabled() {
            return Err(SpatialError::Disabled(format!("system {:?}", sys.name())));
        }

        let start = Instant::now();
        let cache = self.config.cache.enabled.then_some((&mut self.cache, self.tick));
        propagate(sys, ctx, &self.config, cache)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.stats.record_success(elapsed_ms);
        if let Some(sys) = self.registry.get_mut(system) {
            sys.stats.record_success(elapsed_ms);
        }
        Ok(())
    }

    /// [`process_stimulus`](Self::process_stimulus) by system name.
    pub fn process_named(&mut self, ctx: &mut SpatialContext<'_>, name: &str) -> SpatialResult<()> {
        let id = self
            .registry
            .find(name)
            .map(System::id)
            .ok_or_else(|| SpatialError::NotFound(format!("system {name:?}")))?;
        self.process_stimulus(ctx, id)
    }

    /// Run `systems` in order against the same context and count successes.
    ///
    /// Disabled systems are skipped.  A failure in one system never stops
    /// the others; note that each run overwrites the context's computed
    /// fields and message.
    pub fn process_all_systems(&mut self, ctx: &mut SpatialContext<'_>, systems: &[SystemId]) -> usize {
        let mut processed = 0;
        for &id in systems {
            if self.registry.get(id).is_some_and(|s| !s.is_enabled()) {
                continue;
            }
            match self.process_stimulus(ctx, id) {
                Ok(()) => {
                    processed += 1;
                    if self.config.debug {
                        debug!(system = %id, message = ctx.message.as_str(), "batch delivery");
                    }
                }
                Err(e) if e.is_below_threshold() => {
                    if self.config.debug {
                        debug!(system = %id, %e, "batch: imperceptible");
                    }
                }
                Err(e) => warn!(system = %id, %e, "batch: propagation failed"),
            }
        }
        processed
    }

    /// [`process_all_systems`](Self::process_all_systems) over every enabled
    /// system in registration order.
    pub fn process_all_registered(&mut self, ctx: &mut SpatialContext<'_>) -> usize {
        let ids = self.registry.enabled_ids();
        self.process_all_systems(ctx, &ids)
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    #[inline]
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Zero engine, system and cache counters.
    pub fn reset_stats(&mut self) {
        self.stats = EngineStats::default();
        for system in self.registry.iter_mut() {
            system.reset_stats();
        }
        self.cache.reset_stats();
    }

    // ── Ticks and result cache ────────────────────────────────────────────

    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Move to the next host tick and drop cache entries that went stale.
    pub fn advance_tick(&mut self) -> Tick {
        self.set_tick(self.tick + 1);
        self.tick
    }

    pub fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
        if self.config.cache.enabled {
            self.cache.expire(tick);
        }
    }

    /// Switch the result cache on with `config`, discarding any prior
    /// contents.
    pub fn init_cache(&mut self, config: CacheConfig) -> SpatialResult<()> {
        let config = CacheConfig { enabled: true, ..config };
        if config.capacity == 0 {
            return Err(SpatialError::invalid_param("cache capacity must be non-zero"));
        }
        self.cache = ResultCache::new(&config);
        info!(capacity = config.capacity, ttl_ticks = config.ttl_ticks, "result cache enabled");
        self.config.cache = config;
        Ok(())
    }

    /// Switch the result cache off and drop its contents.
    pub fn disable_cache(&mut self) {
        self.config.cache.enabled = false;
        self.cache.clear();
    }

    /// The cached result for `ctx` under `system`, if one is fresh.
    ///
    /// Fails with `NotImplemented` while the cache is off and `NotFound` for
    /// an unregistered system.
    pub fn cached_result(&self, ctx: &SpatialContext<'_>, system: SystemId) -> SpatialResult<Option<CachedResult>> {
        if !self.config.cache.enabled {
            return Err(SpatialError::NotImplemented("result cache"));
        }
        let sys = self
            .registry
            .get(system)
            .ok_or_else(|| SpatialError::NotFound(format!("system {system}")))?;
        Ok(self.cache.peek(&CacheKey::for_context(ctx, sys), self.tick))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
