//! Tick-stamped cache of pipeline results.
//!
//! A result depends on the geometry, the system and its intensity
//! multiplier, the weather and light at the observer, the pitch band and
//! the source amplitude.  All of those go
//! into the [`CacheKey`], so a hit is only ever a repeat of an identical
//! computation.  Weather is snapshotted into the key but can still drift in
//! ways the key does not see (a host may change terrain), so entries also
//! expire after a fixed number of ticks.
//!
//! With the `fx-hash` feature the map uses `rustc_hash::FxHashMap`.

use sense_core::{FrequencyBand, Position, SystemId, Tick, TimeOfDay, Weather};
use sense_strategy::SpatialContext;
use tracing::trace;

use crate::{CacheConfig, System};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

// ── Key / value ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source:      Position,
    pub observer:    Position,
    pub system:      SystemId,
    pub weather:     Weather,
    pub time_of_day: TimeOfDay,
    pub frequency:   FrequencyBand,
    /// `source_strength` by bit pattern.
    strength_bits:   u32,
    /// The system's `intensity_multiplier` by bit pattern.
    multiplier_bits: u32,
}

impl CacheKey {
    pub fn for_context(ctx: &SpatialContext<'_>, system: &System) -> Self {
        Self {
            source:          ctx.source,
            observer:        ctx.observer_position,
            system:          system.id(),
            weather:         ctx.weather,
            time_of_day:     ctx.time_of_day,
            frequency:       ctx.frequency,
            strength_bits:   ctx.source_strength.to_bits(),
            multiplier_bits: system.intensity_multiplier.to_bits(),
        }
    }
}

/// Everything the strategy stages write to the context.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CachedResult {
    pub base_intensity:   f32,
    pub obstruction:      f32,
    pub range_modifier:   f32,
    pub clarity_modifier: f32,
    pub final_intensity:  f32,
}

impl CachedResult {
    pub fn capture(ctx: &SpatialContext<'_>) -> Self {
        Self {
            base_intensity:   ctx.base_intensity,
            obstruction:      ctx.obstruction,
            range_modifier:   ctx.range_modifier,
            clarity_modifier: ctx.clarity_modifier,
            final_intensity:  ctx.final_intensity,
        }
    }

    pub fn restore(&self, ctx: &mut SpatialContext<'_>) {
        ctx.base_intensity = self.base_intensity;
        ctx.obstruction = self.obstruction;
        ctx.range_modifier = self.range_modifier;
        ctx.clarity_modifier = self.clarity_modifier;
        ctx.final_intensity = self.final_intensity;
    }
}

// ── ResultCache ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    pub hits:      u64,
    pub misses:    u64,
    pub evictions: u64,
}

#[derive(Debug)]
pub struct ResultCache {
    entries:   Map<CacheKey, (Tick, CachedResult)>,
    capacity:  usize,
    ttl_ticks: u64,
    stats:     CacheStats,
}

impl ResultCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries:   Map::default(),
            capacity:  config.capacity,
            ttl_ticks: config.ttl_ticks,
            stats:     CacheStats::default(),
        }
    }

    /// Look up `key` as of tick `now`.  Stale entries count as misses.
    pub fn get(&mut self, key: &CacheKey, now: Tick) -> Option<CachedResult> {
        match self.entries.get(key) {
            Some(&(stamp, result)) if now.since(stamp) < self.ttl_ticks => {
                self.stats.hits += 1;
                Some(result)
            }
            _ => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Read without touching the hit/miss counters.
    pub fn peek(&self, key: &CacheKey, now: Tick) -> Option<CachedResult> {
        self.entries
            .get(key)
            .filter(|(stamp, _)| now.since(*stamp) < self.ttl_ticks)
            .map(|&(_, result)| result)
    }

    /// Store `result` stamped with `now`, evicting the oldest entry if the
    /// cache is full.
    pub fn insert(&mut self, key: CacheKey, result: CachedResult, now: Tick) {
        if self.capacity == 0 {
            return;
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, (stamp, _))| *stamp)
                .map(|(k, _)| *k)
            {
                self.entries.remove(&oldest);
                self.stats.evictions += 1;
            }
        }
        self.entries.insert(key, (now, result));
    }

    /// Drop every entry that has outlived the TTL as of `now`.
    pub fn expire(&mut self, now: Tick) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl_ticks;
        self.entries.retain(|_, (stamp, _)| now.since(*stamp) < ttl);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            trace!(dropped, %now, "cache entries expired");
        }
        dropped
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    #[inline] pub fn capacity(&self) -> usize { self.capacity }
    #[inline] pub fn stats(&self) -> CacheStats { self.stats }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }
}
