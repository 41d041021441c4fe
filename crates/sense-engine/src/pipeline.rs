//! The propagation pipeline for one context against one system.
//!
//! ```text
//!   distance ──► range gate ──► [cache] ──► intensity ──► obstruction ──► modifiers
//!                   │              │ hit                                      │
//!              OutOfRange          └──────────────────► compose ◄────────────┘
//!                                                          │
//!                                     TooFaint ◄── threshold gate
//!                                                          │
//!                                               base message ──► modify message
//! ```
//!
//! Every stage is fail-fast.  Strategy failures are reported as the stage's
//! own error kind (`Stimulus`, `Los`, `Modifiers`) whatever the strategy
//! returned, with the strategy's error text carried along.

use sense_core::{Imperceptible, SpatialError, SpatialResult, Tick};
use sense_strategy::SpatialContext;
use tracing::debug;

use crate::{CacheKey, CachedResult, EngineConfig, ResultCache, System};

/// Run everything after validation.  Counters are the caller's business.
pub(crate) fn propagate(
    system: &System,
    ctx:    &mut SpatialContext<'_>,
    config: &EngineConfig,
    cache:  Option<(&mut ResultCache, Tick)>,
) -> SpatialResult<()> {
    let stimulus = system.stimulus();
    ctx.active_system = Some(system.id());
    ctx.stimulus_type = stimulus.stimulus_type();

    if config.debug {
        debug!(
            system = system.name(),
            source = %ctx.source,
            observer = %ctx.observer_position,
            "processing stimulus"
        );
    }

    // ── Range gate ────────────────────────────────────────────────────────
    ctx.distance = stimulus.measure_distance(ctx);
    let range = ctx.range_override.unwrap_or_else(|| stimulus.base_range(ctx)) * system.range_multiplier;
    if ctx.distance > range {
        if config.debug {
            debug!(system = system.name(), distance = ctx.distance, range, "out of range");
        }
        return Err(SpatialError::BelowThreshold(Imperceptible::OutOfRange {
            distance: ctx.distance,
            range,
        }));
    }

    // ── Strategy stages, or a cached result ───────────────────────────────
    let mut cache = cache.filter(|_| ctx.use_cache);
    let key = CacheKey::for_context(ctx, system);
    match cache.as_mut().and_then(|(c, now)| c.get(&key, *now)) {
        Some(hit) => {
            hit.restore(ctx);
            if config.debug {
                debug!(system = system.name(), final_intensity = ctx.final_intensity, "cache hit");
            }
        }
        None => {
            compose(system, ctx, config)?;
            if let Some((c, now)) = cache.as_mut() {
                c.insert(key, CachedResult::capture(ctx), *now);
            }
        }
    }

    // ── Threshold gate ────────────────────────────────────────────────────
    let threshold = config.min_threshold;
    if ctx.final_intensity.is_nan() || ctx.final_intensity <= threshold {
        if config.debug {
            debug!(system = system.name(), final_intensity = ctx.final_intensity, threshold, "too faint");
        }
        return Err(SpatialError::BelowThreshold(Imperceptible::TooFaint {
            intensity: ctx.final_intensity,
            threshold,
        }));
    }

    // ── Render ────────────────────────────────────────────────────────────
    stimulus
        .generate_base_message(ctx)
        .map_err(|e| SpatialError::Stimulus(format!("{}: {e}", stimulus.name())))?;
    let modifier = system.modifier();
    modifier
        .modify_message(ctx)
        .map_err(|e| SpatialError::Modifiers(format!("{}: {e}", modifier.name())))?;

    if config.debug {
        debug!(system = system.name(), message = ctx.message.as_str(), "rendered");
    }
    Ok(())
}

/// Intensity, obstruction and modifiers, composed into `final_intensity`.
fn compose(system: &System, ctx: &mut SpatialContext<'_>, config: &EngineConfig) -> SpatialResult<()> {
    let stimulus = system.stimulus();
    stimulus
        .calculate_intensity(ctx)
        .and_then(|()| stimulus.apply_stimulus_effects(ctx))
        .map_err(|e| SpatialError::Stimulus(format!("{}: {e}", stimulus.name())))?;

    let los = system.los();
    let obstruction = los
        .calculate_obstruction(ctx)
        .map_err(|e| SpatialError::Los(format!("{}: {e}", los.name())))?;
    ctx.obstruction = obstruction.clamp(0.0, 1.0);

    let modifier = system.modifier();
    let modifiers = modifier
        .apply_environmental_modifiers(ctx)
        .map_err(|e| SpatialError::Modifiers(format!("{}: {e}", modifier.name())))?;
    ctx.range_modifier = modifiers.range;
    ctx.clarity_modifier = modifiers.clarity;

    ctx.final_intensity = ctx.base_intensity
        * (1.0 - ctx.obstruction)
        * ctx.range_modifier
        * system.intensity_multiplier;

    if config.debug {
        debug!(
            system = system.name(),
            base = ctx.base_intensity,
            obstruction = ctx.obstruction,
            range_modifier = ctx.range_modifier,
            clarity_modifier = ctx.clarity_modifier,
            multiplier = system.intensity_multiplier,
            final_intensity = ctx.final_intensity,
            "composed"
        );
    }
    Ok(())
}
