//! `wilderness` — world events rendered through the sense engine.
//!
//! Each entry point builds one context for the event, then broadcasts it to
//! every connected outdoor player:
//!
//! | Event            | Sense(s)        | Source                          | Strength |
//! |------------------|-----------------|---------------------------------|----------|
//! | `thunder`        | Audio (low)     | 100 units up                    | 1.0      |
//! | `shout`          | Audio (mid)     | ground                          | 1.0      |
//! | `sound_effect`   | Audio (any)     | caller's position, fixed range  | 1.0      |
//! | `ship_passing`   | Visual          | sea level                       | 1.0      |
//! | `meteor_approach`| Visual          | 20 above each watcher's ground  | 1.5      |
//! | `meteor_descent` | Visual          | 10 above each watcher's ground  | 2.0      |
//! | `meteor_impact`  | Visual + Audio  | each watcher's ground level     | 2.5      |
//!
//! Every entry point returns the number of messages delivered.

use sense_core::{
    FrequencyBand, MessageSink, Position, SpatialError, SpatialResult, SystemId,
};
use sense_engine::{Engine, EngineConfig};
use sense_strategy::SpatialContext;
use sense_visual::{elevation_range, within_elevation_range};
use sense_world::StaticWorld;
use tracing::info;


/// Height of a thunderclap above the map datum.
pub const THUNDER_ALTITUDE: i32 = 100;

/// How far above a watcher's ground an approaching meteor appears.
pub const METEOR_APPROACH_HEIGHT: i32 = 20;

/// How far above a watcher's ground a descending meteor appears.
pub const METEOR_DESCENT_HEIGHT: i32 = 10;

const METEOR_APPROACH_STRENGTH: f32 = 1.5;
const METEOR_DESCENT_STRENGTH: f32 = 2.0;
const METEOR_IMPACT_STRENGTH: f32 = 2.5;

/// An engine with the visual and audio senses registered.
pub struct Effects {
    engine: Engine,
    visual: SystemId,
    audio:  SystemId,
}

impl Effects {
    pub fn new(config: EngineConfig) -> SpatialResult<Self> {
        let mut engine = Engine::init(config)?;
        let visual = engine.register_sense(sense_visual::sense())?;
        let audio = engine.register_sense(sense_audio::sense())?;
        Ok(Self { engine, visual, audio })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn visual(&self) -> SystemId {
        self.visual
    }

    pub fn audio(&self) -> SystemId {
        self.audio
    }

    pub fn shutdown(self) {
        let stats = self.engine.shutdown();
        info!(delivered = stats.successful, "effects shut down");
    }

    // ── Audio ─────────────────────────────────────────────────────────────

    /// Thunder overhead at `(x, y)`.  Low-pitched, so it carries far.
    pub fn thunder<S>(&mut self, world: &StaticWorld, sink: &mut S, x: i32, y: i32, desc: &str) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let mut ctx = self.event(world, Position::new(x, y, THUNDER_ALTITUDE), desc)?;
        ctx.frequency = FrequencyBand::Low;
        let delivered = self.engine.broadcast(&mut ctx, self.audio, world.outdoor_players(), sink);
        ctx.free();
        info!(x, y, delivered, "thunder");
        Ok(delivered)
    }

    /// A voice at ground level.
    pub fn shout<S>(&mut self, world: &StaticWorld, sink: &mut S, x: i32, y: i32, desc: &str) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let mut ctx = self.event(world, Position::new(x, y, 0), desc)?;
        ctx.frequency = FrequencyBand::Mid;
        let delivered = self.engine.broadcast(&mut ctx, self.audio, world.outdoor_players(), sink);
        ctx.free();
        info!(x, y, delivered, "shout");
        Ok(delivered)
    }

    /// Any sound with an explicit range.  Listeners farther than `range`
    /// on the map plane are not considered at all.
    pub fn sound_effect<S>(
        &mut self,
        world:  &StaticWorld,
        sink:   &mut S,
        source: Position,
        desc:   &str,
        band:   FrequencyBand,
        range:  f32,
    ) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let mut ctx = self.event(world, source, desc)?;
        ctx.frequency = band;
        ctx.range_override = Some(range);
        let delivered = self.engine.broadcast_with(
            &mut ctx,
            &[self.audio],
            world.outdoor_players(),
            sink,
            |ctx: &mut SpatialContext<'_>| ctx.horizontal_distance() <= range,
        );
        ctx.free();
        info!(%source, delivered, "sound effect");
        Ok(delivered)
    }

    // ── Visual ────────────────────────────────────────────────────────────

    /// A ship at sea level off `(x, y)`.
    pub fn ship_passing<S>(&mut self, world: &StaticWorld, sink: &mut S, x: i32, y: i32, desc: &str) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let mut ctx = self.event(world, Position::new(x, y, 0), desc)?;
        let delivered = self.engine.broadcast(&mut ctx, self.visual, world.outdoor_players(), sink);
        ctx.free();
        info!(x, y, delivered, "ship passing");
        Ok(delivered)
    }

    /// First phase of a meteor swarm: streaks high in the sky, visible
    /// across `visual_range` (extended for watchers well below them).
    pub fn meteor_approach<S>(
        &mut self,
        world:        &StaticWorld,
        sink:         &mut S,
        x:            i32,
        y:            i32,
        desc:         &str,
        visual_range: f32,
    ) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let delivered = self.meteor_overhead(
            world,
            sink,
            (x, y),
            desc,
            visual_range,
            METEOR_APPROACH_HEIGHT,
            METEOR_APPROACH_STRENGTH,
        )?;
        info!(x, y, delivered, "meteor approach");
        Ok(delivered)
    }

    /// Second phase: the meteors drop low over the target.
    pub fn meteor_descent<S>(
        &mut self,
        world:        &StaticWorld,
        sink:         &mut S,
        x:            i32,
        y:            i32,
        desc:         &str,
        visual_range: f32,
    ) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let delivered = self.meteor_overhead(
            world,
            sink,
            (x, y),
            desc,
            visual_range,
            METEOR_DESCENT_HEIGHT,
            METEOR_DESCENT_STRENGTH,
        )?;
        info!(x, y, delivered, "meteor descent");
        Ok(delivered)
    }

    /// Final phase: the strike, seen and heard by everyone within `range`
    /// on the map plane.
    pub fn meteor_impact<S>(
        &mut self,
        world: &StaticWorld,
        sink:  &mut S,
        x:     i32,
        y:     i32,
        desc:  &str,
        range: f32,
    ) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let mut ctx = self.event(world, Position::new(x, y, 0), desc)?;
        ctx.source_strength = METEOR_IMPACT_STRENGTH;
        ctx.frequency = FrequencyBand::Low;
        let delivered = self.engine.broadcast_with(
            &mut ctx,
            &[self.visual, self.audio],
            world.outdoor_players(),
            sink,
            |ctx: &mut SpatialContext<'_>| {
                if ctx.horizontal_distance() > range {
                    return false;
                }
                // Ground level at the watcher, so distance is horizontal.
                ctx.source.z = ctx.observer_position.z;
                ctx.update_direction();
                true
            },
        );
        ctx.free();
        info!(x, y, delivered, "meteor impact");
        Ok(delivered)
    }

    // ── Shared ────────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn meteor_overhead<S>(
        &mut self,
        world:    &StaticWorld,
        sink:     &mut S,
        (x, y):   (i32, i32),
        desc:     &str,
        range:    f32,
        height:   i32,
        strength: f32,
    ) -> SpatialResult<usize>
    where
        S: MessageSink + ?Sized,
    {
        let mut ctx = self.event(world, Position::new(x, y, 0), desc)?;
        ctx.source_strength = strength;
        let delivered = self.engine.broadcast_with(
            &mut ctx,
            &[self.visual],
            world.outdoor_players(),
            sink,
            |ctx: &mut SpatialContext<'_>| {
                let ground = ctx.observer_position.z;
                ctx.source.z = ground + height;
                if !within_elevation_range(ctx.observer_position, ctx.source, range) {
                    return false;
                }
                // The gate measures in 3-D; admit everything within the
                // horizontal range at this height.
                let horizontal = elevation_range(ground, ctx.source.z, range);
                ctx.range_override = Some(horizontal.hypot(height as f32));
                ctx.update_direction();
                true
            },
        );
        ctx.free();
        Ok(delivered)
    }

    /// A context for one event at `source`.
    fn event<'w>(&self, world: &'w StaticWorld, source: Position, desc: &str) -> SpatialResult<SpatialContext<'w>> {
        if desc.is_empty() {
            return Err(SpatialError::invalid_param("event needs a description"));
        }
        let mut ctx = self.engine.create_context(world)?;
        ctx.set_source(source, desc);
        Ok(ctx)
    }
}
