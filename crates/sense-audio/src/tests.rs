//! Unit tests for sense-audio.

use sense_core::{FrequencyBand, ObserverId, Position, SectorType, Weather};
use sense_strategy::SpatialContext;
use sense_world::{StaticWorld, TerrainMap, TerrainMapBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn field() -> TerrainMap {
    TerrainMapBuilder::new((-300, -300), 600, 600).build()
}

/// Field with one mountain cell at `(x, 0)`; listener 0 at the origin.
fn ridge_at(x: i32) -> StaticWorld {
    let terrain = TerrainMapBuilder::new((-300, -300), 600, 600)
        .cell(x, 0, SectorType::Mountain, 0)
        .build();
    let mut world = StaticWorld::new(terrain);
    world.place_player(0, 0);
    world
}

fn listen<'w>(world: &'w StaticWorld, source: Position, band: FrequencyBand) -> SpatialContext<'w> {
    let mut ctx = SpatialContext::create(world).unwrap();
    ctx.setup(source, ObserverId(0), "a horn").unwrap();
    ctx.frequency = band;
    ctx.distance = crate::audio_distance(ctx.source, ctx.observer_position);
    ctx
}

// ── Stimulus ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stimulus_tests {
    use sense_core::{Direction, ErrorKind, Posture};
    use sense_strategy::Stimulus;

    use super::*;
    use crate::{audio_distance, AudioStimulus, AudioTier};

    #[test]
    fn vertical_separation_counts_a_quarter() {
        let o = Position::ORIGIN;
        assert_eq!(audio_distance(o, Position::new(3, 4, 0)), 5.0);
        assert_eq!(audio_distance(o, Position::new(0, 0, 40)), 10.0);
        // Integer division truncates toward zero.
        assert_eq!(audio_distance(o, Position::new(0, 0, 7)), 1.0);
        assert_eq!(audio_distance(o, Position::new(0, 0, -7)), 1.0);
    }

    #[test]
    fn falloff_at_twenty_cells() {
        let low = AudioStimulus::falloff(20.0, FrequencyBand::Low);
        let mid = AudioStimulus::falloff(20.0, FrequencyBand::Mid);
        let high = AudioStimulus::falloff(20.0, FrequencyBand::High);
        assert!((low - 0.2521).abs() < 1e-3, "low {low}");
        assert!((mid - 0.0258).abs() < 1e-3, "mid {mid}");
        assert!(high < mid);
        // Low carries where mid does not.
        assert!(low > 0.1 && mid < 0.1);
    }

    #[test]
    fn coincident_is_full_strength() {
        for band in [FrequencyBand::Low, FrequencyBand::Mid, FrequencyBand::High] {
            assert_eq!(AudioStimulus::falloff(0.0, band), 1.0);
        }
    }

    #[test]
    fn falloff_is_monotonic_per_band() {
        for band in [FrequencyBand::Low, FrequencyBand::Mid, FrequencyBand::High] {
            let mut prev = f32::INFINITY;
            for d in 0..=300 {
                let f = AudioStimulus::falloff(d as f32, band);
                assert!(f <= prev, "{band:?} rose at d={d}");
                prev = f;
            }
        }
    }

    #[test]
    fn low_band_reaches_further() {
        let world = ridge_at(1000);
        let low = listen(&world, Position::new(0, 10, 0), FrequencyBand::Low);
        let mid = listen(&world, Position::new(0, 10, 0), FrequencyBand::Mid);
        assert_eq!(AudioStimulus.base_range(&low), 3000.0);
        assert_eq!(AudioStimulus.base_range(&mid), 1500.0);
    }

    #[test]
    fn tiers_and_phrasing() {
        assert_eq!(AudioTier::from_intensity(0.9), AudioTier::Clear);
        assert_eq!(AudioTier::from_intensity(0.5), AudioTier::Distant);
        assert_eq!(AudioTier::from_intensity(0.35), AudioTier::Muffled);
        assert_eq!(AudioTier::from_intensity(0.15), AudioTier::Echo);
        assert_eq!(AudioTier::from_intensity(0.06), AudioTier::Faint);
        assert_eq!(AudioTier::from_intensity(0.01), AudioTier::Rumble);

        assert_eq!(AudioTier::Clear.render("a bell", Direction::North), "You hear a bell from the north.");
        assert_eq!(AudioTier::Distant.render("a bell", Direction::Here), "You hear a bell.");
        assert_eq!(
            AudioTier::Muffled.render("drums", Direction::Below),
            "You hear the muffled sound of drums from below."
        );
        assert_eq!(
            AudioTier::Echo.render("a shout", Direction::West),
            "An echo of a shout reaches you from the west."
        );
        assert_eq!(AudioTier::Faint.render("a song", Direction::Nearby), "You faintly hear a song nearby.");
        assert_eq!(AudioTier::Rumble.render("x", Direction::Here), "You hear a low rumble nearby.");
        assert_eq!(AudioTier::Rumble.render("x", Direction::SouthEast), "You hear a low rumble from the southeast.");
    }

    #[test]
    fn missing_description_is_invalid() {
        let world = ridge_at(1000);
        let mut ctx = listen(&world, Position::new(0, 10, 0), FrequencyBand::Mid);
        ctx.source_description.clear();
        let err = AudioStimulus.generate_base_message(&mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);
    }

    #[test]
    fn unconscious_listeners_skipped() {
        let mut world = ridge_at(1000);
        let sleeper = world.place_player(5, 5);
        let stunned = world.place_player(6, 6);
        world.observer_mut(sleeper).unwrap().posture = Posture::Sleeping;
        world.observer_mut(stunned).unwrap().posture = Posture::Stunned;

        let mut ctx = SpatialContext::create(&world).unwrap();
        ctx.set_source(Position::new(0, 10, 0), "a horn");
        ctx.set_observer(sleeper).unwrap();
        assert!(AudioStimulus.should_process_observer(&ctx));
        ctx.set_observer(stunned).unwrap();
        assert!(!AudioStimulus.should_process_observer(&ctx));
    }
}

// ── Line of sound ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod los_tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use sense_core::StimulusType;
    use sense_strategy::LineOfSight;

    use super::*;
    use crate::AcousticLos;

    #[test]
    fn mountain_in_middle_partially_obstructs() {
        let world = ridge_at(50);
        let ctx = listen(&world, Position::new(100, 0, 0), FrequencyBand::Mid);
        let o = AcousticLos.calculate_obstruction(&ctx).unwrap();
        assert!((o - 0.42).abs() < 1e-6, "got {o}");
        assert!(o < 1.0);
        assert!(!AcousticLos::has_line_of_sound(&ctx));
    }

    #[test]
    fn mountain_near_either_end_is_heard_around() {
        for x in [10, 30, 70, 90] {
            let world = ridge_at(x);
            let ctx = listen(&world, Position::new(100, 0, 0), FrequencyBand::Mid);
            assert_eq!(AcousticLos.calculate_obstruction(&ctx).unwrap(), 0.0, "mountain at {x}");
        }
    }

    #[test]
    fn coincident_is_unobstructed() {
        let world = ridge_at(0);
        let ctx = listen(&world, Position::ORIGIN, FrequencyBand::Low);
        assert_eq!(AcousticLos.calculate_obstruction(&ctx).unwrap(), 0.0);
    }

    #[test]
    fn transmission_predicate() {
        assert!(AcousticLos.can_transmit_through(SectorType::Forest, StimulusType::Audio));
        assert!(!AcousticLos.can_transmit_through(SectorType::Mountain, StimulusType::Audio));
        assert!(!AcousticLos.can_transmit_through(SectorType::UnderdarkNoGround, StimulusType::Audio));
        assert!(!AcousticLos.can_transmit_through(SectorType::Field, StimulusType::Visual));
    }

    #[test]
    fn obstruction_in_unit_range_on_random_terrain() {
        let terrain = TerrainMapBuilder::new((-60, -60), 120, 120)
            .scatter(SectorType::Mountain, 0.15, 11)
            .scatter(SectorType::Forest, 0.2, 12)
            .build();
        let mut world = StaticWorld::new(terrain);
        world.place_player(0, 0);
        let mut rng = SmallRng::seed_from_u64(99);
        let mut ctx = SpatialContext::create(&world).unwrap();
        for _ in 0..300 {
            let source = Position::new(rng.gen_range(-60..60), rng.gen_range(-60..60), 0);
            ctx.setup(source, ObserverId(0), "a horn").unwrap();
            let o = AcousticLos.calculate_obstruction(&ctx).unwrap();
            assert!((0.0..=1.0).contains(&o), "obstruction {o} from {source}");
        }
    }

    #[test]
    fn blocking_elements_lists_middle_mountains() {
        let world = ridge_at(50);
        let mut ctx = listen(&world, Position::new(100, 0, 0), FrequencyBand::Mid);
        assert_eq!(AcousticLos.blocking_elements(&mut ctx).unwrap(), 1);
        assert_eq!(ctx.obstacles.as_slice()[0].x, 50);

        let world = ridge_at(10);
        let mut ctx = listen(&world, Position::new(100, 0, 0), FrequencyBand::Mid);
        assert_eq!(AcousticLos.blocking_elements(&mut ctx).unwrap(), 0);
    }
}

// ── Modifier ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod modifier_tests {
    use sense_strategy::{EnvironmentalModifiers, Modifier};

    use super::*;
    use crate::{elevation_effect, sector_audio_factor, AudioWeatherModifier};

    fn world_with(terrain: TerrainMap, weather: Weather) -> StaticWorld {
        let mut world = StaticWorld::new(terrain).with_weather(weather);
        world.place_player(0, 0);
        world
    }

    fn modifiers(world: &StaticWorld, source: Position) -> EnvironmentalModifiers {
        let ctx = listen(world, source, FrequencyBand::Mid);
        AudioWeatherModifier.apply_environmental_modifiers(&ctx).unwrap()
    }

    #[test]
    fn sector_factors() {
        assert_eq!(sector_audio_factor(SectorType::Forest), 0.7);
        assert_eq!(sector_audio_factor(SectorType::Hills), 1.3);
        assert_eq!(sector_audio_factor(SectorType::Ocean), 1.1);
        assert_eq!(sector_audio_factor(SectorType::UnderdarkWild), 0.5);
        assert_eq!(sector_audio_factor(SectorType::Desert), 1.0);
    }

    #[test]
    fn downhill_helps_uphill_hurts() {
        assert_eq!(elevation_effect(0, 0), 1.0);
        assert!((elevation_effect(0, 20) - 1.2).abs() < 1e-6);
        assert!((elevation_effect(20, 0) - 0.9).abs() < 1e-6);
        assert_eq!(elevation_effect(500, 0), 0.0);
    }

    #[test]
    fn clear_field_is_neutral() {
        let world = world_with(field(), Weather::Clear);
        assert_eq!(modifiers(&world, Position::new(0, 40, 0)), EnvironmentalModifiers::NEUTRAL);
    }

    #[test]
    fn terrain_factors_average() {
        let terrain = TerrainMapBuilder::new((-300, -300), 600, 600)
            .cell(0, 0, SectorType::Forest, 0)
            .cell(0, 40, SectorType::Hills, 0)
            .build();
        let world = world_with(terrain, Weather::Clear);
        let m = modifiers(&world, Position::new(0, 40, 0));
        assert!((m.range - 1.0).abs() < 1e-6, "got {m:?}");
    }

    #[test]
    fn source_on_a_hill_carries() {
        let terrain = TerrainMapBuilder::new((-300, -300), 600, 600)
            .elevation_rect((-5, 35), (5, 45), 30)
            .build();
        let world = world_with(terrain, Weather::Cloudy);
        let m = modifiers(&world, Position::new(0, 40, 30));
        assert!((m.range - 1.3 * 1.1).abs() < 1e-5, "got {m:?}");
        assert!((m.clarity - 0.95).abs() < 1e-6);
    }

    #[test]
    fn storm_suppresses() {
        let world = world_with(field(), Weather::Storm);
        let m = modifiers(&world, Position::new(0, 40, 0));
        assert!((m.range - 0.4).abs() < 1e-6);
        assert!((m.clarity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn interference_by_weather() {
        let world = world_with(field(), Weather::Storm);
        let ctx = listen(&world, Position::new(0, 40, 0), FrequencyBand::Mid);
        assert_eq!(AudioWeatherModifier.calculate_interference(&ctx).unwrap(), 0.8);
        let world = world_with(field(), Weather::Foggy);
        let ctx = listen(&world, Position::new(0, 40, 0), FrequencyBand::Mid);
        assert_eq!(AudioWeatherModifier.calculate_interference(&ctx).unwrap(), 0.0);
    }

    #[test]
    fn rain_and_storm_add_a_clause() {
        let world = world_with(field(), Weather::Rainy);
        let mut ctx = listen(&world, Position::new(0, 40, 0), FrequencyBand::Mid);
        ctx.message.set("You hear a horn from the north.");
        AudioWeatherModifier.modify_message(&mut ctx).unwrap();
        assert_eq!(ctx.message.as_str(), "You hear a horn from the north, muffled by the rain.");

        let world = world_with(field(), Weather::Storm);
        let mut ctx = listen(&world, Position::new(0, 40, 0), FrequencyBand::Mid);
        ctx.message.set("You faintly hear a horn.");
        AudioWeatherModifier.modify_message(&mut ctx).unwrap();
        assert_eq!(ctx.message.as_str(), "You faintly hear a horn, barely audible over the storm.");

        let world = world_with(field(), Weather::Foggy);
        let mut ctx = listen(&world, Position::new(0, 40, 0), FrequencyBand::Mid);
        ctx.message.set("You hear a horn.");
        AudioWeatherModifier.modify_message(&mut ctx).unwrap();
        assert_eq!(ctx.message.as_str(), "You hear a horn.");
    }
}

// ── Cross-sense geometry ──────────────────────────────────────────────────────

#[cfg(test)]
mod geometry_tests {
    use sense_core::StimulusType;
    use sense_strategy::LineOfSight;
    use sense_visual::PhysicalLos;

    use super::*;
    use crate::AcousticLos;

    /// The same ridge blocks sight outright but only muffles sound.
    #[test]
    fn ridge_blocks_sight_but_not_sound() {
        let world = ridge_at(50);
        let ctx = listen(&world, Position::new(100, 0, 0), FrequencyBand::Mid);
        let mid = world.terrain().sector(50, 0);

        assert!(!PhysicalLos.can_transmit_through(mid, StimulusType::Visual));
        let sound = AcousticLos.calculate_obstruction(&ctx).unwrap();
        assert!(sound > 0.0 && sound < 1.0);
    }
}
