//! Unit tests for sense-visual.

use sense_core::{ObserverId, Position, SectorType, TimeOfDay, Weather};
use sense_strategy::SpatialContext;
use sense_world::{StaticWorld, TerrainMapBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Open field with a three-cell mountain wall at `x = 50`, player 0 at the
/// origin.
fn walled_world(weather: Weather, time: TimeOfDay) -> StaticWorld {
    let terrain = TerrainMapBuilder::new((-200, -200), 400, 400)
        .fill_rect((50, -1), (50, 1), SectorType::Mountain)
        .build();
    let mut world = StaticWorld::new(terrain).with_weather(weather).with_time_of_day(time);
    world.place_player(0, 0);
    world
}

fn context_at<'w>(world: &'w StaticWorld, source: Position, desc: &str) -> SpatialContext<'w> {
    let mut ctx = SpatialContext::create(world).unwrap();
    ctx.setup(source, ObserverId(0), desc).unwrap();
    ctx.distance = ctx.source.distance_to(ctx.observer_position);
    ctx
}

// ── Stimulus ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stimulus_tests {
    use sense_core::{Direction, ErrorKind, ObserverInfo, ObserverKind};
    use sense_strategy::Stimulus;

    use super::*;
    use crate::{VisualStimulus, VisualTier};

    #[test]
    fn falloff_values() {
        assert_eq!(VisualStimulus::falloff(0.0), 1.0);
        assert_eq!(VisualStimulus::falloff(100.0), 0.5);
        assert!((VisualStimulus::falloff(300.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn falloff_is_monotonic() {
        let mut prev = f32::INFINITY;
        for d in (0..=1000).step_by(7) {
            let f = VisualStimulus::falloff(d as f32);
            assert!(f <= prev, "falloff rose at d={d}");
            prev = f;
        }
    }

    #[test]
    fn source_strength_scales_intensity() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        let mut ctx = context_at(&world, Position::new(0, 100, 0), "a meteor");
        ctx.source_strength = 2.0;
        VisualStimulus.calculate_intensity(&mut ctx).unwrap();
        assert_eq!(ctx.base_intensity, 1.0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(VisualTier::from_intensity(0.85), VisualTier::Clear);
        assert_eq!(VisualTier::from_intensity(0.6), VisualTier::Clear);
        assert_eq!(VisualTier::from_intensity(0.59), VisualTier::Distant);
        assert_eq!(VisualTier::from_intensity(0.3), VisualTier::Obscured);
        assert_eq!(VisualTier::from_intensity(0.1), VisualTier::Silhouette);
        assert_eq!(VisualTier::from_intensity(0.05), VisualTier::Glimpse);
    }

    #[test]
    fn strong_intensity_reads_clearly() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        for source in [Position::new(0, 400, 0), Position::new(-30, -700, 0)] {
            let mut ctx = context_at(&world, source, "a tall tower");
            ctx.final_intensity = 0.85;
            VisualStimulus.generate_base_message(&mut ctx).unwrap();
            assert!(ctx.message.as_str().starts_with("You clearly see a tall tower"));
        }
    }

    #[test]
    fn faint_intensity_is_a_glimpse() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        let mut ctx = context_at(&world, Position::new(0, 400, 0), "a tall tower");
        ctx.final_intensity = 0.05;
        VisualStimulus.generate_base_message(&mut ctx).unwrap();
        assert_eq!(
            ctx.message.as_str(),
            "You catch a brief glimpse of something moving to the north."
        );
    }

    #[test]
    fn directional_phrasing() {
        assert_eq!(
            VisualTier::Distant.render("a ship", Direction::SouthEast),
            "In the distance to the southeast, you see a ship."
        );
        assert_eq!(
            VisualTier::Obscured.render("a hawk", Direction::Above),
            "Through the haze above, you make out a hawk."
        );
        assert_eq!(VisualTier::Clear.render("a fire", Direction::Here), "You clearly see a fire.");
        assert_eq!(
            VisualTier::Glimpse.render("x", Direction::Here),
            "You catch a brief glimpse of something moving nearby."
        );
    }

    #[test]
    fn missing_description_is_invalid() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        let mut ctx = context_at(&world, Position::new(0, 10, 0), "");
        let err = VisualStimulus.generate_base_message(&mut ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParam);
    }

    #[test]
    fn only_outdoor_players_look() {
        let mut world = walled_world(Weather::Clear, TimeOfDay::Day);
        let npc = world.add_observer(ObserverInfo {
            kind: ObserverKind::NonPlayer,
            ..ObserverInfo::player_at(Position::ORIGIN)
        });
        let indoors = world.place_player(3, 3);
        world.observer_mut(indoors).unwrap().outdoors = false;

        let mut ctx = SpatialContext::create(&world).unwrap();
        ctx.set_source(Position::new(0, 10, 0), "smoke");
        ctx.set_observer(ObserverId(0)).unwrap();
        assert!(VisualStimulus.should_process_observer(&ctx));
        ctx.set_observer(npc).unwrap();
        assert!(!VisualStimulus.should_process_observer(&ctx));
        ctx.set_observer(indoors).unwrap();
        assert!(!VisualStimulus.should_process_observer(&ctx));
    }
}

// ── Line of sight ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod los_tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use sense_core::StimulusType;
    use sense_strategy::LineOfSight;

    use super::*;
    use crate::{PhysicalLos, TerrainClass};

    #[test]
    fn coincident_is_unobstructed() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        let ctx = context_at(&world, Position::ORIGIN, "a spark");
        assert_eq!(ctx.distance, 0.0);
        assert_eq!(PhysicalLos.calculate_obstruction(&ctx).unwrap(), 0.0);
    }

    #[test]
    fn open_ground_is_clear() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        let ctx = context_at(&world, Position::new(0, 150, 0), "a banner");
        assert_eq!(PhysicalLos.calculate_obstruction(&ctx).unwrap(), 0.0);
    }

    #[test]
    fn mountain_at_midpoint_hard_blocks() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        let ctx = context_at(&world, Position::new(100, 0, 0), "a campfire");
        let obstruction = PhysicalLos.calculate_obstruction(&ctx).unwrap();
        assert!((obstruction - 0.8).abs() < 1e-6, "got {obstruction}");

        let mid = world.terrain().sector(50, 0);
        assert!(!PhysicalLos.can_transmit_through(mid, StimulusType::Visual));
        assert!(PhysicalLos.can_transmit_through(SectorType::Forest, StimulusType::Visual));
        assert!(PhysicalLos.can_transmit_through(mid, StimulusType::Audio));
    }

    #[test]
    fn weights_accumulate_and_clamp() {
        let terrain = TerrainMapBuilder::new((0, 0), 20, 1)
            .fill_rect((1, 0), (3, 0), SectorType::Forest)
            .fill_rect((4, 0), (4, 0), SectorType::Hills)
            .build();
        let mut world = StaticWorld::new(terrain);
        world.place_player(10, 0);
        let ctx = context_at(&world, Position::new(0, 0, 0), "a deer");
        let obstruction = PhysicalLos.calculate_obstruction(&ctx).unwrap();
        assert!((obstruction - 0.5).abs() < 1e-6, "got {obstruction}");

        let jungle = TerrainMapBuilder::new((0, 0), 20, 1)
            .fill_rect((0, 0), (19, 0), SectorType::Jungle)
            .build();
        let mut world = StaticWorld::new(jungle);
        world.place_player(19, 0);
        let ctx = context_at(&world, Position::new(0, 0, 0), "a deer");
        assert_eq!(PhysicalLos.calculate_obstruction(&ctx).unwrap(), 1.0);
    }

    #[test]
    fn obstruction_in_unit_range_on_random_terrain() {
        let terrain = TerrainMapBuilder::new((-60, -60), 120, 120)
            .scatter(SectorType::Forest, 0.2, 1)
            .scatter(SectorType::Jungle, 0.1, 2)
            .scatter(SectorType::Hills, 0.1, 3)
            .scatter(SectorType::Mountain, 0.05, 4)
            .scatter(SectorType::Marshland, 0.05, 5)
            .build();
        let mut world = StaticWorld::new(terrain);
        world.place_player(0, 0);
        let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
        let mut ctx = SpatialContext::create(&world).unwrap();
        for _ in 0..300 {
            let source = Position::new(rng.gen_range(-80..80), rng.gen_range(-80..80), 0);
            ctx.setup(source, ObserverId(0), "a glint").unwrap();
            let o = PhysicalLos.calculate_obstruction(&ctx).unwrap();
            assert!((0.0..=1.0).contains(&o), "obstruction {o} from {source}");
        }
        ctx.free();
    }

    #[test]
    fn blocking_elements_lists_weighted_cells() {
        let world = walled_world(Weather::Clear, TimeOfDay::Day);
        let mut ctx = context_at(&world, Position::new(100, 0, 0), "a campfire");
        assert_eq!(PhysicalLos.blocking_elements(&mut ctx).unwrap(), 1);
        let o = ctx.obstacles.as_slice()[0];
        assert_eq!((o.x, o.y, o.sector), (50, 0, SectorType::Mountain));
    }

    #[test]
    fn blocking_elements_stops_at_capacity() {
        let forest = TerrainMapBuilder::new((0, 0), 400, 1)
            .fill_rect((0, 0), (399, 0), SectorType::Forest)
            .build();
        let mut world = StaticWorld::new(forest);
        world.place_player(399, 0);
        let mut ctx = context_at(&world, Position::new(0, 0, 0), "a deer");
        let n = PhysicalLos.blocking_elements(&mut ctx).unwrap();
        assert_eq!(n, ctx.obstacles.capacity());
    }

    #[test]
    fn terrain_classes() {
        assert_eq!(TerrainClass::of(SectorType::Field), TerrainClass::Open);
        assert_eq!(TerrainClass::of(SectorType::HighMountain), TerrainClass::Mountains);
        assert_eq!(TerrainClass::of(SectorType::Marshland).weight(), 0.1);
    }
}

// ── Modifier ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod modifier_tests {
    use sense_strategy::{EnvironmentalModifiers, Modifier};

    use super::*;
    use crate::VisualWeatherModifier;

    fn modifiers(weather: Weather, time: TimeOfDay) -> EnvironmentalModifiers {
        let world = walled_world(weather, time);
        let ctx = context_at(&world, Position::new(0, 10, 0), "x");
        VisualWeatherModifier.apply_environmental_modifiers(&ctx).unwrap()
    }

    #[test]
    fn clear_day_is_neutral() {
        assert_eq!(modifiers(Weather::Clear, TimeOfDay::Day), EnvironmentalModifiers::NEUTRAL);
    }

    #[test]
    fn storm_at_night_is_worst() {
        let worst = modifiers(Weather::Storm, TimeOfDay::Dark);
        assert!((worst.range - 0.06).abs() < 1e-6);
        assert!((worst.clarity - 0.15).abs() < 1e-6);
        for w in Weather::ALL {
            for t in [TimeOfDay::Day, TimeOfDay::Dawn, TimeOfDay::Dusk, TimeOfDay::Dark] {
                let m = modifiers(w, t);
                assert!(m.range >= worst.range && m.clarity >= worst.clarity);
            }
        }
    }

    #[test]
    fn interference_by_weather() {
        let world = walled_world(Weather::Foggy, TimeOfDay::Day);
        let ctx = context_at(&world, Position::new(0, 10, 0), "x");
        assert_eq!(VisualWeatherModifier.calculate_interference(&ctx).unwrap(), 0.5);
        let world = walled_world(Weather::Cloudy, TimeOfDay::Day);
        let ctx = context_at(&world, Position::new(0, 10, 0), "x");
        assert_eq!(VisualWeatherModifier.calculate_interference(&ctx).unwrap(), 0.0);
    }

    fn framed(weather: Weather, time: TimeOfDay, message: &str) -> String {
        let world = walled_world(weather, time);
        let mut ctx = context_at(&world, Position::new(0, 10, 0), "x");
        ctx.message.set(message);
        VisualWeatherModifier.modify_message(&mut ctx).unwrap();
        ctx.message.as_str().to_owned()
    }

    #[test]
    fn fog_rephrases_clear_sight() {
        assert_eq!(
            framed(Weather::Foggy, TimeOfDay::Day, "You clearly see a tower to the north."),
            "Through the thick fog, you make out a tower to the north."
        );
    }

    #[test]
    fn rain_rephrases_plain_sight() {
        assert_eq!(
            framed(Weather::Rainy, TimeOfDay::Dark, "You see a lantern."),
            "Through the rain, you glimpse a lantern."
        );
    }

    #[test]
    fn darkness_lowercases_other_openings() {
        assert_eq!(
            framed(Weather::Clear, TimeOfDay::Dark, "Somewhere to the west, you glimpse the silhouette of a rider."),
            "In the darkness, somewhere to the west, you glimpse the silhouette of a rider."
        );
        assert_eq!(
            framed(Weather::Cloudy, TimeOfDay::Dark, "You catch a brief glimpse of something moving nearby."),
            "In the darkness, you catch a brief glimpse of something moving nearby."
        );
    }

    #[test]
    fn clear_day_leaves_message() {
        assert_eq!(framed(Weather::Clear, TimeOfDay::Dusk, "You see a ship."), "You see a ship.");
    }
}

// ── Elevation ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod elevation_tests {
    use super::*;
    use crate::{elevation_range, within_elevation_range};

    #[test]
    fn small_difference_keeps_range() {
        assert_eq!(elevation_range(0, 50, 1000.0), 1000.0);
        assert_eq!(elevation_range(100, 60, 1000.0), 1000.0);
    }

    #[test]
    fn bonus_grows_then_caps() {
        assert!((elevation_range(0, 100, 1000.0) - 1500.0).abs() < 1e-3);
        assert!((elevation_range(300, 140, 1000.0) - 1800.0).abs() < 1e-3);
        assert_eq!(elevation_range(0, 5000, 1000.0), 2000.0);
    }

    #[test]
    fn horizontal_check_uses_adjusted_range() {
        let observer = Position::new(0, 0, 0);
        assert!(!within_elevation_range(observer, Position::new(1200, 0, 20), 1000.0));
        assert!(within_elevation_range(observer, Position::new(1200, 0, 200), 1000.0));
        // Height does not count toward the horizontal distance itself.
        assert!(within_elevation_range(observer, Position::new(999, 0, 49), 1000.0));
    }
}

// ── Bundle ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sense_tests {
    use sense_core::StimulusType;
    #[allow(unused_imports)]
    use sense_strategy::{LineOfSight, Modifier, Stimulus};

    #[test]
    fn bundle_is_consistent() {
        let sense = crate::sense();
        assert_eq!(sense.name, crate::SYSTEM_NAME);
        assert_eq!(sense.stimulus.stimulus_type(), StimulusType::Visual);
        assert!(sense.los.supported().contains(StimulusType::Visual));
        assert!(sense.modifier.supported().contains(StimulusType::Visual));
    }
}
