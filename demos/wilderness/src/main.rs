//! wilderness — a storm and a meteor swarm over a small stretch of
//! wilderness, with every message each player would receive printed.
//!
//! ```text
//! wilderness [engine.json] [terrain.csv]
//! ```
//!
//! Without a terrain file a 400×400 map is generated: a forest to the
//! north-west, a mountain ridge east of the origin and a hill country to
//! the south-west.  Set `RUST_LOG=debug` (and `"debug": true` in the engine
//! config) to trace each propagation stage.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use sense_core::{FrequencyBand, ObserverInfo, ObserverKind, Position, SectorType, TimeOfDay, Weather};
use sense_engine::EngineConfig;
use sense_visual::VISUAL_BASE_RANGE;
use sense_world::{load_terrain_csv, Mailbox, StaticWorld, TerrainMap, TerrainMapBuilder};
use wilderness::Effects;

// ── Constants ─────────────────────────────────────────────────────────────────

const MAP_ORIGIN:    (i32, i32) = (-200, -200);
const MAP_SIZE:      u32        = 400;
const SEED:          u64        = 42;
const RIDGE_HEIGHT:  i32        = 60;
const HILL_HEIGHT:   i32        = 20;
const IMPACT_RANGE:  f32        = 150.0;
const BELL_RANGE:    f32        = 40.0;

// ── Terrain ───────────────────────────────────────────────────────────────────

fn sample_terrain() -> TerrainMap {
    TerrainMapBuilder::new(MAP_ORIGIN, MAP_SIZE, MAP_SIZE)
        .fill_rect((-120, 20), (-20, 120), SectorType::Forest)
        .fill_rect((40, -80), (48, 80), SectorType::Mountain)
        .elevation_rect((40, -80), (48, 80), RIDGE_HEIGHT)
        .fill_rect((-190, -190), (-110, -110), SectorType::Hills)
        .elevation_rect((-190, -190), (-110, -110), HILL_HEIGHT)
        .scatter(SectorType::Road, 0.01, SEED)
        .roughen(2, SEED)
        .build()
}

fn print_mailbox(label: &str, delivered: usize, mailbox: &mut Mailbox) {
    println!("── {label} ({delivered} delivered)");
    for (observer, message) in mailbox.drain() {
        println!("  {observer}  {message}");
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config = match args.get(1) {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<EngineConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => EngineConfig::default(),
    };

    let terrain = match args.get(2) {
        Some(path) => load_terrain_csv(Path::new(path)).with_context(|| format!("loading {path}"))?,
        None => sample_terrain(),
    };
    println!(
        "Terrain: {}×{} cells from {:?}",
        terrain.width(),
        terrain.height(),
        terrain.origin()
    );

    // ── World ─────────────────────────────────────────────────────────────
    let mut world = StaticWorld::new(terrain)
        .with_weather(Weather::Cloudy)
        .with_time_of_day(TimeOfDay::Dusk);

    let players = [
        ("camp",   world.place_player(0, 0)),
        ("forest", world.place_player(-70, 70)),
        ("ridge",  world.place_player(120, 0)),
        ("hills",  world.place_player(-150, -150)),
        ("coast",  world.place_player(190, 190)),
    ];
    let ranger = world.add_observer(ObserverInfo {
        kind: ObserverKind::NonPlayer,
        ..ObserverInfo::player_at(Position::new(5, 5, 0))
    });
    for (name, id) in &players {
        println!("  player {id} at the {name}");
    }
    println!("  npc    {ranger} near the camp (never receives messages)");

    // ── Effects ───────────────────────────────────────────────────────────
    let mut effects = Effects::new(config)?;
    let mut mailbox = Mailbox::new();
    let t0 = Instant::now();

    let n = effects.thunder(&world, &mut mailbox, 30, 30, "a deafening crack of thunder")?;
    print_mailbox("Thunder", n, &mut mailbox);

    let n = effects.shout(&world, &mut mailbox, -10, 10, "a ranger shouting a warning")?;
    print_mailbox("Shout", n, &mut mailbox);

    let n = effects.sound_effect(
        &world,
        &mut mailbox,
        Position::new(0, 20, 0),
        "the clang of a camp bell",
        FrequencyBand::High,
        BELL_RANGE,
    )?;
    print_mailbox("Bell", n, &mut mailbox);

    let n = effects.ship_passing(&world, &mut mailbox, 185, 199, "a merchant ship under full sail")?;
    print_mailbox("Ship", n, &mut mailbox);

    world.set_weather(Weather::Clear);
    world.set_time_of_day(TimeOfDay::Dark);

    let n = effects.meteor_approach(&world, &mut mailbox, 0, 0, "a swarm of blazing meteors", VISUAL_BASE_RANGE)?;
    print_mailbox("Meteors approach", n, &mut mailbox);

    let n = effects.meteor_descent(&world, &mut mailbox, 0, 0, "meteors plunging earthward", VISUAL_BASE_RANGE)?;
    print_mailbox("Meteors descend", n, &mut mailbox);

    let n = effects.meteor_impact(&world, &mut mailbox, 0, 0, "a thunderous meteor impact", IMPACT_RANGE)?;
    print_mailbox("Meteor impact", n, &mut mailbox);

    let elapsed = t0.elapsed();
    println!();
    println!("── Systems");
    for system in effects.engine().list_systems() {
        let stats = system.stats();
        println!(
            "  {:<8} processed {:>3}  avg {:.4} ms",
            system.name(),
            stats.total_processed,
            stats.avg_processing_ms
        );
    }
    let stats = effects.engine().stats();
    println!(
        "Delivered {} messages in {:.2?} ({:.3} ms inside the engine)",
        stats.successful, elapsed, stats.total_processing_ms
    );

    effects.shutdown();
    Ok(())
}
