//! Unit tests for sense-world.

use sense_core::SectorType;

use crate::{TerrainMap, TerrainMapBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ridge_map() -> TerrainMap {
    TerrainMapBuilder::new((-10, -10), 21, 21)
        .fill_rect((0, -10), (0, 10), SectorType::Mountain)
        .elevation_rect((0, -10), (0, 10), 300)
        .build()
}

// ── TerrainMap ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod terrain_tests {
    use super::*;

    #[test]
    fn painted_cells_read_back() {
        let map = ridge_map();
        assert_eq!(map.sector(0, 5), SectorType::Mountain);
        assert_eq!(map.elevation(0, 5), 300);
        assert_eq!(map.sector(3, 5), SectorType::Field);
        assert_eq!(map.elevation(3, 5), 0);
    }

    #[test]
    fn outside_reads_default() {
        let map = TerrainMapBuilder::new((0, 0), 4, 4)
            .default_sector(SectorType::Ocean)
            .build();
        assert!(!map.contains(4, 0));
        assert_eq!(map.sector(-1, 2), SectorType::Ocean);
        assert_eq!(map.elevation(100, 100), 0);
    }

    #[test]
    fn set_out_of_bounds_errors() {
        let mut map = TerrainMapBuilder::new((0, 0), 2, 2).build();
        assert!(map.set(1, 1, SectorType::Hills, 10).is_ok());
        assert!(map.set(2, 0, SectorType::Hills, 10).is_err());
    }

    #[test]
    fn fill_rect_clips_to_map() {
        let map = TerrainMapBuilder::new((0, 0), 3, 3)
            .fill_rect((-1000, -1000), (1000, 1000), SectorType::Desert)
            .build();
        assert_eq!(map.sector(0, 0), SectorType::Desert);
        assert_eq!(map.sector(2, 2), SectorType::Desert);
    }

    #[test]
    fn scatter_is_deterministic() {
        let a = TerrainMapBuilder::new((0, 0), 30, 30).scatter(SectorType::Forest, 0.3, 9).build();
        let b = TerrainMapBuilder::new((0, 0), 30, 30).scatter(SectorType::Forest, 0.3, 9).build();
        let forest = |m: &TerrainMap| {
            (0..30)
                .flat_map(|y| (0..30).map(move |x| (x, y)))
                .filter(|&(x, y)| m.sector(x, y) == SectorType::Forest)
                .count()
        };
        assert_eq!(forest(&a), forest(&b));
        let n = forest(&a);
        assert!(n > 150 && n < 400, "expected ~270 forest cells, got {n}");
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::{load_terrain_csv, load_terrain_reader};

    const CSV: &str = "x,y,sector,elevation\n\
                       -2,1,forest,5\n\
                       3,4,high_mountain,900\n\
                       0,0,Water_NoSwim,0\n";

    #[test]
    fn reader_sizes_to_bounding_box() {
        let map = load_terrain_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(map.origin(), (-2, 0));
        assert_eq!((map.width(), map.height()), (6, 5));
        assert_eq!(map.sector(-2, 1), SectorType::Forest);
        assert_eq!(map.sector(3, 4), SectorType::HighMountain);
        assert_eq!(map.elevation(3, 4), 900);
        assert_eq!(map.sector(0, 0), SectorType::WaterNoSwim);
        assert_eq!(map.sector(1, 1), SectorType::Field);
    }

    #[test]
    fn unknown_sector_is_parse_error() {
        let err = load_terrain_reader(Cursor::new("x,y,sector,elevation\n0,0,lava,0\n"))
            .unwrap_err();
        assert!(err.to_string().contains("lava"), "got {err}");
    }

    #[test]
    fn empty_file_gives_empty_map() {
        let map = load_terrain_reader(Cursor::new("x,y,sector,elevation\n")).unwrap();
        assert_eq!(map.width(), 0);
        assert_eq!(map.sector(0, 0), SectorType::Field);
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let map = load_terrain_csv(file.path()).unwrap();
        assert_eq!(map.sector(3, 4), SectorType::HighMountain);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_terrain_csv(std::path::Path::new("/nonexistent/terrain.csv")).unwrap_err();
        assert!(matches!(err, crate::WorldError::Io(_)));
    }
}

// ── ObserverIndex ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod index_tests {
    use sense_core::{ObserverId, Position};

    use crate::ObserverIndex;

    #[test]
    fn radius_query_is_inclusive_and_sorted() {
        let idx = ObserverIndex::from_observers([
            (ObserverId(2), Position::new(3, 4, 0)),
            (ObserverId(0), Position::new(0, 0, 0)),
            (ObserverId(1), Position::new(6, 8, 0)),
        ]);
        assert_eq!(idx.within_radius(Position::ORIGIN, 5), vec![ObserverId(0), ObserverId(2)]);
        assert_eq!(idx.within_radius(Position::ORIGIN, 10).len(), 3);
    }

    #[test]
    fn elevation_is_ignored() {
        let idx = ObserverIndex::from_observers([(ObserverId(0), Position::new(1, 1, 5000))]);
        assert_eq!(idx.within_radius(Position::ORIGIN, 2), vec![ObserverId(0)]);
    }

    #[test]
    fn insert_remove_nearest() {
        let mut idx = ObserverIndex::new();
        assert!(idx.is_empty());
        idx.insert(ObserverId(0), Position::new(100, 0, 0));
        idx.insert(ObserverId(1), Position::new(-3, 2, 0));
        assert_eq!(idx.nearest(Position::ORIGIN), Some(ObserverId(1)));
        assert!(idx.remove(ObserverId(1), Position::new(-3, 2, 0)));
        assert!(!idx.remove(ObserverId(1), Position::new(-3, 2, 0)));
        assert_eq!(idx.nearest(Position::ORIGIN), Some(ObserverId(0)));
        assert_eq!(idx.len(), 1);
    }
}

// ── StaticWorld / Mailbox ─────────────────────────────────────────────────────

#[cfg(test)]
mod world_tests {
    use sense_core::{
        MessageSink, ObserverId, ObserverInfo, ObserverKind, Position, TimeOfDay, Weather,
        WorldHost,
    };

    use super::*;
    use crate::{Mailbox, StaticWorld};

    #[test]
    fn host_queries_reflect_terrain() {
        let world = StaticWorld::new(ridge_map())
            .with_weather(Weather::Storm)
            .with_time_of_day(TimeOfDay::Dark);
        assert_eq!(world.terrain_at(0, 0), SectorType::Mountain);
        assert_eq!(world.elevation_at(0, 0), 300);
        assert_eq!(world.weather_at(Position::ORIGIN), Weather::Storm);
        assert_eq!(world.time_of_day(), TimeOfDay::Dark);
    }

    #[test]
    fn placed_player_stands_on_ground() {
        let mut world = StaticWorld::new(ridge_map());
        let id = world.place_player(0, 3);
        assert_eq!(id, ObserverId(0));
        assert_eq!(world.observer(id).unwrap().position, Position::new(0, 3, 300));
        assert!(world.observer(ObserverId(7)).is_none());
    }

    #[test]
    fn moving_updates_index() {
        let mut world = StaticWorld::new(ridge_map());
        let id = world.place_player(-5, -5);
        assert!(world.observers_within(Position::new(5, 5, 0), 3).is_empty());
        assert!(world.move_observer(id, Position::new(5, 5, 0)));
        assert_eq!(world.observers_within(Position::new(5, 5, 0), 3), vec![id]);
        assert!(!world.move_observer(ObserverId(42), Position::ORIGIN));
    }

    #[test]
    fn outdoor_players_filter() {
        let mut world = StaticWorld::new(ridge_map());
        let a = world.place_player(1, 1);
        world.add_observer(ObserverInfo {
            kind: ObserverKind::NonPlayer,
            ..ObserverInfo::player_at(Position::ORIGIN)
        });
        let indoors = world.place_player(2, 2);
        world.observer_mut(indoors).unwrap().outdoors = false;
        assert_eq!(world.outdoor_players(), vec![a]);
        assert_eq!(world.observer_ids().count(), 3);
    }

    #[test]
    fn mailbox_records_in_order() {
        let mut mail = Mailbox::new();
        mail.deliver(ObserverId(1), "first");
        mail.deliver(ObserverId(2), "other");
        mail.deliver(ObserverId(1), "second");
        assert_eq!(mail.for_observer(ObserverId(1)).collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(mail.len(), 3);
        assert_eq!(mail.drain().len(), 3);
        assert!(mail.is_empty());
    }
}
