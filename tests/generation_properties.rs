//! Property tests over generated layouts.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use squashdelve::{
    reachable_from, EncounterGenerator, GeneratedMap, GenerationConfig, Generator, Grid,
    ItemGenerator, MapGenerator, Populator, Position, TileKind,
};

fn generate(config: &GenerationConfig) -> GeneratedMap {
    let mut rng = StdRng::seed_from_u64(config.seed);
    MapGenerator::new()
        .generate(config, &mut rng)
        .expect("generation should succeed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_exactly_one_staircase(seed in any::<u64>()) {
        let map = generate(&GenerationConfig::new(seed));
        prop_assert_eq!(map.grid.count(TileKind::Staircase), 1);
        prop_assert_eq!(map.grid.tile_at(map.staircase), Some(TileKind::Staircase));
    }

    #[test]
    fn prop_wall_halo_is_total(seed in any::<u64>()) {
        let map = generate(&GenerationConfig::new(seed));
        let grid = &map.grid;
        for pos in grid.positions_of(TileKind::Floor) {
            for neighbour in pos.neighborhood(grid.size()) {
                prop_assert_ne!(grid.tile_at(neighbour), Some(TileKind::Empty));
            }
        }
    }

    #[test]
    fn prop_rooms_never_overlap(seed in any::<u64>()) {
        let map = generate(&GenerationConfig::new(seed));
        prop_assert!((20..25).contains(&map.rooms.len()));
        for (i, a) in map.rooms.iter().enumerate() {
            for b in &map.rooms[i + 1..] {
                prop_assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn prop_border_stays_unwalkable(seed in any::<u64>()) {
        let map = generate(&GenerationConfig::new(seed));
        let last = map.grid.size() as i32 - 1;
        for i in 0..=last {
            for pos in [
                Position::new(i, 0),
                Position::new(i, last),
                Position::new(0, i),
                Position::new(last, i),
            ] {
                let tile = map.grid.tile_at(pos);
                prop_assert!(tile == Some(TileKind::Empty) || tile == Some(TileKind::Wall));
            }
        }
    }

    #[test]
    fn prop_spawns_land_on_floor(seed in any::<u64>()) {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let map = MapGenerator::new().generate(&config, &mut rng).unwrap();

        let monsters = EncounterGenerator::with_count(10)
            .populate(&map.grid, &config, &mut rng)
            .unwrap();
        let items = ItemGenerator::with_count(10)
            .populate(&map.grid, &config, &mut rng)
            .unwrap();

        for pos in monsters.iter().map(|m| m.position).chain(items.iter().map(|i| i.position)) {
            prop_assert_eq!(map.grid.tile_at(pos), Some(TileKind::Floor));
        }
    }

    #[test]
    fn prop_room_floors_are_stamped(seed in 0u64..10_000) {
        let map = generate(&GenerationConfig::new(seed));
        for room in &map.rooms {
            for pos in room.floor_positions() {
                let tile = map.grid.tile_at(pos);
                prop_assert!(tile == Some(TileKind::Floor) || tile == Some(TileKind::Staircase));
            }
        }
    }
}

#[test]
fn test_every_room_reaches_its_neighbour() {
    for seed in [1, 2, 3, 99, 12345] {
        let map = generate(&GenerationConfig::new(seed));
        for room in &map.rooms {
            let reachable = reachable_from(&map.grid, room.top_left);
            for &other in &room.connections {
                let other = &map.rooms[other as usize];
                assert!(
                    reachable.contains(&other.top_left),
                    "seed {}: room {} not linked to room {}",
                    seed,
                    room.id,
                    other.id
                );
            }
        }
    }
}

#[test]
fn test_staircase_on_tiny_grid() {
    let mut grid = Grid::new(4);
    grid.set_tile(Position::new(2, 2), TileKind::Floor).unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let pos = squashdelve::generation::random::sample_floor(&grid, &mut rng, 100_000).unwrap();
    assert_eq!(pos, Position::new(2, 2));
}

#[test]
fn test_seed_changes_layout() {
    let a = generate(&GenerationConfig::new(1));
    let b = generate(&GenerationConfig::new(2));
    assert_ne!(a.grid, b.grid);
}

#[test]
fn test_detailed_preset_generates() {
    let map = generate(&GenerationConfig::for_detailed_generation(64));
    assert_eq!(map.grid.size(), 128);
    assert_eq!(map.grid.count(TileKind::Staircase), 1);
    assert!(map.grid.has_complete_wall_halo());
}
