//! # Dungeon Generation
//!
//! Room-and-corridor layout generation with room squashing.
//!
//! Rooms are scattered at random, pulled toward the top-left corner until they
//! bump into each other, linked to their nearest neighbour with L-shaped
//! corridors and finally wrapped in a one-tile wall halo.

use crate::generation::random::sample_floor;
use crate::utils::connectivity;
use crate::{
    DungeonError, DungeonResult, GenerationConfig, Generator, Grid, Position, RandomSource, Room,
    TileKind,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// The result of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMap {
    /// The finished tile grid
    pub grid: Grid,
    /// Rooms in placement order, at their squashed positions
    pub rooms: Vec<Room>,
    /// Where the exit staircase was placed
    pub staircase: Position,
    /// Number of 4-connected walkable regions
    pub regions: usize,
}

/// Room-and-corridor generator that squashes rooms toward the origin.
///
/// Generation runs these steps in order:
/// 1. Place non-overlapping rooms, retrying each slot on collision
/// 2. Squash rooms toward `(1, 1)` until they collide
/// 3. Connect each room to its closest neighbour with an L-shaped corridor
/// 4. Stamp room interiors as floor
/// 5. Surround every floor tile with walls
/// 6. Place the exit staircase on a random floor tile
#[derive(Debug, Clone, Default)]
pub struct MapGenerator;

impl MapGenerator {
    /// Creates a new map generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use squashdelve::{GenerationConfig, Generator, MapGenerator};
    ///
    /// let generator = MapGenerator::new();
    /// let config = GenerationConfig::for_testing(3);
    /// let map = generator.generate(&config, &mut config.create_rng()).unwrap();
    /// assert!(!map.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Places `room_count` non-overlapping rooms.
    ///
    /// A colliding candidate is discarded and the same slot is retried. Each
    /// slot gets `max_placement_attempts` candidates.
    fn place_rooms(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DungeonResult<Vec<Room>> {
        let size = to_i32(config.size)?;
        let (min_rooms, max_rooms) = config.room_count_range;
        let (min_size, max_size) = (
            to_i32(config.room_size_range.0)?,
            to_i32(config.room_size_range.1)?,
        );

        let room_count = rng.next_int(to_i32(min_rooms)?, to_i32(max_rooms)?);
        let mut rooms: Vec<Room> = Vec::new();
        let mut retries = 0u64;

        for room_id in 0..room_count as u32 {
            let mut attempts = 0;
            let room = loop {
                if attempts == config.max_placement_attempts {
                    return Err(DungeonError::Configuration(format!(
                        "could not place room {} of {} after {} attempts on a {}x{} grid",
                        room_id + 1,
                        room_count,
                        attempts,
                        size,
                        size
                    )));
                }
                attempts += 1;

                let top_left = Position::new(
                    rng.next_int(1, size - max_size - 1),
                    rng.next_int(1, size - max_size - 1),
                );
                let width = rng.next_int(min_size, max_size);
                let height = rng.next_int(min_size, max_size);
                let candidate = Room::new(room_id, top_left, width, height);

                if !collides(&rooms, &candidate, None) {
                    break candidate;
                }
            };
            retries += u64::from(attempts - 1);

            // Sampled extents are exclusive; stored extents are inclusive
            rooms.push(Room {
                width: room.width - 1,
                height: room.height - 1,
                ..room
            });
        }

        debug!(
            "Placed {} rooms with {} collision retries",
            rooms.len(),
            retries
        );
        Ok(rooms)
    }

    /// Pulls every room diagonally toward `(1, 1)`.
    ///
    /// Each room steps one tile left and up (per axis, never below 1) until it
    /// reaches the corner or collides with another room, in which case the
    /// last step is undone. The step that lands on `(1, 1)` is checked like
    /// any other, so a room never squashes into one already in the corner.
    fn squash_rooms(&self, rooms: &mut [Room], passes: u32) {
        for _ in 0..passes {
            for index in 0..rooms.len() {
                loop {
                    let previous = rooms[index].top_left;
                    let mut next = previous;
                    if next.x > 1 {
                        next.x -= 1;
                    }
                    if next.y > 1 {
                        next.y -= 1;
                    }
                    if next == previous {
                        break;
                    }

                    rooms[index].top_left = next;
                    if collides(rooms, &rooms[index], Some(index)) {
                        rooms[index].top_left = previous;
                        break;
                    }
                }
            }
        }
    }

    /// Finds the room with the smallest gap to `rooms[index]`.
    ///
    /// Only gaps strictly below `threshold` qualify; ties keep the earlier room.
    fn find_closest_room(&self, rooms: &[Room], index: usize, threshold: f64) -> Option<usize> {
        let room = &rooms[index];
        let mut closest = None;
        let mut closest_gap = threshold;

        for (other_index, other) in rooms.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let gap = room.gap_to(other);
            if gap < closest_gap {
                closest_gap = gap;
                closest = Some(other_index);
            }
        }

        closest
    }

    /// Connects each room to its closest neighbour.
    fn connect_rooms(
        &self,
        grid: &mut Grid,
        rooms: &mut [Room],
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DungeonResult<()> {
        for index in 0..rooms.len() {
            let Some(other) = self.find_closest_room(rooms, index, config.connection_threshold)
            else {
                warn!("Room {} has no neighbour in range; leaving it unconnected", index);
                continue;
            };

            let from = rooms[index].random_point(rng);
            let to = rooms[other].random_point(rng);
            carve_corridor(grid, from, to)?;

            let (id, other_id) = (rooms[index].id, rooms[other].id);
            rooms[index].add_connection(other_id);
            rooms[other].add_connection(id);
        }
        Ok(())
    }

    /// Sets every tile of every room's floor to `Floor`.
    fn stamp_rooms(&self, grid: &mut Grid, rooms: &[Room]) -> DungeonResult<()> {
        for room in rooms {
            stamp_room(grid, room)?;
        }
        Ok(())
    }

    /// Places the exit on a random floor tile.
    fn place_staircase(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DungeonResult<Position> {
        let pos = sample_floor(grid, rng, config.max_sample_attempts)?;
        grid.set_tile(pos, TileKind::Staircase)?;
        Ok(pos)
    }
}

/// Checks `room` against every room except the one at `ignore`.
pub fn collides(rooms: &[Room], room: &Room, ignore: Option<usize>) -> bool {
    rooms
        .iter()
        .enumerate()
        .any(|(index, other)| Some(index) != ignore && room.overlaps(other))
}

/// Converts a configured count or extent to grid coordinates.
fn to_i32(value: u32) -> DungeonResult<i32> {
    i32::try_from(value).map_err(|_| {
        DungeonError::Configuration(format!("{} does not fit grid coordinates", value))
    })
}

/// Carves a single-width corridor from `to` back to `from`.
///
/// The walking point starts at `to` and closes the x distance first, then the
/// y distance, marking every tile it enters as `Floor`. The starting tile
/// itself is not marked.
pub fn carve_corridor(grid: &mut Grid, from: Position, to: Position) -> DungeonResult<()> {
    let mut cursor = to;
    while cursor != from {
        if cursor.x != from.x {
            cursor.x += (from.x - cursor.x).signum();
        } else {
            cursor.y += (from.y - cursor.y).signum();
        }
        grid.set_tile(cursor, TileKind::Floor)?;
    }
    Ok(())
}

/// Stamps one room's half-open floor rectangle as `Floor`.
pub fn stamp_room(grid: &mut Grid, room: &Room) -> DungeonResult<()> {
    for pos in room.floor_positions() {
        grid.set_tile(pos, TileKind::Floor)?;
    }
    Ok(())
}

/// Turns every `Empty` tile next to a floor tile into `Wall`.
///
/// Floor tiles are snapshotted before any write, and each 3x3 window is
/// clamped to the grid.
pub fn build_wall_halo(grid: &mut Grid) -> DungeonResult<()> {
    let size = grid.size();
    for floor in grid.positions_of(TileKind::Floor) {
        for pos in floor.neighborhood(size) {
            if grid.tile_at(pos) == Some(TileKind::Empty) {
                grid.set_tile(pos, TileKind::Wall)?;
            }
        }
    }
    Ok(())
}

impl Generator<GeneratedMap> for MapGenerator {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DungeonResult<GeneratedMap> {
        config.validate()?;

        let mut grid = Grid::new(config.size);

        let mut rooms = self.place_rooms(config, rng)?;
        self.squash_rooms(&mut rooms, config.squash_passes);
        self.connect_rooms(&mut grid, &mut rooms, config, rng)?;
        self.stamp_rooms(&mut grid, &rooms)?;
        build_wall_halo(&mut grid)?;
        let staircase = self.place_staircase(&mut grid, config, rng)?;

        let regions = connectivity::walkable_regions(&grid).len();
        if regions > 1 {
            warn!("Generated layout has {} disconnected regions", regions);
        }

        let map = GeneratedMap {
            grid,
            rooms,
            staircase,
            regions,
        };
        self.validate(&map, config)?;

        info!(
            "Generated {}x{} map: {} rooms, {} floor tiles, staircase at {:?}",
            config.size,
            config.size,
            map.rooms.len(),
            map.grid.count(TileKind::Floor),
            staircase
        );
        Ok(map)
    }

    fn validate(&self, map: &GeneratedMap, config: &GenerationConfig) -> DungeonResult<()> {
        if map.grid.size() != config.size {
            return Err(DungeonError::InvalidState(format!(
                "grid size {} does not match configured size {}",
                map.grid.size(), config.size
            )));
        }
        let stairs = map.grid.count(TileKind::Staircase);
        if stairs != 1 {
            return Err(DungeonError::InvalidState(format!(
                "expected exactly one staircase, found {}",
                stairs
            )));
        }
        if !map.grid.has_complete_wall_halo() {
            return Err(DungeonError::InvalidState(
                "floor tile adjacent to empty space".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MapGenerator"
    }
}
