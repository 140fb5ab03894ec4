//! # Generation Module
//!
//! Procedural content generation for dungeon layouts, monsters and items.
//!
//! Layouts are produced by [`MapGenerator`], a room-and-corridor generator
//! that squashes its rooms toward the origin before connecting them. The
//! populators then scatter monsters and items over the finished floor.

pub mod dungeon;
pub mod encounters;
pub mod items;
pub mod random;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;
pub use random::*;

use crate::{config, DungeonError, DungeonResult, Grid, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Ranges are half-open: `(low, high)` samples from `low..high`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Side length of the square grid
    pub size: u32,
    /// Number of rooms to place, high exclusive
    pub room_count_range: (u32, u32),
    /// Room width/height before the inclusive-extent adjustment, high exclusive
    pub room_size_range: (u32, u32),
    /// Passes of the squash step
    pub squash_passes: u32,
    /// Rooms whose distance metric is not below this are never connected
    pub connection_threshold: f64,
    /// Candidates tried per room slot before reporting a configuration error
    pub max_placement_attempts: u32,
    /// Samples tried when looking for a floor tile
    pub max_sample_attempts: u32,
    /// Monsters spawned per level
    pub monsters_per_level: usize,
    /// Items spawned per level
    pub items_per_level: usize,
}

impl GenerationConfig {
    /// Creates the default generation configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use squashdelve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.size, 64);
    /// assert_eq!(config.room_count_range, (20, 25));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            size: config::DEFAULT_GRID_SIZE,
            room_count_range: config::DEFAULT_ROOM_COUNT_RANGE,
            room_size_range: config::DEFAULT_ROOM_SIZE_RANGE,
            squash_passes: config::DEFAULT_SQUASH_PASSES,
            connection_threshold: config::DEFAULT_CONNECTION_THRESHOLD,
            max_placement_attempts: config::DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            max_sample_attempts: config::DEFAULT_MAX_SAMPLE_ATTEMPTS,
            monsters_per_level: config::DEFAULT_MONSTERS_PER_LEVEL,
            items_per_level: config::DEFAULT_ITEMS_PER_LEVEL,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            size: 32,
            room_count_range: (4, 7),
            room_size_range: (4, 7),
            max_placement_attempts: 2_000,
            max_sample_attempts: 20_000,
            monsters_per_level: 2,
            items_per_level: 2,
            ..Self::new(seed)
        }
    }

    /// Creates a configuration for large, densely packed levels.
    pub fn for_detailed_generation(seed: u64) -> Self {
        Self {
            size: 128,
            room_count_range: (40, 55),
            room_size_range: (5, 12),
            squash_passes: 20,
            monsters_per_level: 15,
            items_per_level: 12,
            ..Self::new(seed)
        }
    }

    /// Checks that the parameters describe a placeable layout.
    ///
    /// Room corners are sampled from `[1, size - max_room_size - 1)`, so the
    /// grid must be at least `max_room_size + 3` wide. No more rooms may be
    /// requested than the grid has tiles.
    pub fn validate(&self) -> DungeonResult<()> {
        let (min_rooms, max_rooms) = self.room_count_range;
        let (min_size, max_size) = self.room_size_range;

        if min_rooms >= max_rooms {
            return Err(DungeonError::Configuration(format!(
                "room count range [{}, {}) is empty",
                min_rooms, max_rooms
            )));
        }
        if min_size < 2 || min_size >= max_size {
            return Err(DungeonError::Configuration(format!(
                "room size range [{}, {}) must be non-empty and start at 2 or more",
                min_size, max_size
            )));
        }
        if self.size > config::MAX_GRID_SIZE {
            return Err(DungeonError::Configuration(format!(
                "grid size {} exceeds the maximum of {}",
                self.size,
                config::MAX_GRID_SIZE
            )));
        }
        if self.size < max_size + 3 {
            return Err(DungeonError::Configuration(format!(
                "grid size {} cannot fit rooms up to {} tiles",
                self.size, max_size
            )));
        }
        let capacity = u64::from(self.size) * u64::from(self.size);
        if u64::from(max_rooms) > capacity {
            return Err(DungeonError::Configuration(format!(
                "room count range [{}, {}) exceeds the {} tiles of a {}x{} grid",
                min_rooms, max_rooms, capacity, self.size, self.size
            )));
        }
        if self.max_placement_attempts == 0 || self.max_sample_attempts == 0 {
            return Err(DungeonError::Configuration(
                "attempt caps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates a seeded random number generator from this configuration.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// An axis-aligned rectangular room.
///
/// The room covers `[x, x + width] × [y, y + height]` inclusive for collision
/// purposes; its stamped floor is the half-open `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index of this room in placement order
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Horizontal extent
    pub width: i32,
    /// Vertical extent
    pub height: i32,
    /// Rooms a corridor was carved to or from
    pub connections: Vec<u32>,
}

impl Room {
    /// Creates a new room.
    ///
    /// # Examples
    ///
    /// ```
    /// use squashdelve::{Position, Room};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 4, 3);
    /// assert_eq!(room.floor_positions().len(), 12);
    /// ```
    pub fn new(id: u32, top_left: Position, width: i32, height: i32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
            connections: Vec::new(),
        }
    }

    /// Gets the real-valued midpoint of the room.
    pub fn midpoint(&self) -> (f64, f64) {
        (
            f64::from(self.top_left.x) + f64::from(self.width) / 2.0,
            f64::from(self.top_left.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Inclusive-bound overlap test.
    ///
    /// Rooms that merely touch edges count as overlapping, which keeps at
    /// least one column or row between stamped rooms.
    pub fn overlaps(&self, other: &Room) -> bool {
        let (a, b) = (self.top_left, other.top_left);
        !(a.x + self.width < b.x
            || a.x > b.x + other.width
            || a.y + self.height < b.y
            || a.y > b.y + other.height)
    }

    /// Gap between two rooms along whichever axis is smaller.
    ///
    /// Negative when the rooms' projections overlap on that axis.
    pub fn gap_to(&self, other: &Room) -> f64 {
        let (mx, my) = self.midpoint();
        let (ox, oy) = other.midpoint();
        let half = |extent: i32| f64::from(extent) / 2.0;

        let gap_x = (mx - ox).abs() - half(self.width) - half(other.width);
        let gap_y = (my - oy).abs() - half(self.height) - half(other.height);
        gap_x.min(gap_y)
    }

    /// Checks if a position lies on the room's stamped floor.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width
            && pos.y < self.top_left.y + self.height
    }

    /// Gets all positions stamped as floor for this room.
    pub fn floor_positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity((self.width * self.height).max(0) as usize);

        for y in self.top_left.y..(self.top_left.y + self.height) {
            for x in self.top_left.x..(self.top_left.x + self.width) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Picks a uniformly random point on the room's floor.
    pub fn random_point(&self, rng: &mut dyn RandomSource) -> Position {
        Position::new(
            rng.next_int(self.top_left.x, self.top_left.x + self.width),
            rng.next_int(self.top_left.y, self.top_left.y + self.height),
        )
    }

    /// Adds a connection to another room.
    pub fn add_connection(&mut self, room_id: u32) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// Trait for layout generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate(&self, config: &GenerationConfig, rng: &mut dyn RandomSource)
        -> DungeonResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DungeonResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Trait for systems that scatter entities over a finished grid.
pub trait Populator<T> {
    /// Places entities on floor tiles of `grid`.
    fn populate(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DungeonResult<Vec<T>>;

    /// Gets the populator type name for logging and debugging.
    fn populator_type(&self) -> &'static str;
}
