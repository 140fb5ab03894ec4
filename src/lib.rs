//! # Squashdelve
//!
//! Procedural dungeon generation for grid-based roguelikes.
//!
//! ## Architecture Overview
//!
//! The crate is split into a small number of layers:
//!
//! - **Game**: the tile grid, positioned entities and a headless level session
//! - **Generation**: room placement, room squashing, corridor carving, wall halo
//!   and staircase placement, plus populators for monsters and items
//! - **Utils**: connectivity analysis over generated grids
//!
//! Nothing in the library draws, reads input or schedules frames. A host drives
//! a [`GameState`] and reads the grid and entity positions back out.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use squashdelve::{GenerationConfig, Generator, MapGenerator, TileKind};
//!
//! let config = GenerationConfig::new(7);
//! let mut rng = StdRng::seed_from_u64(config.seed);
//! let map = MapGenerator::new().generate(&config, &mut rng).unwrap();
//! assert_eq!(map.grid.count(TileKind::Staircase), 1);
//! ```

pub mod game;
pub mod generation;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use utils::*;

pub use game::{
    Direction, Entity, EntityId, GameEvent, GameState, GameStatistics, Grid, Item, LevelStatus,
    Monster, Player, Position, Spawnable, TileKind,
};

pub use generation::{
    EncounterGenerator, GeneratedMap, GenerationConfig, Generator, ItemGenerator, MapGenerator,
    Populator, RandomSource, Room,
};

/// Core error type for dungeon generation and level sessions.
#[derive(thiserror::Error, Debug)]
pub enum DungeonError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters admit no feasible layout
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rejection sampling found no floor tile to place something on
    #[error("No floor tile found after {attempts} attempts")]
    EmptyFloor { attempts: u32 },

    /// A tile write fell outside the grid
    #[error("Position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    /// Session state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the crate.
pub type DungeonResult<T> = Result<T, DungeonError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation defaults.
pub mod config {
    /// Default side length of the square grid
    pub const DEFAULT_GRID_SIZE: u32 = 64;

    /// Default room count range, high exclusive
    pub const DEFAULT_ROOM_COUNT_RANGE: (u32, u32) = (20, 25);

    /// Default room size range, high exclusive
    pub const DEFAULT_ROOM_SIZE_RANGE: (u32, u32) = (5, 10);

    /// Number of squash passes over the room list
    pub const DEFAULT_SQUASH_PASSES: u32 = 10;

    /// Rooms farther apart than this on both axes are never connected
    pub const DEFAULT_CONNECTION_THRESHOLD: f64 = 1000.0;

    /// Candidate rectangles tried per room slot before giving up
    pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Random cells tried when looking for a floor tile
    pub const DEFAULT_MAX_SAMPLE_ATTEMPTS: u32 = 100_000;

    /// Monsters spawned on each level
    pub const DEFAULT_MONSTERS_PER_LEVEL: usize = 5;

    /// Items spawned on each level
    pub const DEFAULT_ITEMS_PER_LEVEL: usize = 5;

    /// Largest grid accepted by the generator
    pub const MAX_GRID_SIZE: u32 = 4096;
}
