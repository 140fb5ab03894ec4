//! # Game Module
//!
//! Grid representation, positioned entities and the headless level session.
//!
//! This module contains the runtime side of a dungeon level:
//! - The tile grid produced by the generator
//! - Spawnable entities (player, monsters, items) placed on floor tiles
//! - A level session that owns one grid and its entities

pub mod entities;
pub mod state;
pub mod world;

pub use entities::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D coordinate on the grid.
///
/// # Examples
///
/// ```
/// use squashdelve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let window = pos.neighborhood(64);
/// assert_eq!(window.count(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns the position shifted by the given deltas.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the 3x3 window centred on this position, clamped to `[0, size)`.
    ///
    /// The window includes the position itself. At grid edges the window
    /// shrinks instead of stepping outside the grid.
    ///
    /// ```
    /// use squashdelve::Position;
    ///
    /// assert_eq!(Position::new(0, 0).neighborhood(8).count(), 4);
    /// assert_eq!(Position::new(7, 3).neighborhood(8).count(), 6);
    /// ```
    pub fn neighborhood(self, size: u32) -> impl Iterator<Item = Position> {
        let max = size as i32 - 1;
        let (min_x, max_x) = ((self.x - 1).max(0), (self.x + 1).min(max));
        let (min_y, max_y) = ((self.y - 1).max(0), (self.y + 1).min(max));

        (min_x..=max_x).flat_map(move |x| (min_y..=max_y).map(move |y| Position::new(x, y)))
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1), // N
            Position::new(self.x - 1, self.y), // W
            Position::new(self.x + 1, self.y), // E
            Position::new(self.x, self.y + 1), // S
        ]
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions a host can move the player in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use squashdelve::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}
