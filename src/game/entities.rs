//! # Entities
//!
//! The player, monsters and items that occupy floor tiles of a level.

use crate::generation::random::sample_floor;
use crate::{new_entity_id, DungeonResult, EntityId, Grid, Position, RandomSource, TileKind};
use serde::{Deserialize, Serialize};

/// Anything with an identity and a position on the grid.
pub trait Entity {
    /// Unique identifier of this entity.
    fn id(&self) -> EntityId;

    /// Current position on the grid.
    fn position(&self) -> Position;

    /// Moves the entity without any checks.
    fn set_position(&mut self, position: Position);
}

/// Entities that place themselves on a uniformly random floor tile.
pub trait Spawnable: Entity {
    /// Picks a random `Floor` tile of `grid` and moves there.
    ///
    /// Gives up with [`crate::DungeonError::EmptyFloor`] after `max_attempts`
    /// rejected samples.
    fn spawn(
        &mut self,
        grid: &Grid,
        rng: &mut dyn RandomSource,
        max_attempts: u32,
    ) -> DungeonResult<Position> {
        let position = sample_floor(grid, rng, max_attempts)?;
        self.set_position(position);
        Ok(position)
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub position: Position,
    /// Items picked up on the current level
    pub inventory: Vec<Item>,
}

impl Player {
    /// Creates a player at `position` with an empty inventory.
    ///
    /// # Examples
    ///
    /// ```
    /// use squashdelve::{Player, Position};
    ///
    /// let player = Player::new(Position::new(5, 5));
    /// assert!(player.inventory.is_empty());
    /// ```
    pub fn new(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            position,
            inventory: Vec::new(),
        }
    }

    /// Moves by `(dx, dy)` if the target is inside the grid and not a wall.
    ///
    /// Returns the resulting position, which is unchanged when the move is
    /// rejected. `Empty`, `Floor` and `Staircase` targets are all accepted.
    ///
    /// ```
    /// use squashdelve::{Grid, Player, Position, TileKind};
    ///
    /// let mut grid = Grid::filled(10, TileKind::Floor);
    /// grid.set_tile(Position::new(6, 5), TileKind::Wall).unwrap();
    ///
    /// let mut player = Player::new(Position::new(5, 5));
    /// assert_eq!(player.move_by(1, 0, &grid), Position::new(5, 5));
    /// assert_eq!(player.move_by(0, 1, &grid), Position::new(5, 6));
    /// ```
    pub fn move_by(&mut self, dx: i32, dy: i32, grid: &Grid) -> Position {
        let target = self.position.offset(dx, dy);
        if let Some(kind) = grid.tile_at(target) {
            if kind.is_walkable() {
                self.position = target;
            }
        }
        self.position
    }

    /// Whether the player is standing on the level exit.
    pub fn is_on_staircase(&self, grid: &Grid) -> bool {
        grid.tile_at(self.position) == Some(TileKind::Staircase)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Position::origin())
    }
}

/// A monster placed on the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: EntityId,
    pub position: Position,
}

impl Monster {
    /// Creates a monster at `position`.
    pub fn new(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            position,
        }
    }
}

/// An item lying on the level until the player picks it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub position: Position,
}

impl Item {
    /// Creates an item at `position`.
    pub fn new(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            position,
        }
    }
}

macro_rules! impl_positioned {
    ($($ty:ty),*) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> EntityId {
                    self.id
                }

                fn position(&self) -> Position {
                    self.position
                }

                fn set_position(&mut self, position: Position) {
                    self.position = position;
                }
            }

            impl Spawnable for $ty {}
        )*
    };
}

impl_positioned!(Player, Monster, Item);
