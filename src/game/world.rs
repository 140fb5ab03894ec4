//! # Grid Representation
//!
//! The square tile grid a level is played on.

use crate::{DungeonError, DungeonResult, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of tile kinds a grid cell can hold.
///
/// The discriminants are the numeric codes hosts use when exchanging grids.
/// Code 3 is reserved and never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    /// Solid rock nothing has been carved into
    #[default]
    Empty = 0,
    /// Walkable room or corridor floor
    Floor = 1,
    /// Halo around floor tiles; blocks movement
    Wall = 2,
    /// Exit to the next level
    Staircase = 4,
}

impl TileKind {
    /// Returns the numeric code of this tile kind.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parses a numeric tile code.
    ///
    /// ```
    /// use squashdelve::TileKind;
    ///
    /// assert_eq!(TileKind::from_code(4), Some(TileKind::Staircase));
    /// assert_eq!(TileKind::from_code(3), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Empty),
            1 => Some(TileKind::Floor),
            2 => Some(TileKind::Wall),
            4 => Some(TileKind::Staircase),
            _ => None,
        }
    }

    /// Whether the player may step onto this tile.
    pub fn is_walkable(self) -> bool {
        self != TileKind::Wall
    }

    /// Character used by the text dump.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Staircase => '>',
        }
    }
}

/// A square grid of tiles with side length `size`.
///
/// Tiles are stored row-major (`tiles[y][x]`). Every coordinate in
/// `[0, size) × [0, size)` holds exactly one [`TileKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: u32,
    tiles: Vec<Vec<TileKind>>,
}

/// Unchecked wire form of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    size: u32,
    tiles: Vec<Vec<TileKind>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = DungeonError;

    fn try_from(raw: RawGrid) -> DungeonResult<Self> {
        let side = raw.size as usize;
        if raw.tiles.len() != side || raw.tiles.iter().any(|row| row.len() != side) {
            return Err(DungeonError::InvalidState(format!(
                "tile rows do not form a {}x{} grid",
                raw.size, raw.size
            )));
        }
        Ok(Self {
            size: raw.size,
            tiles: raw.tiles,
        })
    }
}

impl Grid {
    /// Creates a grid filled with [`TileKind::Empty`].
    ///
    /// # Examples
    ///
    /// ```
    /// use squashdelve::{Grid, Position, TileKind};
    ///
    /// let grid = Grid::new(16);
    /// assert_eq!(grid.tile_at(Position::new(3, 3)), Some(TileKind::Empty));
    /// assert_eq!(grid.tile_at(Position::new(16, 0)), None);
    /// ```
    pub fn new(size: u32) -> Self {
        Self::filled(size, TileKind::Empty)
    }

    /// Creates a grid with every tile set to `kind`.
    pub fn filled(size: u32, kind: TileKind) -> Self {
        Self {
            size,
            tiles: vec![vec![kind; size as usize]; size as usize],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Tile rows, indexed `[y][x]`.
    pub fn tiles(&self) -> &[Vec<TileKind>] {
        &self.tiles
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.size as i32;
        pos.x >= 0 && pos.y >= 0 && pos.x < size && pos.y < size
    }

    /// Returns the tile kind at `pos`, or `None` outside the grid.
    pub fn tile_at(&self, pos: Position) -> Option<TileKind> {
        if !self.is_in_bounds(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Sets the tile kind at `pos`.
    pub fn set_tile(&mut self, pos: Position, kind: TileKind) -> DungeonResult<()> {
        if !self.is_in_bounds(pos) {
            return Err(DungeonError::OutOfBounds { x: pos.x, y: pos.y });
        }
        self.tiles[pos.y as usize][pos.x as usize] = kind;
        Ok(())
    }

    /// Iterates over every position of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Returns every position holding `kind`.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.tile_at(pos) == Some(kind))
            .collect()
    }

    /// Counts the tiles of the given kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&tile| tile == kind)
            .count()
    }

    /// Returns the first staircase position, if the grid has one.
    pub fn staircase_position(&self) -> Option<Position> {
        self.positions()
            .find(|&pos| self.tile_at(pos) == Some(TileKind::Staircase))
    }

    /// Checks that every floor tile is fully enclosed: no `Empty` tile
    /// remains in any floor tile's clamped 3x3 window.
    pub fn has_complete_wall_halo(&self) -> bool {
        self.positions_of(TileKind::Floor).into_iter().all(|pos| {
            pos.neighborhood(self.size)
                .all(|n| self.tile_at(n) != Some(TileKind::Empty))
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            let line: String = row.iter().map(|tile| tile.glyph()).collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
