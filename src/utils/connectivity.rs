//! # Connectivity Analysis
//!
//! Flood fills over the walkable tiles of a generated grid.
//!
//! Corridors only link each room to its closest neighbour, so a layout can
//! split into several disconnected regions. These helpers measure that; the
//! generator reports it but does not repair it.

use crate::{Grid, Position, TileKind};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Whether a tile belongs to the carved part of the dungeon.
fn is_carved(grid: &Grid, pos: Position) -> bool {
    matches!(
        grid.tile_at(pos),
        Some(TileKind::Floor) | Some(TileKind::Staircase)
    )
}

/// Returns every carved tile reachable from `start` with cardinal steps.
///
/// Returns an empty set when `start` is not a floor or staircase tile.
///
/// # Examples
///
/// ```
/// use squashdelve::{reachable_from, Grid, Position, TileKind};
///
/// let mut grid = Grid::new(5);
/// grid.set_tile(Position::new(1, 1), TileKind::Floor).unwrap();
/// grid.set_tile(Position::new(2, 1), TileKind::Staircase).unwrap();
/// grid.set_tile(Position::new(3, 3), TileKind::Floor).unwrap();
///
/// let reachable = reachable_from(&grid, Position::new(1, 1));
/// assert_eq!(reachable.len(), 2);
/// ```
pub fn reachable_from(grid: &Grid, start: Position) -> HashSet<Position> {
    if !is_carved(grid, start) {
        return HashSet::new();
    }

    bfs_reach(start, |&pos| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|&next| is_carved(grid, next))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Splits the carved tiles of `grid` into 4-connected regions.
///
/// Regions are returned largest first.
pub fn walkable_regions(grid: &Grid) -> Vec<HashSet<Position>> {
    let mut seen: HashSet<Position> = HashSet::new();
    let mut regions = Vec::new();

    for pos in grid.positions() {
        if seen.contains(&pos) || !is_carved(grid, pos) {
            continue;
        }
        let region = reachable_from(grid, pos);
        seen.extend(region.iter().copied());
        regions.push(region);
    }

    regions.sort_by(|a, b| b.len().cmp(&a.len()));
    regions
}

/// Whether every carved tile can reach every other one.
pub fn is_fully_connected(grid: &Grid) -> bool {
    walkable_regions(grid).len() <= 1
}
