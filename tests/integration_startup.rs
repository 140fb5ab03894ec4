//! Integration test to ensure a session can start up without errors.

use squashdelve::{
    DungeonError, DungeonResult, GameState, GenerationConfig, Grid, Position, TileKind,
};

#[test]
fn test_basic_startup() -> DungeonResult<()> {
    // Floor interior with a wall border
    let mut grid = Grid::new(10);
    for y in 0..10 {
        for x in 0..10 {
            let kind = if x == 0 || x == 9 || y == 0 || y == 9 {
                TileKind::Wall
            } else {
                TileKind::Floor
            };
            grid.set_tile(Position::new(x, y), kind)?;
        }
    }

    let state = GameState::with_grid(grid, GenerationConfig::for_testing(12345))?;
    assert_eq!(state.level, 1);
    assert_eq!(state.status().inventory, 0);
    assert_eq!(state.grid.tile_at(state.player.position), Some(TileKind::Floor));
    Ok(())
}

#[test]
fn test_startup_without_floor_fails() {
    let grid = Grid::filled(10, TileKind::Wall);
    let result = GameState::with_grid(grid, GenerationConfig::for_testing(1));
    assert!(matches!(result, Err(DungeonError::EmptyFloor { .. })));
}
