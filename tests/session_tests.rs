//! Integration tests for the level session.

use squashdelve::{
    Direction, DungeonResult, Entity, GameEvent, GameState, GenerationConfig, Grid, Player,
    Position, TileKind,
};

#[test]
fn test_player_blocked_by_wall() {
    let mut grid = Grid::filled(10, TileKind::Floor);
    grid.set_tile(Position::new(6, 5), TileKind::Wall).unwrap();

    let mut player = Player::new(Position::new(5, 5));
    assert_eq!(player.move_by(1, 0, &grid), Position::new(5, 5));
    assert_eq!(player.position(), Position::new(5, 5));
}

#[test]
fn test_walk_to_staircase_descends() -> DungeonResult<()> {
    let mut state = GameState::new(GenerationConfig::new(2718))?;
    let stairs = state
        .grid
        .staircase_position()
        .expect("generated level has a staircase");

    // Drop the player next to the stairs and step onto them
    let (start, direction) = Direction::all()
        .into_iter()
        .map(|d| {
            let delta = d.to_delta();
            (stairs - delta, d)
        })
        .find(|&(pos, _)| state.grid.tile_at(pos) == Some(TileKind::Floor))
        .expect("staircase sits on a floor area");
    state.player.set_position(start);
    state.items.clear();

    let events = state.move_player(direction)?;
    assert_eq!(events[0], GameEvent::PlayerMoved { from: start, to: stairs });
    assert_eq!(events.last(), Some(&GameEvent::LevelChanged { from: 1, to: 2 }));
    assert_eq!(state.status().level, 2);
    assert_eq!(state.statistics.levels_explored, 2);
    Ok(())
}

#[test]
fn test_sessions_with_same_seed_agree() -> DungeonResult<()> {
    let a = GameState::new(GenerationConfig::new(31337))?;
    let b = GameState::new(GenerationConfig::new(31337))?;
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.player.position, b.player.position);
    let positions = |s: &GameState| s.monsters.iter().map(|m| m.position).collect::<Vec<_>>();
    assert_eq!(positions(&a), positions(&b));
    Ok(())
}

#[test]
fn test_random_walk_never_enters_walls() -> DungeonResult<()> {
    let mut state = GameState::new(GenerationConfig::for_testing(404))?;
    let moves = [
        Direction::North,
        Direction::East,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::South,
    ];

    for step in 0..300 {
        state.move_player(moves[step % moves.len()])?;
        let tile = state.grid.tile_at(state.player.position);
        assert!(matches!(tile, Some(kind) if kind.is_walkable()));
    }
    let stats = &state.statistics;
    assert!(stats.steps_taken + stats.moves_blocked >= 300);
    Ok(())
}
