//! # Game State Module
//!
//! A headless level session: one grid, one player, and the monsters and items
//! of the current level.
//!
//! The session never reads input or draws. A host translates key presses into
//! [`Direction`]s, calls [`GameState::move_player`] and renders whatever the
//! session exposes. Reaching the staircase replaces the whole level.

use crate::utils::walkable_regions;
use crate::{
    Direction, DungeonResult, EncounterGenerator, Entity, EntityId, GeneratedMap,
    GenerationConfig, Generator, Grid, Item, ItemGenerator, MapGenerator, Monster, Player,
    Populator, Position, Room, Spawnable,
};
use log::info;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Something that happened during a session step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player stepped from one tile to another
    PlayerMoved { from: Position, to: Position },
    /// The target tile was a wall or outside the grid
    MoveBlocked { position: Position, target: Position },
    /// The player walked onto an item and picked it up
    ItemPickedUp { item_id: EntityId, position: Position },
    /// The player took the staircase and a new level was generated
    LevelChanged { from: u32, to: u32 },
}

/// Cumulative statistics for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Successful player moves
    pub steps_taken: u64,
    /// Moves rejected by walls or grid bounds
    pub moves_blocked: u64,
    /// Items picked up across all levels
    pub items_collected: u32,
    /// Levels generated, including the first
    pub levels_explored: u32,
    /// Deepest level reached
    pub max_depth_reached: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => self.steps_taken += 1,
            GameEvent::MoveBlocked { .. } => self.moves_blocked += 1,
            GameEvent::ItemPickedUp { .. } => self.items_collected += 1,
            GameEvent::LevelChanged { to, .. } => {
                self.levels_explored += 1;
                self.max_depth_reached = self.max_depth_reached.max(*to);
            }
        }
    }
}

/// What a status display needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStatus {
    pub level: u32,
    pub inventory: usize,
    pub position: Position,
}

/// Everything that belongs to a single level.
struct LevelContents {
    map: GeneratedMap,
    player: Player,
    monsters: Vec<Monster>,
    items: Vec<Item>,
}

/// A running session.
///
/// Owns the grid and entities of the current level plus the random source
/// every level is generated from. Seeding the configuration makes the whole
/// sequence of levels reproducible.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current level number, starting at 1
    pub level: u32,
    /// The current level's tiles
    pub grid: Grid,
    /// Rooms of the current level
    pub rooms: Vec<Room>,
    pub player: Player,
    pub monsters: Vec<Monster>,
    pub items: Vec<Item>,
    pub statistics: GameStatistics,
    config: GenerationConfig,
    rng: StdRng,
    generator: MapGenerator,
}

impl GameState {
    /// Starts a session on a freshly generated level 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use squashdelve::{GameState, GenerationConfig, TileKind};
    ///
    /// let state = GameState::new(GenerationConfig::new(12345)).unwrap();
    /// assert_eq!(state.level, 1);
    /// assert_eq!(state.grid.tile_at(state.player.position), Some(TileKind::Floor));
    /// ```
    pub fn new(config: GenerationConfig) -> DungeonResult<Self> {
        config.validate()?;
        let mut rng = config.create_rng();
        let generator = MapGenerator::new();
        let contents = build_level(&generator, &config, &mut rng)?;

        let state = Self::assemble(contents, config, rng, generator);
        info!("Session started on level 1");
        Ok(state)
    }

    /// Starts a session on a prepared grid instead of a generated one.
    ///
    /// The player, monsters and items are spawned on the grid's floor tiles.
    pub fn with_grid(grid: Grid, config: GenerationConfig) -> DungeonResult<Self> {
        config.validate()?;
        let mut rng = config.create_rng();
        let contents = populate_level(
            GeneratedMap {
                staircase: grid.staircase_position().unwrap_or_else(Position::origin),
                regions: walkable_regions(&grid).len(),
                grid,
                rooms: Vec::new(),
            },
            &config,
            &mut rng,
        )?;
        Ok(Self::assemble(contents, config, rng, MapGenerator::new()))
    }

    /// Builds a session standing on level 1 of `contents`.
    fn assemble(
        contents: LevelContents,
        config: GenerationConfig,
        rng: StdRng,
        generator: MapGenerator,
    ) -> Self {
        let mut statistics = GameStatistics::new();
        statistics.update_from_event(&GameEvent::LevelChanged { from: 0, to: 1 });

        Self {
            level: 1,
            grid: contents.map.grid,
            rooms: contents.map.rooms,
            player: contents.player,
            monsters: contents.monsters,
            items: contents.items,
            statistics,
            config,
            rng,
            generator,
        }
    }

    /// The configuration every level is generated with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Replaces the current level with a newly generated one.
    ///
    /// On error the current level and the statistics are left untouched.
    pub fn change_level(&mut self, level: u32) -> DungeonResult<()> {
        let contents = build_level(&self.generator, &self.config, &mut self.rng)?;

        self.statistics.update_from_event(&GameEvent::LevelChanged {
            from: self.level,
            to: level,
        });
        self.level = level;
        self.grid = contents.map.grid;
        self.rooms = contents.map.rooms;
        self.player = contents.player;
        self.monsters = contents.monsters;
        self.items = contents.items;

        info!("Starting level {}", level);
        Ok(())
    }

    /// Moves the player one step and resolves what happens there.
    ///
    /// Items on the destination are picked up. Standing on the staircase
    /// generates level `level + 1`. The move and any pickup are recorded in
    /// the statistics even when generating the next level fails.
    pub fn move_player(&mut self, direction: Direction) -> DungeonResult<Vec<GameEvent>> {
        let delta = direction.to_delta();
        let from = self.player.position();
        let to = self.player.move_by(delta.x, delta.y, &self.grid);

        let mut events = Vec::new();
        if to == from {
            events.push(GameEvent::MoveBlocked {
                position: from,
                target: from + delta,
            });
        } else {
            events.push(GameEvent::PlayerMoved { from, to });
        }

        events.extend(self.pick_up_items());
        for event in &events {
            self.statistics.update_from_event(event);
        }

        if self.player.is_on_staircase(&self.grid) {
            let previous = self.level;
            self.change_level(previous + 1)?;
            events.push(GameEvent::LevelChanged {
                from: previous,
                to: self.level,
            });
        }
        Ok(events)
    }

    /// Moves every item under the player into the inventory.
    fn pick_up_items(&mut self) -> Vec<GameEvent> {
        let position = self.player.position();
        let (picked, remaining): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.position == position);
        self.items = remaining;

        picked
            .into_iter()
            .map(|item| {
                let event = GameEvent::ItemPickedUp {
                    item_id: item.id,
                    position,
                };
                self.player.inventory.push(item);
                event
            })
            .collect()
    }

    /// Snapshot for a status display.
    pub fn status(&self) -> LevelStatus {
        LevelStatus {
            level: self.level,
            inventory: self.player.inventory.len(),
            position: self.player.position(),
        }
    }
}

/// Generates a grid and spawns everything that lives on it.
fn build_level(
    generator: &MapGenerator,
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> DungeonResult<LevelContents> {
    let map = generator.generate(config, rng)?;
    populate_level(map, config, rng)
}

fn populate_level(
    map: GeneratedMap,
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> DungeonResult<LevelContents> {
    let mut player = Player::default();
    player.spawn(&map.grid, rng, config.max_sample_attempts)?;

    let monsters = EncounterGenerator::new().populate(&map.grid, config, rng)?;
    let items = ItemGenerator::new().populate(&map.grid, config, rng)?;

    Ok(LevelContents {
        map,
        player,
        monsters,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DungeonError, TileKind};

    /// A 10x10 room of floor with a wall ring and a staircase in the corner.
    fn test_grid() -> Grid {
        let mut grid = Grid::filled(10, TileKind::Wall);
        for x in 1..9 {
            for y in 1..9 {
                grid.set_tile(Position::new(x, y), TileKind::Floor).unwrap();
            }
        }
        grid.set_tile(Position::new(8, 8), TileKind::Staircase).unwrap();
        grid
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(GenerationConfig::for_testing(99)).unwrap();
        assert_eq!(state.level, 1);
        assert_eq!(state.statistics.levels_explored, 1);
        assert_eq!(state.monsters.len(), 2);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.grid.count(TileKind::Staircase), 1);
        for pos in std::iter::once(state.player.position)
            .chain(state.monsters.iter().map(|m| m.position))
            .chain(state.items.iter().map(|i| i.position))
        {
            assert_eq!(state.grid.tile_at(pos), Some(TileKind::Floor));
        }
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let mut config = GenerationConfig::new(1);
        config.size = 8;
        assert!(matches!(
            GameState::new(config),
            Err(DungeonError::Configuration(_))
        ));
    }

    #[test]
    fn test_blocked_move() {
        let mut grid = test_grid();
        grid.set_tile(Position::new(6, 5), TileKind::Wall).unwrap();
        let mut state = GameState::with_grid(grid, GenerationConfig::for_testing(1)).unwrap();
        state.items.clear();
        state.player.set_position(Position::new(5, 5));

        let events = state.move_player(Direction::East).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::MoveBlocked {
                position: Position::new(5, 5),
                target: Position::new(6, 5),
            }]
        );
        assert_eq!(state.player.position, Position::new(5, 5));
        assert_eq!(state.statistics.moves_blocked, 1);
    }

    #[test]
    fn test_item_pickup() {
        let mut state = GameState::with_grid(test_grid(), GenerationConfig::for_testing(1)).unwrap();
        state.player.set_position(Position::new(2, 2));
        state.items = vec![Item::new(Position::new(3, 2)), Item::new(Position::new(6, 6))];
        let wanted = state.items[0].id;

        let events = state.move_player(Direction::East).unwrap();
        assert!(events.contains(&GameEvent::ItemPickedUp {
            item_id: wanted,
            position: Position::new(3, 2),
        }));
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.status().inventory, 1);
        assert_eq!(state.statistics.items_collected, 1);
    }

    #[test]
    fn test_staircase_advances_level() {
        let mut state = GameState::with_grid(test_grid(), GenerationConfig::for_testing(5)).unwrap();
        state.items.clear();
        state.player.set_position(Position::new(7, 8));

        let events = state.move_player(Direction::East).unwrap();
        assert_eq!(
            events.last(),
            Some(&GameEvent::LevelChanged { from: 1, to: 2 })
        );
        assert_eq!(state.level, 2);
        assert_eq!(state.grid.size(), 32);
        assert!(state.player.inventory.is_empty());
        assert_eq!(
            state.grid.tile_at(state.player.position),
            Some(TileKind::Floor)
        );
        assert_eq!(state.statistics.max_depth_reached, 2);
    }

    #[test]
    fn test_change_level_replaces_everything() {
        let mut state = GameState::new(GenerationConfig::for_testing(21)).unwrap();
        let old_player = state.player.id;
        state.change_level(7).unwrap();

        assert_eq!(state.level, 7);
        assert_eq!(state.statistics.levels_explored, 2);
        assert_eq!(state.statistics.max_depth_reached, 7);
        assert_ne!(state.player.id, old_player);
        assert_eq!(state.status().level, 7);
        assert_eq!(state.grid.count(TileKind::Staircase), 1);
    }

    #[test]
    fn test_failed_descent_keeps_move_and_pickup_statistics() {
        let config = GenerationConfig {
            size: 14,
            room_count_range: (20, 21),
            max_placement_attempts: 200,
            ..GenerationConfig::for_testing(9)
        };
        let mut state = GameState::with_grid(test_grid(), config).unwrap();
        state.player.set_position(Position::new(7, 8));
        state.items = vec![Item::new(Position::new(8, 8))];

        let result = state.move_player(Direction::East);
        assert!(matches!(result, Err(DungeonError::Configuration(_))));

        assert_eq!(state.level, 1);
        assert_eq!(state.player.position, Position::new(8, 8));
        assert_eq!(state.status().inventory, 1);
        assert!(state.items.is_empty());
        assert_eq!(state.statistics.steps_taken, 1);
        assert_eq!(state.statistics.items_collected, 1);
        assert_eq!(state.statistics.levels_explored, 1);
        assert_eq!(state.statistics.max_depth_reached, 1);
    }
}
