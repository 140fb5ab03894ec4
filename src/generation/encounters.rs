//! # Encounter Generation
//!
//! Monster placement for a freshly generated level.

use crate::{
    DungeonResult, GenerationConfig, Grid, Monster, Populator, Position, RandomSource, Spawnable,
};
use log::debug;

/// Scatters monsters over the floor tiles of a level.
///
/// Monsters are placed independently, so two of them may share a tile.
#[derive(Debug, Clone)]
pub struct EncounterGenerator {
    /// Number of monsters to place; `None` uses the configured count
    pub count: Option<usize>,
}

impl EncounterGenerator {
    /// Creates a generator that uses `monsters_per_level` from the config.
    pub fn new() -> Self {
        Self { count: None }
    }

    /// Creates a generator that always places `count` monsters.
    pub fn with_count(count: usize) -> Self {
        Self { count: Some(count) }
    }
}

impl Default for EncounterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Populator<Monster> for EncounterGenerator {
    fn populate(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DungeonResult<Vec<Monster>> {
        let count = self.count.unwrap_or(config.monsters_per_level);
        let mut monsters = Vec::with_capacity(count);

        for _ in 0..count {
            let mut monster = Monster::new(Position::origin());
            monster.spawn(grid, rng, config.max_sample_attempts)?;
            monsters.push(monster);
        }

        debug!("{} placed {} monsters", self.populator_type(), monsters.len());
        Ok(monsters)
    }

    fn populator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}
