//! # Item Generation
//!
//! Item placement for a freshly generated level.

use crate::{
    DungeonResult, GenerationConfig, Grid, Item, Populator, Position, RandomSource, Spawnable,
};
use log::debug;

/// Scatters items over the floor tiles of a level.
#[derive(Debug, Clone, Default)]
pub struct ItemGenerator {
    /// Number of items to place; `None` uses the configured count
    pub count: Option<usize>,
}

impl ItemGenerator {
    /// Creates a generator that uses `items_per_level` from the config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that always places `count` items.
    pub fn with_count(count: usize) -> Self {
        Self { count: Some(count) }
    }
}

impl Populator<Item> for ItemGenerator {
    fn populate(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> DungeonResult<Vec<Item>> {
        let count = self.count.unwrap_or(config.items_per_level);
        let items = (0..count)
            .map(|_| -> DungeonResult<Item> {
                let mut item = Item::new(Position::origin());
                item.spawn(grid, rng, config.max_sample_attempts)?;
                Ok(item)
            })
            .collect::<DungeonResult<Vec<_>>>()?;

        debug!("{} placed {} items", self.populator_type(), items.len());
        Ok(items)
    }

    fn populator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}
