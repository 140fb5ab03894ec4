//! # Random Source
//!
//! Uniform integer sampling used by every generation step, plus the
//! rejection sampler that finds floor tiles.

use crate::{DungeonError, DungeonResult, Grid, Position, TileKind};
use log::debug;
use rand::Rng;

/// Uniform random numbers for generation.
///
/// Every [`rand::Rng`] is a `RandomSource`, so a seeded
/// `StdRng::seed_from_u64` gives reproducible dungeons.
pub trait RandomSource {
    /// Returns a uniformly distributed float in `[0, 1)`.
    fn uniform01(&mut self) -> f64;

    /// Returns a uniformly distributed integer in `[low, high)`.
    ///
    /// Computed as `floor(uniform01() * (high - low)) + low`. Callers must
    /// pass `low < high`.
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use squashdelve::RandomSource;
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let value = rng.next_int(5, 10);
    /// assert!((5..10).contains(&value));
    /// ```
    fn next_int(&mut self, low: i32, high: i32) -> i32 {
        debug_assert!(low < high, "empty range [{low}, {high})");
        let span = f64::from(high - low);
        // The product can round up to `span` for values just below 1.0
        ((self.uniform01() * span).floor() as i32 + low).min(high - 1)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform01(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Samples uniformly random cells of `grid` until one is `Floor`.
///
/// Fails with [`DungeonError::EmptyFloor`] when the grid has no floor at all
/// or when `max_attempts` samples were all rejected.
pub fn sample_floor(
    grid: &Grid,
    rng: &mut dyn RandomSource,
    max_attempts: u32,
) -> DungeonResult<Position> {
    if grid.count(TileKind::Floor) == 0 {
        return Err(DungeonError::EmptyFloor { attempts: 0 });
    }

    let size = grid.size() as i32;
    for attempt in 1..=max_attempts {
        let pos = Position::new(rng.next_int(0, size), rng.next_int(0, size));
        if grid.tile_at(pos) == Some(TileKind::Floor) {
            debug!("Found floor tile at {:?} after {} samples", pos, attempt);
            return Ok(pos);
        }
    }

    Err(DungeonError::EmptyFloor {
        attempts: max_attempts,
    })
}
