//! Random source used to pick a card page.

use std::{
    num::NonZeroU64,
    sync::{Mutex, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Uniform index source shared by concurrent requests.
pub trait IndexPicker: Send + Sync {
    /// Draw an index uniformly from `[0, upper)`.
    fn pick_below(&self, upper: NonZeroU64) -> u64;
}

/// `StdRng` seeded from the wall clock when constructed.
///
/// Build one per process so a restart does not replay the previous run's
/// sequence of picks. Draws are serialized through a mutex.
#[derive(Debug)]
pub struct ClockSeededPicker {
    rng: Mutex<StdRng>,
}

impl ClockSeededPicker {
    /// Seed from the current time in nanoseconds.
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    /// Fixed seed, for reproducible sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for ClockSeededPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexPicker for ClockSeededPicker {
    fn pick_below(&self, upper: NonZeroU64) -> u64 {
        // Poisoning cannot leave the rng state invalid
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..upper.get())
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
