//! Random coordinate pairs for mine placement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of coordinate pairs.
pub trait PairSource {
    /// Draw `(x, y)`, each coordinate uniformly and independently from its inclusive range.
    fn next_pair(&mut self, x: RangeInclusive<u8>, y: RangeInclusive<u8>) -> (u8, u8);
}

/// Pseudo-random pairs.
#[derive(Debug)]
pub struct RandomPairs {
    rng: StdRng,
    seed: u64,
}

impl RandomPairs {
    /// Create a generator from an explicit seed.
    pub fn from_seed(seed: u64) -> RandomPairs {
        RandomPairs {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from the clock and the process id, so that repeated runs
    /// produce different boards.
    pub fn reseeded() -> RandomPairs {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        let seed = now ^ u64::from(process::id());
        log::debug!("seeding mine placement with {}", seed);
        RandomPairs::from_seed(seed)
    }

    /// Get the seed this generator started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PairSource for RandomPairs {
    fn next_pair(&mut self, x: RangeInclusive<u8>, y: RangeInclusive<u8>) -> (u8, u8) {
        (self.rng.gen_range(x), self.rng.gen_range(y))
    }
}
