use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::engine::RandomSource;

/// Shuffles with the thread-local OS-seeded generator.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }
}

/// Deterministic RNG for tests and replays.
/// The same seed always produces the same shoe.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

/// RNG picked at startup: seeded when a seed is configured, system otherwise.
#[derive(Clone, Debug)]
pub enum GameRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl GameRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => GameRng::Seeded(DeterministicRng::from_seed(s)),
            None => GameRng::System(SystemRng),
        }
    }
}

impl RandomSource for GameRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            GameRng::System(rng) => rng.shuffle(slice),
            GameRng::Seeded(rng) => rng.shuffle(slice),
        }
    }
}
