//! Seeded randomness for the engine.
//!
//! Sedimentation ensembles and quiz draws both pull from one `ChaCha8Rng`
//! held as a resource. The seed comes from `EngineConfig::seed`, so a run
//! with the same seed and the same navigation replays the same particles
//! and questions on every platform.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::DEFAULT_SEED;

/// The engine RNG. Systems take `ResMut<SimRng>` and draw from `rng.0`.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Restart the stream from `seed`, discarding any draws made so far.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }
}
