//! Seedable random source for oscillator phases and carrier noise.
//!
//! Every random draw in the engine goes through one [`EngineRng`] owned by the
//! oscillator bank, so a fixed seed reproduces a render bit for bit.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Random generator owned by each engine instance.
pub type EngineRng = Pcg32;

/// Creates a deterministically initialized generator.
pub fn create_rng(seed: u64) -> EngineRng {
    Pcg32::seed_from_u64(seed)
}

/// Resolve an optional seed, falling back to system entropy.
pub fn seed_or_entropy(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
