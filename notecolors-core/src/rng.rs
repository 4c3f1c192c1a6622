//! Seeded randomness for challenge selection.
//!
//! The session is generic over any `rand::Rng`; production code builds a
//! PCG32 here so a run can be replayed from its seed.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Creates a PCG32 RNG seeded from operating system entropy.
pub fn create_entropy_rng() -> Pcg32 {
    Pcg32::from_entropy()
}
