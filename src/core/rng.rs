//! Seeded random sources
//!
//! Every randomized operation takes `&mut impl Rng`; these helpers build the
//! deterministic generator used for replays and tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for a given seed
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generator seeded from the OS, paired with the seed so a run can be replayed
pub fn fresh() -> (u64, ChaCha8Rng) {
    let seed: u64 = rand::random();
    (seed, seeded(seed))
}
