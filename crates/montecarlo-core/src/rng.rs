use rand::SeedableRng;
use rand::rngs::StdRng;

/// Reproducible RNG: the same seed always yields the same rolls.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// RNG seeded from OS entropy, for unseeded runs.
#[must_use]
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Seeded when `seed` is given, entropy otherwise.
#[must_use]
pub fn rng_for(seed: Option<u64>) -> StdRng {
    seed.map_or_else(entropy_rng, seeded_rng)
}
