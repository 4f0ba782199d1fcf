//! Seeded random sources.
//!
//! Every stochastic operation in the workspace takes its generator as an
//! argument, so a run is fully determined by the seed handed to
//! [`rng_from_seed`].

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Random number generator used throughout the simulation.
pub type SimRng = Xoshiro256PlusPlus;

/// Create a generator from an optional seed, falling back to OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => SimRng::seed_from_u64(seed),
        None => SimRng::from_seed(rand::rng().random()),
    }
}

/// Draw `n` child seeds from `rng` in a fixed order.
///
/// Work that is spread over threads gets one child generator per item, so the
/// outcome does not depend on how items are scheduled.
pub fn child_seeds<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.random()).collect()
}

/// Sample up to `amount` distinct indices from `0..len` without replacement.
///
/// Returns every index (in order) when `amount >= len`.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    if amount >= len {
        return (0..len).collect();
    }
    rand::seq::index::sample(rng, len, amount).into_vec()
}
