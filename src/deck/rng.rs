//! Deterministic random number generation for deck shuffling.
//!
//! Uses ChaCha8 behind a seeded wrapper: entropy-seeded in production,
//! fixed-seed in tests so shuffle-dependent scenarios are reproducible.
//! `shuffle` delegates to `rand`'s Fisher-Yates, which produces a uniform
//! permutation - comparator-based shuffles do not and are a correctness bug
//! here, not a style choice.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG for deck permutations.
///
/// ## Example
///
/// ```
/// use memoria::deck::DeckRng;
///
/// let mut rng = DeckRng::seeded(42);
/// let mut slots = vec![0, 1, 2, 3];
/// rng.shuffle(&mut slots);
/// // Same seed, same permutation
/// let mut rng2 = DeckRng::seeded(42);
/// let mut slots2 = vec![0, 1, 2, 3];
/// rng2.shuffle(&mut slots2);
/// assert_eq!(slots, slots2);
/// ```
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DeckRng {
    /// Create an RNG with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().next_u64();
        Self::seeded(seed)
    }

    /// The seed this RNG was created with.
    ///
    /// Recorded so a surprising deck can be reproduced.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place with a uniform permutation.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Generate a random usize in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }
}

impl Default for DeckRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = DeckRng::seeded(7);
        let mut b = DeckRng::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.gen_range(0..1000), b.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = DeckRng::seeded(1);
        let mut b = DeckRng::seeded(2);
        let seq_a: Vec<_> = (0..10).map(|_| a.gen_range(0..1000)).collect();
        let seq_b: Vec<_> = (0..10).map(|_| b.gen_range(0..1000)).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = DeckRng::seeded(42);
        let mut data: Vec<u32> = (0..16).collect();
        rng.shuffle(&mut data);

        let mut sorted = data.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_seed_is_recorded() {
        assert_eq!(DeckRng::seeded(99).seed(), 99);
    }
}
