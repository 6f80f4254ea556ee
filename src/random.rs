//! Random number generator construction.
//!
//! Every randomized routine in this crate takes its generator explicitly.
//! These helpers turn an optional seed into a concrete [`StdRng`].

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from fresh entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = create_rng(1234);
        let mut b = create_rng(1234);
        let seq_a: Vec<u64> = (0..32).map(|_| a.random()).collect();
        let seq_b: Vec<u64> = (0..32).map(|_| b.random()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_seeded_matches_create_rng() {
        let mut a = rng_from_seed(Some(7));
        let mut b = create_rng(7);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }
}
