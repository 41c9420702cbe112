//! Uniform-random permutation for sentence-scramble exercises.
//!
//! The random source is injected so scramble generation is reproducible in
//! tests; production callers pass a thread-local RNG.

use rand::seq::SliceRandom;
use rand::Rng;

/// Produce a uniform-random permutation of `items`.
///
/// Fisher-Yates via `SliceRandom::shuffle`, so every ordering of the input
/// multiset is equally likely. The result is not forced to differ from the
/// input ordering.
pub fn scramble<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled: Vec<T> = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}
