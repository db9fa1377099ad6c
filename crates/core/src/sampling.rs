//! Unbiased in-memory sampling for the random pet selector.
//!
//! The shuffle is a plain Fisher–Yates pass, so every permutation of the
//! input is equally likely and the sample prefix is a uniform draw without
//! replacement. Only the in-memory vector is rearranged; callers' persisted
//! data is untouched.

use rand::Rng;

/// Shuffle `items` in place using the supplied RNG.
///
/// Split out from [`sample`] so tests can drive it with a seeded RNG.
pub fn shuffle_with<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Return `min(n, items.len())` elements drawn uniformly without
/// replacement, using the supplied RNG.
pub fn sample_with<T, R: Rng>(mut items: Vec<T>, n: usize, rng: &mut R) -> Vec<T> {
    shuffle_with(&mut items, rng);
    items.truncate(n);
    items
}

/// Return `min(n, items.len())` elements drawn uniformly without
/// replacement, using the thread-local RNG.
pub fn sample<T>(items: Vec<T>, n: usize) -> Vec<T> {
    sample_with(items, n, &mut rand::rng())
}
