//! Numeric kernels, each with a naive reference and optimized variants.

pub mod array_sum;
pub mod element;
pub mod inner_product;

pub use element::{close_enough, Checksum, Element, ElementType};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How generators fill their inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fill {
    /// Arithmetic progression from the element index; ignores the seed.
    #[default]
    Sequential,
    /// Values drawn uniformly from `[0, bound)` with a seeded RNG.
    Random,
}

/// `len` random values in `[0, bound)`, reproducible for a given seed.
pub(crate) fn random_values<T: Element>(len: usize, bound: usize, seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bound = bound.max(1);
    (0..len)
        .map(|_| T::from_index(rng.random_range(0..bound)))
        .collect()
}
