//! Array sum implementations.

mod recursive;
mod trivial;
mod two_way_chain;

pub use recursive::sum_recursive;
pub use trivial::sum_trivial;
pub use two_way_chain::sum_two_way_chain;

use crate::math::Element;
use crate::utils::VariantInfo;

/// Signature shared by all array sum variants.
pub type ArraySumFn<T> = fn(&[T]) -> T;

/// All variants, reference first.
pub fn available_variants<T: Element>() -> Vec<VariantInfo<ArraySumFn<T>>> {
    vec![
        VariantInfo {
            name: "trivial",
            label: "Trivial",
            title: "Trivial",
            description: "Single accumulator, element by element",
            function: sum_trivial::<T>,
        },
        VariantInfo {
            name: "two_way_chain",
            label: "TwoWayChain",
            title: "Two-Way Chain",
            description: "Two independent accumulation chains (even/odd positions)",
            function: sum_two_way_chain::<T>,
        },
        VariantInfo {
            name: "recursive",
            label: "Recursive",
            title: "Recursive",
            description: "Pairwise divide-and-conquer summation",
            function: sum_recursive::<T>,
        },
    ]
}
