//! Inner product implementations.

mod cache_friendly;
mod eliminated_loop;
mod trivial;
mod unrolled_loop;

pub use cache_friendly::inner_product_cache_friendly;
pub use eliminated_loop::{inner_product_eliminated_loop, ELIMINATED_COLS, ELIMINATED_ROWS};
pub use trivial::inner_product_trivial;
pub use unrolled_loop::inner_product_unrolled_loop;

use super::TestCase;
use crate::error::KernelError;
use crate::math::Element;
use crate::utils::VariantInfo;

/// Signature shared by all inner product variants.
pub type InnerProductFn<T> = fn(&TestCase<T>) -> Result<Vec<T>, KernelError>;

/// All variants, reference first.
pub fn available_variants<T: Element>() -> Vec<VariantInfo<InnerProductFn<T>>> {
    vec![
        VariantInfo {
            name: "trivial",
            label: "Trivial",
            title: "Trivial",
            description: "Row-major double loop",
            function: inner_product_trivial::<T>,
        },
        VariantInfo {
            name: "cache_friendly",
            label: "CacheFriendly",
            title: "Cache-Friendly",
            description: "Column-outer loop, vector element hoisted",
            function: inner_product_cache_friendly::<T>,
        },
        VariantInfo {
            name: "unrolled_loop",
            label: "UnrolledLoop",
            title: "Unrolled Loop",
            description: "Column loop unrolled by four",
            function: inner_product_unrolled_loop::<T>,
        },
        VariantInfo {
            name: "eliminated_loop",
            label: "EliminatedLoop",
            title: "Eliminated Loop",
            description: "Compile-time trip counts (100x100 only)",
            function: inner_product_eliminated_loop::<T, ELIMINATED_ROWS, ELIMINATED_COLS>,
        },
    ]
}

/// Whether a variant can run on a `rows x cols` matrix.
pub fn supports_shape(variant: &str, rows: usize, cols: usize) -> bool {
    variant != "eliminated_loop" || (rows, cols) == (ELIMINATED_ROWS, ELIMINATED_COLS)
}
