//! Superscalar variant: two independent accumulation chains.

use crate::math::Element;

/// Sum even and odd positions into separate accumulators and combine them.
///
/// The two chains have no data dependency on each other, so a superscalar
/// core can issue both adds in the same cycle. An odd trailing element is
/// added to the first chain.
pub fn sum_two_way_chain<T: Element>(input: &[T]) -> T {
    let mut sum1 = T::default();
    let mut sum2 = T::default();

    let mut pairs = input.chunks_exact(2);
    for pair in &mut pairs {
        sum1 = sum1.add_elem(pair[0]);
        sum2 = sum2.add_elem(pair[1]);
    }
    if let [last] = pairs.remainder() {
        sum1 = sum1.add_elem(*last);
    }

    sum1.add_elem(sum2)
}
