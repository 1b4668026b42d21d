//! Reference implementation: one accumulator, one element at a time.

use crate::math::Element;

/// Sum the elements in order with a single accumulator.
///
/// Every addition depends on the previous one, so the loop runs at the
/// latency of one add per element.
///
/// # Example
/// ```
/// use kernel_lab::math::array_sum::sum_trivial;
///
/// assert_eq!(sum_trivial(&[1.0, 2.0, 3.5]), 6.5);
/// ```
pub fn sum_trivial<T: Element>(input: &[T]) -> T {
    let mut sum = T::default();
    for &val in input {
        sum = sum.add_elem(val);
    }
    sum
}
