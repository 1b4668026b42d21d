//! Pairwise (divide and conquer) summation.

use crate::math::Element;

/// Sum by recursively splitting the range in half and adding the halves.
pub fn sum_recursive<T: Element>(input: &[T]) -> T {
    match input {
        [] => T::default(),
        [single] => *single,
        _ => {
            let (left, right) = input.split_at(input.len() / 2);
            sum_recursive(left).add_elem(sum_recursive(right))
        }
    }
}
