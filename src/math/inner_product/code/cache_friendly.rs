//! Column-outer traversal.

use crate::error::KernelError;
use crate::math::inner_product::TestCase;
use crate::math::Element;

/// Swap the loops: for each column, load `vec[j]` once and add its
/// contribution to every output row.
pub fn inner_product_cache_friendly<T: Element>(
    input: &TestCase<T>,
) -> Result<Vec<T>, KernelError> {
    input.check_dimensions()?;

    let mut res = vec![T::default(); input.mat.rows()];
    for (j, &v) in input.vec.iter().enumerate() {
        for (i, out) in res.iter_mut().enumerate() {
            *out = out.add_elem(input.mat.get(i, j).mul_elem(v));
        }
    }
    Ok(res)
}
