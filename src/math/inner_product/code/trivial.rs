//! Reference implementation: row by row, column by column.

use crate::error::KernelError;
use crate::math::inner_product::TestCase;
use crate::math::Element;

/// Multiply the matrix by the vector in row-major order.
///
/// Each output element accumulates `mat[i][j] * vec[j]` over `j`.
///
/// # Errors
/// [`KernelError::DimensionMismatch`] if the matrix column count differs
/// from the vector length.
pub fn inner_product_trivial<T: Element>(input: &TestCase<T>) -> Result<Vec<T>, KernelError> {
    input.check_dimensions()?;

    let mut res = vec![T::default(); input.mat.rows()];
    for (i, out) in res.iter_mut().enumerate() {
        for (&m, &v) in input.mat.row(i).iter().zip(&input.vec) {
            *out = out.add_elem(m.mul_elem(v));
        }
    }
    Ok(res)
}
