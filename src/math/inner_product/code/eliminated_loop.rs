//! Loops with compile-time trip counts.

use crate::error::KernelError;
use crate::math::inner_product::TestCase;
use crate::math::Element;

/// Matrix shape the registered `eliminated_loop` variant is compiled for.
pub const ELIMINATED_ROWS: usize = 100;
pub const ELIMINATED_COLS: usize = 100;

/// Row-major product for a `ROWS x COLS` matrix known at compile time.
///
/// Rows and the vector are viewed as fixed-size arrays, so both loops have
/// constant bounds and no bounds checks, and the optimizer is free to
/// unroll them completely.
///
/// # Errors
/// [`KernelError::DimensionMismatch`] as for the other variants, and
/// [`KernelError::ShapeMismatch`] when the case is not `ROWS x COLS`.
pub fn inner_product_eliminated_loop<T: Element, const ROWS: usize, const COLS: usize>(
    input: &TestCase<T>,
) -> Result<Vec<T>, KernelError> {
    input.check_dimensions()?;

    let shape_error = || KernelError::ShapeMismatch {
        rows: ROWS,
        cols: COLS,
        found_rows: input.mat.rows(),
        found_cols: input.mat.cols(),
    };
    if input.mat.rows() != ROWS {
        return Err(shape_error());
    }
    let vec = <&[T; COLS]>::try_from(input.vec.as_slice()).map_err(|_| shape_error())?;

    let mut res = vec![T::default(); ROWS];
    for (i, out) in res.iter_mut().enumerate() {
        let row = <&[T; COLS]>::try_from(input.mat.row(i)).map_err(|_| shape_error())?;
        accumulate_row(row, vec, out);
    }
    Ok(res)
}

#[inline(always)]
fn accumulate_row<T: Element, const N: usize>(row: &[T; N], vec: &[T; N], out: &mut T) {
    for j in 0..N {
        *out = out.add_elem(row[j].mul_elem(vec[j]));
    }
}
