//! Inner loop unrolled by four.

use crate::error::KernelError;
use crate::math::inner_product::TestCase;
use crate::math::Element;

/// Row-major product with the column loop unrolled four times.
///
/// The four products of a chunk are summed before touching the output, so
/// they can be computed in parallel. Columns left over after the last full
/// chunk are handled one at a time.
pub fn inner_product_unrolled_loop<T: Element>(
    input: &TestCase<T>,
) -> Result<Vec<T>, KernelError> {
    input.check_dimensions()?;

    let mut res = vec![T::default(); input.mat.rows()];
    for (i, out) in res.iter_mut().enumerate() {
        let row = input.mat.row(i);
        let mut row_chunks = row.chunks_exact(4);
        let mut vec_chunks = input.vec.chunks_exact(4);

        for (m, v) in (&mut row_chunks).zip(&mut vec_chunks) {
            let chunk = m[0]
                .mul_elem(v[0])
                .add_elem(m[1].mul_elem(v[1]))
                .add_elem(m[2].mul_elem(v[2]))
                .add_elem(m[3].mul_elem(v[3]));
            *out = out.add_elem(chunk);
        }
        for (&m, &v) in row_chunks.remainder().iter().zip(vec_chunks.remainder()) {
            *out = out.add_elem(m.mul_elem(v));
        }
    }
    Ok(res)
}
