//! # Matrix-Vector Inner Product
//!
//! Each output element is the inner product of one matrix row with the
//! vector:
//!
//! `res[i] = Σ_j mat[i][j] * vec[j]`
//!
//! ## Optimization Strategies
//!
//! - **Loop interchange**: column-outer traversal reuses each vector element
//! - **Loop unrolling**: four products per iteration to cut loop overhead
//! - **Loop elimination**: compile-time trip counts the optimizer can flatten

pub mod code;
mod matrix;
#[cfg(test)]
mod test;

pub use code::*;
pub use matrix::{Matrix, TestCase};

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::warn;

use crate::config::RunConfig;
use crate::error::{HarnessError, Result};
use crate::math::{close_enough, random_values, Element, ElementType, Fill};
use crate::registry::{KernelRunner, VariantJob};
use crate::utils::runner::bind_variant;
use crate::utils::tester::{PerformanceTester, TestCaseGenerator};

/// Generates the matrix and vector for one repetition.
///
/// Sequential fill sets `vec[j] = j` and `mat[i][j] = i + j`.
#[derive(Clone, Debug)]
pub struct InnerProductGenerator<T> {
    rows: usize,
    cols: usize,
    fill: Fill,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element> InnerProductGenerator<T> {
    pub fn new(rows: usize, cols: usize, fill: Fill) -> Self {
        Self {
            rows,
            cols,
            fill,
            _marker: PhantomData,
        }
    }
}

impl<T: Element> TestCaseGenerator for InnerProductGenerator<T> {
    type Input = TestCase<T>;

    fn generate(&self, seed: u64) -> TestCase<T> {
        match self.fill {
            Fill::Sequential => TestCase {
                mat: Matrix::from_fn(self.rows, self.cols, |i, j| T::from_index(i + j)),
                vec: (0..self.cols).map(T::from_index).collect(),
            },
            Fill::Random => {
                let bound = self.rows.max(self.cols);
                let mut cells = random_values::<T>(self.rows * self.cols, bound, seed).into_iter();
                TestCase {
                    mat: Matrix::from_fn(self.rows, self.cols, |_, _| {
                        cells.next().unwrap_or_default()
                    }),
                    vec: random_values(self.cols, bound, seed.wrapping_add(1)),
                }
            }
        }
    }
}

/// Runner for the inner product kernel
pub struct InnerProductRunner;

impl InnerProductRunner {
    fn jobs_for<'a, T: Element>(&'a self, config: &'a RunConfig) -> Result<Vec<VariantJob<'a>>> {
        let generator = InnerProductGenerator::<T>::new(config.rows, config.cols, config.fill);
        let tester = Arc::new(
            PerformanceTester::new(generator)
                .with_warmup(config.warmup)
                .with_pin(config.pin),
        );

        code::available_variants::<T>()
            .iter()
            .filter(|v| {
                let supported = code::supports_shape(v.name, config.rows, config.cols);
                if !supported {
                    warn!(
                        variant = v.name,
                        rows = config.rows,
                        cols = config.cols,
                        "skipping variant compiled for {}x{}",
                        ELIMINATED_ROWS,
                        ELIMINATED_COLS
                    );
                }
                supported
            })
            .map(|v| bind_variant(&tester, v, v.function, config))
            .collect()
    }

    fn verify_typed<T: Element>(&self, rows: usize, cols: usize, seed: u64) -> Result<()> {
        let input = InnerProductGenerator::<T>::new(rows, cols, Fill::Random).generate(seed);
        let expected = inner_product_trivial(&input)?;

        for variant in code::available_variants::<T>() {
            if !code::supports_shape(variant.name, rows, cols) {
                continue;
            }
            let got = (variant.function)(&input)?;
            let mismatch = expected
                .iter()
                .zip(&got)
                .position(|(&e, &g)| !close_enough(e, g));
            if got.len() != expected.len() || mismatch.is_some() {
                let row = mismatch.unwrap_or(expected.len().min(got.len()));
                return Err(HarnessError::Verification {
                    kernel: self.name(),
                    variant: variant.name,
                    detail: format!(
                        "{}: row {} differs (expected {:?}, got {:?})",
                        T::NAME,
                        row,
                        expected.get(row),
                        got.get(row)
                    ),
                });
            }
        }
        Ok(())
    }
}

impl KernelRunner for InnerProductRunner {
    fn name(&self) -> &'static str {
        "inner_product"
    }

    fn description(&self) -> &'static str {
        "Multiplies a matrix by a vector"
    }

    fn category(&self) -> &'static str {
        "math"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants::<f64>().iter().map(|v| v.name).collect()
    }

    fn variant_jobs<'a>(&'a self, config: &'a RunConfig) -> Result<Vec<VariantJob<'a>>> {
        match config.element {
            ElementType::F32 => self.jobs_for::<f32>(config),
            ElementType::F64 => self.jobs_for::<f64>(config),
            ElementType::I32 => self.jobs_for::<i32>(config),
            ElementType::I64 => self.jobs_for::<i64>(config),
            ElementType::U32 => self.jobs_for::<u32>(config),
            ElementType::U64 => self.jobs_for::<u64>(config),
        }
    }

    fn verify(&self) -> Result<()> {
        // An unaligned shape for the unroll remainder, then the fixed shape.
        for (rows, cols) in [(37, 101), (1, 3), (ELIMINATED_ROWS, ELIMINATED_COLS)] {
            self.verify_typed::<f64>(rows, cols, 0x5eed)?;
            self.verify_typed::<i64>(rows, cols, 0x5eed)?;
        }
        Ok(())
    }
}
