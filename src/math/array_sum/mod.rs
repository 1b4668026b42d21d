//! # Array Sum
//!
//! Sum of all elements of a vector: `sum(v) = Σ v[i]`.
//!
//! ## Optimization Strategies
//!
//! - **Multiple accumulators**: independent chains let a superscalar core
//!   retire more than one add per cycle
//! - **Pairwise summation**: a balanced add tree instead of one long chain

pub mod code;
#[cfg(test)]
mod test;

pub use code::*;

use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{HarnessError, KernelError, Result};
use crate::math::{close_enough, random_values, Element, ElementType, Fill};
use crate::registry::{KernelRunner, VariantJob};
use crate::utils::runner::bind_variant;
use crate::utils::tester::{PerformanceTester, TestCaseGenerator};

/// Generates the input vector for one repetition.
#[derive(Clone, Debug)]
pub struct ArraySumGenerator<T> {
    size: usize,
    fill: Fill,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Element> ArraySumGenerator<T> {
    pub fn new(size: usize, fill: Fill) -> Self {
        Self {
            size,
            fill,
            _marker: PhantomData,
        }
    }
}

impl<T: Element> TestCaseGenerator for ArraySumGenerator<T> {
    type Input = Vec<T>;

    fn generate(&self, seed: u64) -> Vec<T> {
        match self.fill {
            Fill::Sequential => (0..self.size).map(T::from_index).collect(),
            Fill::Random => random_values(self.size, self.size, seed),
        }
    }
}

/// Runner for the array sum kernel
pub struct ArraySumRunner;

impl ArraySumRunner {
    fn jobs_for<'a, T: Element>(&'a self, config: &'a RunConfig) -> Result<Vec<VariantJob<'a>>> {
        let generator = ArraySumGenerator::<T>::new(config.size, config.fill);
        let tester = Arc::new(
            PerformanceTester::new(generator)
                .with_warmup(config.warmup)
                .with_pin(config.pin),
        );

        code::available_variants::<T>()
            .iter()
            .map(|v| {
                let f = v.function;
                bind_variant(&tester, v, move |input: &Vec<T>| Ok::<_, KernelError>(f(input)), config)
            })
            .collect()
    }

    fn verify_typed<T: Element>(&self, size: usize, seed: u64) -> Result<()> {
        let variants = code::available_variants::<T>();
        let reference = variants
            .iter()
            .find(|v| v.name == "trivial")
            .map(|v| v.function)
            .ok_or_else(|| HarnessError::Verification {
                kernel: self.name(),
                variant: "trivial",
                detail: "reference variant missing".to_string(),
            })?;

        let input = ArraySumGenerator::<T>::new(size, Fill::Random).generate(seed);
        let expected = reference(&input);

        for variant in &variants {
            let got = (variant.function)(&input);
            if !close_enough(expected, got) {
                return Err(HarnessError::Verification {
                    kernel: self.name(),
                    variant: variant.name,
                    detail: format!("{}: expected {}, got {}", T::NAME, expected, got),
                });
            }
        }
        Ok(())
    }
}

impl KernelRunner for ArraySumRunner {
    fn name(&self) -> &'static str {
        "array_sum"
    }

    fn description(&self) -> &'static str {
        "Sums all elements of a vector"
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
        // Odd sizes exercise the two-way chain's trailing element.
        for size in [0, 1, 2, 1023] {
            self.verify_typed::<f64>(size, 0x5eed)?;
            self.verify_typed::<f32>(size, 0x5eed)?;
            self.verify_typed::<i64>(size, 0x5eed)?;
            self.verify_typed::<u32>(size, 0x5eed)?;
        }
        Ok(())
    }
}
