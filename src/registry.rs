//! Kernel registry for discovering and running kernels by name.
//!
//! Each kernel exposes its variants as ready-to-run jobs so the runner can
//! decide the execution order and where results are written.

use std::path::Path;

use crate::config::RunConfig;
use crate::error::Result;
use crate::utils::performance::Performance;

/// One variant of a kernel, bound to a configured tester.
pub struct VariantJob<'a> {
    pub name: &'static str,
    /// Algorithm name written to the CSV files.
    pub label: &'static str,
    /// Console name of the algorithm.
    pub title: &'static str,
    pub description: &'static str,
    /// Result of one untimed call, for cross-variant comparison.
    pub result_sample: Option<f64>,
    /// Runs every repetition; appends to the directory when one is given.
    pub run: Box<dyn FnMut(Option<&Path>) -> Result<Performance> + 'a>,
}

/// Measured outcome of one variant.
#[derive(Clone, Debug)]
pub struct VariantReport {
    pub name: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub performance: Performance,
    pub result_sample: Option<f64>,
}

/// Trait that every benchmarked kernel implements.
pub trait KernelRunner: Send + Sync {
    /// Name of the kernel (e.g. "array_sum"), also its output directory.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Category (e.g. "math")
    fn category(&self) -> &'static str;

    fn available_variants(&self) -> Vec<&'static str>;

    /// Jobs for every variant that can run under `config`, reference first.
    fn variant_jobs<'a>(&'a self, config: &'a RunConfig) -> Result<Vec<VariantJob<'a>>>;

    /// Check every variant against the reference implementation.
    fn verify(&self) -> Result<()>;
}

/// Registry of all kernels.
pub struct KernelRegistry {
    kernels: Vec<Box<dyn KernelRunner>>,
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self {
            kernels: Vec::new(),
        }
    }

    pub fn register<K: KernelRunner + 'static>(&mut self, kernel: K) {
        self.kernels.push(Box::new(kernel));
    }

    pub fn all(&self) -> &[Box<dyn KernelRunner>] {
        &self.kernels
    }

    /// Find kernel by name
    pub fn find(&self, name: &str) -> Option<&dyn KernelRunner> {
        self.kernels
            .iter()
            .find(|k| k.name() == name)
            .map(|k| k.as_ref())
    }

    pub fn list_names(&self) -> Vec<&'static str> {
        self.kernels.iter().map(|k| k.name()).collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&dyn KernelRunner> {
        self.kernels
            .iter()
            .filter(|k| k.category() == category)
            .map(|k| k.as_ref())
            .collect()
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the default registry with all kernels
pub fn build_registry() -> KernelRegistry {
    let mut registry = KernelRegistry::new();

    registry.register(crate::math::array_sum::ArraySumRunner);
    registry.register(crate::math::inner_product::InnerProductRunner);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = build_registry();
        assert_eq!(registry.list_names(), vec!["array_sum", "inner_product"]);
        assert!(registry.find("array_sum").is_some());
        assert!(registry.find("matmul").is_none());
        assert_eq!(registry.by_category("math").len(), 2);
        assert!(registry.by_category("sorting").is_empty());
    }
}
