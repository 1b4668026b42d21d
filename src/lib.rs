//! # Kernel Lab
//!
//! Naive and micro-optimized versions of two numeric kernels, array sum and
//! matrix-vector inner product, measured by a shared harness that keeps
//! running statistics and appends raw samples and summaries to CSV files.

pub mod config;
pub mod error;
pub mod math;
pub mod registry;
pub mod utils;

/// Re-export tui from utils
pub use utils::tui;

pub use error::{HarnessError, KernelError};
pub use utils::runner::{run_kernel, run_kernels};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::RunConfig;
    pub use crate::error::{HarnessError, KernelError};
    pub use crate::math::{array_sum, inner_product, Element, ElementType, Fill};
    pub use crate::registry::{build_registry, KernelRegistry, KernelRunner};
    pub use crate::utils::{Performance, PerformanceTester, PinStrategy, TestCaseGenerator};
}

#[cfg(test)]
mod tests {
    use crate::registry::build_registry;

    #[test]
    fn test_all_kernels_registry_verify() {
        let registry = build_registry();
        let kernels = registry.all();

        println!("Verifying {} kernels...", kernels.len());

        for kernel in kernels {
            println!("Verifying kernel: {}", kernel.name());
            match kernel.verify() {
                Ok(_) => println!("  ✅ Kernel '{}' passed verification", kernel.name()),
                Err(e) => panic!("  ❌ Kernel '{}' failed verification: {}", kernel.name(), e),
            }
        }
    }
}
