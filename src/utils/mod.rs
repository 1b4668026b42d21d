//! Measurement harness and its support code.

#[cfg(feature = "cpu_cycles")]
pub mod cycles;

pub mod cpu_affinity;
pub mod performance;
pub mod report;
pub mod runner;
pub mod tester;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use cpu_affinity::{CorePin, PinStrategy};
pub use performance::Performance;
pub use runner::{run_kernel, run_kernels, KernelReport};
pub use tester::{PerformanceTester, TestCaseGenerator, RAW_DATA_FILE, STATISTICS_FILE};
pub use timer::{measure, unit_name};

/// Information about a kernel implementation variant.
/// Generic over F which is the function signature.
pub struct VariantInfo<F> {
    /// Unique identifier (e.g., "trivial", "two_way_chain")
    pub name: &'static str,
    /// Algorithm name written to the CSV files (e.g., "TwoWayChain")
    pub label: &'static str,
    /// Name printed on the console (e.g., "Two-Way Chain")
    pub title: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
