//! Run configuration shared by the CLI and the library entry points.

use std::path::PathBuf;

use crate::math::{ElementType, Fill};
use crate::utils::cpu_affinity::PinStrategy;

/// Default number of elements for the array sum.
pub const DEFAULT_SIZE: usize = 10_000;
/// Default matrix shape for the inner product.
pub const DEFAULT_ROWS: usize = 100;
pub const DEFAULT_COLS: usize = 100;
/// Default repetitions per variant.
pub const DEFAULT_REPEAT: usize = 1000;
/// Default root for CSV output; each kernel writes to a subdirectory.
pub const DEFAULT_OUTPUT_ROOT: &str = "results";

/// Everything a benchmark run needs to know.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Array length for the array sum.
    pub size: usize,
    pub rows: usize,
    pub cols: usize,
    /// Timed calls per variant.
    pub repeat: usize,
    pub seed: u64,
    /// Untimed calls per variant before measuring.
    pub warmup: usize,
    pub fill: Fill,
    pub element: ElementType,
    pub pin: PinStrategy,
    /// Run variants in a seeded random order instead of declaration order.
    pub shuffle: bool,
    /// `None` disables CSV output.
    pub output_root: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            repeat: DEFAULT_REPEAT,
            seed: 0,
            warmup: 0,
            fill: Fill::default(),
            element: ElementType::default(),
            pin: PinStrategy::default(),
            shuffle: false,
            output_root: Some(PathBuf::from(DEFAULT_OUTPUT_ROOT)),
        }
    }
}

impl RunConfig {
    /// Directory a kernel writes its CSV files to, if output is enabled.
    pub fn output_dir(&self, kernel: &str) -> Option<PathBuf> {
        self.output_root.as_ref().map(|root| root.join(kernel))
    }
}
