//! Generic measurement loop: generate an input, time one call, record it.

use std::convert::Infallible;
use std::hint::black_box;
use std::path::Path;

use tracing::{debug, info};

use super::cpu_affinity::{CorePin, PinStrategy};
use super::performance::Performance;
use super::timer::measure;
use crate::error::{HarnessError, KernelError, Result};

/// File name of the per-sample CSV inside an output directory.
pub const RAW_DATA_FILE: &str = "raw_data.csv";
/// File name of the summary CSV inside an output directory.
pub const STATISTICS_FILE: &str = "statistics.csv";

/// Produces a fresh input for each repetition.
pub trait TestCaseGenerator {
    type Input;

    fn generate(&self, seed: u64) -> Self::Input;
}

impl<T, F> TestCaseGenerator for F
where
    F: Fn(u64) -> T,
{
    type Input = T;

    fn generate(&self, seed: u64) -> T {
        self(seed)
    }
}

/// Runs a test function repeatedly against generated inputs and collects
/// its timings into a [`Performance`].
pub struct PerformanceTester<G> {
    generator: G,
    warmup: usize,
    pin: PinStrategy,
}

impl<G: TestCaseGenerator> PerformanceTester<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            warmup: 0,
            pin: PinStrategy::Off,
        }
    }

    /// Untimed calls made before measuring.
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn with_pin(mut self, pin: PinStrategy) -> Self {
        self.pin = pin;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Time `repeat` calls of `test_fn`, each on a freshly generated input.
    pub fn run<F, R>(&self, mut test_fn: F, repeat: usize, seed: u64) -> Performance
    where
        F: FnMut(&G::Input) -> R,
    {
        match self.try_run::<_, _, Infallible>(|input| Ok(test_fn(input)), repeat, seed) {
            Ok(perf) => perf,
            Err(never) => match never {},
        }
    }

    /// Like [`run`](Self::run) for kernels that can reject their input.
    /// The first error stops the run.
    pub fn try_run<F, R, E>(&self, mut test_fn: F, repeat: usize, seed: u64) -> Result<Performance, E>
    where
        F: FnMut(&G::Input) -> std::result::Result<R, E>,
    {
        if self.warmup > 0 {
            let input = self.generator.generate(seed);
            for _ in 0..self.warmup {
                black_box(test_fn(black_box(&input))?);
            }
        }

        let _global = (self.pin == PinStrategy::Global).then(CorePin::current);
        let mut perf = Performance::new();
        for _ in 0..repeat {
            let input = self.generator.generate(seed);
            let _per_run = (self.pin == PinStrategy::PerRun).then(CorePin::current);
            let (sample, result) = measure(|| test_fn(black_box(&input)));
            black_box(result?);
            perf.add_new_result(sample);
        }
        Ok(perf)
    }

    /// Run and append the samples and summary to `output_dir`.
    pub fn run_and_save<F, R>(
        &self,
        test_fn: F,
        algorithm_name: &str,
        output_dir: impl AsRef<Path>,
        repeat: usize,
        seed: u64,
    ) -> Result<Performance>
    where
        F: FnMut(&G::Input) -> R,
    {
        if repeat == 0 {
            return Err(HarnessError::NoRepetitions);
        }
        let perf = self.run(test_fn, repeat, seed);
        persist(&perf, algorithm_name, output_dir.as_ref())?;
        Ok(perf)
    }

    /// Fallible counterpart of [`run_and_save`](Self::run_and_save).
    pub fn try_run_and_save<F, R>(
        &self,
        test_fn: F,
        algorithm_name: &str,
        output_dir: impl AsRef<Path>,
        repeat: usize,
        seed: u64,
    ) -> Result<Performance>
    where
        F: FnMut(&G::Input) -> std::result::Result<R, KernelError>,
    {
        if repeat == 0 {
            return Err(HarnessError::NoRepetitions);
        }
        let perf = self.try_run(test_fn, repeat, seed)?;
        persist(&perf, algorithm_name, output_dir.as_ref())?;
        Ok(perf)
    }
}

fn persist(perf: &Performance, algorithm_name: &str, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir).map_err(|e| HarnessError::io(output_dir, e))?;
    perf.save_to_csv(output_dir.join(RAW_DATA_FILE), algorithm_name)?;
    perf.generate_statistics(output_dir.join(STATISTICS_FILE), algorithm_name)?;
    info!(
        algorithm = algorithm_name,
        dir = %output_dir.display(),
        samples = perf.repeat(),
        "results saved"
    );
    debug!(%perf, "summary");
    Ok(())
}
