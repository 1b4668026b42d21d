//! Drives kernels: binds variants to a tester, orders and runs them.

use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, info_span};

use super::tester::{PerformanceTester, TestCaseGenerator};
use crate::config::RunConfig;
use crate::error::{HarnessError, KernelError, Result};
use crate::math::Checksum;
use crate::registry::{KernelRunner, VariantJob, VariantReport};
use crate::utils::VariantInfo;

/// Everything measured for one kernel.
#[derive(Clone, Debug)]
pub struct KernelReport {
    pub kernel: &'static str,
    /// Where the CSV files went, if anywhere.
    pub output_dir: Option<PathBuf>,
    pub variants: Vec<VariantReport>,
}

/// Bind a variant to a shared tester.
///
/// One untimed call is made up front to capture the result sample, so a
/// variant that rejects the configured input fails here rather than
/// midway through a run.
pub fn bind_variant<'a, G, F, R, V>(
    tester: &Arc<PerformanceTester<G>>,
    info: &VariantInfo<V>,
    test_fn: F,
    config: &'a RunConfig,
) -> Result<VariantJob<'a>>
where
    G: TestCaseGenerator + 'a,
    F: Fn(&G::Input) -> std::result::Result<R, KernelError> + 'a,
    R: Checksum,
{
    let tester = Arc::clone(tester);
    let label = info.label;

    let sample = test_fn(&tester.generator().generate(config.seed))?.checksum();

    Ok(VariantJob {
        name: info.name,
        label,
        title: info.title,
        description: info.description,
        result_sample: Some(sample),
        run: Box::new(move |dir| match dir {
            Some(dir) => tester.try_run_and_save(&test_fn, label, dir, config.repeat, config.seed),
            None if config.repeat == 0 => Err(HarnessError::NoRepetitions),
            None => Ok(tester.try_run(&test_fn, config.repeat, config.seed)?),
        }),
    })
}

/// Run every variant of `kernel` under `config`.
///
/// Reports come back in declaration order even when `config.shuffle`
/// randomizes the execution order.
pub fn run_kernel(kernel: &dyn KernelRunner, config: &RunConfig) -> Result<KernelReport> {
    let span = info_span!("kernel", name = kernel.name());
    let _enter = span.enter();

    let mut jobs = kernel.variant_jobs(config)?;
    let output_dir = config.output_dir(kernel.name());

    let mut order: Vec<usize> = (0..jobs.len()).collect();
    if config.shuffle {
        order.shuffle(&mut StdRng::seed_from_u64(config.seed));
    }

    let mut performances = vec![None; jobs.len()];
    for idx in order {
        let job = &mut jobs[idx];
        info!(variant = job.name, repeat = config.repeat, "measuring");
        let perf = (job.run)(output_dir.as_deref())?;
        info!(variant = job.name, mean = perf.mean(), std_dev = perf.std_dev(), "done");
        performances[idx] = Some(perf);
    }

    let variants = jobs
        .into_iter()
        .zip(performances)
        .map(|(job, perf)| VariantReport {
            name: job.name,
            label: job.label,
            title: job.title,
            description: job.description,
            performance: perf.unwrap_or_default(),
            result_sample: job.result_sample,
        })
        .collect();

    Ok(KernelReport {
        kernel: kernel.name(),
        output_dir,
        variants,
    })
}

/// Verify then run each kernel in turn.
pub fn run_kernels(kernels: &[&dyn KernelRunner], config: &RunConfig) -> Result<Vec<KernelReport>> {
    kernels
        .iter()
        .map(|kernel| {
            kernel.verify()?;
            run_kernel(*kernel, config)
        })
        .collect()
}
