//! Command line front end.
//!
//! Usage:
//!   kernel-lab                        # Verify and benchmark every kernel
//!   kernel-lab run array_sum          # Benchmark one kernel
//!   kernel-lab list                   # List kernels and their variants
//!   kernel-lab verify                 # Correctness check only
//!   kernel-lab report results         # Summarize saved CSV results

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use kernel_lab::config::{self, RunConfig};
use kernel_lab::error::{HarnessError, Result};
use kernel_lab::math::{ElementType, Fill};
use kernel_lab::registry::{build_registry, KernelRegistry, KernelRunner};
use kernel_lab::tui;
use kernel_lab::utils::report::{load_raw_data, load_statistics, StatisticsRow};
use kernel_lab::utils::{run_kernels, PinStrategy, STATISTICS_FILE};

#[derive(Parser)]
#[command(name = "kernel-lab")]
#[command(about = "Naive vs. optimized array sum and inner product benchmarks")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Verify and benchmark kernels (default)
    Run(RunArgs),
    /// List available kernels
    List,
    /// Check every variant against the reference implementation
    Verify {
        /// Kernel to check (omit for all)
        kernel: Option<String>,
    },
    /// Summarize CSV files written by earlier runs
    Report {
        /// Results directory (a kernel directory or the root holding them)
        #[arg(default_value = config::DEFAULT_OUTPUT_ROOT)]
        dir: PathBuf,
        /// Recompute statistics from raw_data.csv, merging repeated runs
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Kernel to run (omit for all)
    kernel: Option<String>,

    /// Timed calls per variant
    #[arg(short, long, default_value_t = config::DEFAULT_REPEAT)]
    repeat: usize,

    /// Seed passed to the generators and the shuffle
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Array length for array_sum
    #[arg(long, default_value_t = config::DEFAULT_SIZE)]
    size: usize,

    /// Matrix rows for inner_product
    #[arg(long, default_value_t = config::DEFAULT_ROWS)]
    rows: usize,

    /// Matrix columns for inner_product
    #[arg(long, default_value_t = config::DEFAULT_COLS)]
    cols: usize,

    /// Untimed calls per variant before measuring
    #[arg(long, default_value_t = 0)]
    warmup: usize,

    #[arg(long, value_enum, default_value_t = FillArg::Sequential)]
    fill: FillArg,

    #[arg(long, value_enum, default_value_t = ElementArg::F64)]
    element: ElementArg,

    /// Pin the measuring thread to its CPU core
    #[arg(long, value_enum, default_value_t = PinArg::Off)]
    pin: PinArg,

    /// Run variants in a seeded random order
    #[arg(long)]
    shuffle: bool,

    /// Root directory for CSV output
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_ROOT)]
    output: PathBuf,

    /// Do not write CSV files
    #[arg(long)]
    no_save: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FillArg {
    Sequential,
    Random,
}

#[derive(Clone, Copy, ValueEnum)]
enum ElementArg {
    F32,
    F64,
    I32,
    I64,
    U32,
    U64,
}

#[derive(Clone, Copy, ValueEnum)]
enum PinArg {
    Off,
    Global,
    PerRun,
}

impl RunArgs {
    fn to_config(&self) -> RunConfig {
        RunConfig {
            size: self.size,
            rows: self.rows,
            cols: self.cols,
            repeat: self.repeat,
            seed: self.seed,
            warmup: self.warmup,
            fill: match self.fill {
                FillArg::Sequential => Fill::Sequential,
                FillArg::Random => Fill::Random,
            },
            element: match self.element {
                ElementArg::F32 => ElementType::F32,
                ElementArg::F64 => ElementType::F64,
                ElementArg::I32 => ElementType::I32,
                ElementArg::I64 => ElementType::I64,
                ElementArg::U32 => ElementType::U32,
                ElementArg::U64 => ElementType::U64,
            },
            pin: match self.pin {
                PinArg::Off => PinStrategy::Off,
                PinArg::Global => PinStrategy::Global,
                PinArg::PerRun => PinStrategy::PerRun,
            },
            shuffle: self.shuffle,
            output_root: (!self.no_save).then(|| self.output.clone()),
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn select<'r>(registry: &'r KernelRegistry, name: Option<&str>) -> Result<Vec<&'r dyn KernelRunner>> {
    match name {
        Some(name) => registry
            .find(name)
            .map(|k| vec![k])
            .ok_or_else(|| HarnessError::UnknownKernel(name.to_string())),
        None => Ok(registry.all().iter().map(|k| k.as_ref()).collect()),
    }
}

fn run(registry: &KernelRegistry, args: &RunArgs) -> Result<()> {
    let config = args.to_config();
    debug!(?config, "run configuration");
    let kernels = select(registry, args.kernel.as_deref())?;

    tui::print_header();
    let reports = run_kernels(&kernels, &config)?;
    for (&kernel, report) in kernels.iter().zip(&reports) {
        tui::print_kernel_info_box(kernel, &config);
        tui::print_performance_lines(report);
        tui::print_results_table(report, config.repeat);
        if let Some(dir) = &report.output_dir {
            tui::print_saved_note(dir);
        }
    }

    println!("Note: Speedup is relative to the first variant ('trivial').");
    Ok(())
}

fn verify(registry: &KernelRegistry, name: Option<&str>) -> Result<()> {
    for kernel in select(registry, name)? {
        kernel.verify()?;
        println!("  ✅ {} ({})", kernel.name(), kernel.available_variants().join(", "));
    }
    Ok(())
}

fn report(registry: &KernelRegistry, dir: &Path, raw: bool) -> Result<()> {
    // A kernel directory itself, or the root with one directory per kernel.
    let dirs: Vec<(String, PathBuf)> = if dir.join(STATISTICS_FILE).is_file() {
        vec![(dir.display().to_string(), dir.to_path_buf())]
    } else {
        registry
            .list_names()
            .into_iter()
            .map(|name| (name.to_string(), dir.join(name)))
            .filter(|(_, d)| d.join(STATISTICS_FILE).is_file())
            .collect()
    };

    if dirs.is_empty() {
        return Err(HarnessError::io(
            dir.join(STATISTICS_FILE),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no results found"),
        ));
    }

    for (title, dir) in dirs {
        let rows = if raw {
            load_raw_data(&dir)?
                .iter()
                .filter_map(|(name, perf)| StatisticsRow::from_performance(name, perf))
                .collect()
        } else {
            load_statistics(&dir)?
        };
        tui::print_statistics_table(&title, &rows);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = build_registry();

    let outcome = match &cli.command {
        None => run(&registry, &cli.run),
        Some(Command::Run(args)) => run(&registry, args),
        Some(Command::List) => {
            tui::print_available_kernels(&registry);
            Ok(())
        }
        Some(Command::Verify { kernel }) => verify(&registry, kernel.as_deref()),
        Some(Command::Report { dir, raw }) => report(&registry, dir, *raw),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            if let HarnessError::UnknownKernel(_) = e {
                eprintln!("Available: {:?}", registry.list_names());
            }
            ExitCode::FAILURE
        }
    }
}
