//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use std::path::Path;

use terminal_size::{terminal_size, Width};

use super::report::StatisticsRow;
use super::runner::KernelReport;
use super::timer::unit_name;
use crate::config::RunConfig;
use crate::registry::{KernelRegistry, KernelRunner};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// `baseline / mean` as `1.23x`, or `-` when either side rounds to zero.
fn format_speedup(baseline: f64, mean: f64) -> String {
    if baseline > 0.0 && mean > 0.0 {
        format!("{:.2}x", baseline / mean)
    } else {
        "-".to_string()
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Kernel Lab: naive vs. optimized ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!("║{}{}{}║", " ".repeat(padding), title, " ".repeat(right_padding));
    println!("╚{}╝", border);
    println!();
}

/// Print kernel info box
pub fn print_kernel_info_box(kernel: &dyn KernelRunner, config: &RunConfig) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let input = match kernel.name() {
        "inner_product" => format!("Input:     {}x{} matrix, {}", config.rows, config.cols, config.element.name()),
        _ => format!("Input:     {} elements, {}", config.size, config.element.name()),
    };
    let lines = [
        format!("Kernel:    {}", kernel.name()),
        format!("Category:  {}", kernel.category()),
        kernel.description().to_string(),
        input,
        format!("Variants:  {}", kernel.available_variants().join(", ")),
    ];

    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(60)
        .min(max_content_width);
    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    for (i, line) in lines.iter().enumerate() {
        if i == lines.len() - 1 {
            println!("├{}┤", border);
        }
        println!("│ {:<width$} │", truncate(line, content_width), width = content_width);
    }
    println!("└{}┘", border);
    println!();
}

/// One `<Title> Algorithm: Performance: ...` line per variant.
pub fn print_performance_lines(report: &KernelReport) {
    for variant in &report.variants {
        println!("{} Algorithm: {}", variant.title, variant.performance);
    }
    println!();
}

/// Print results table for one kernel; speedup is relative to the first variant.
pub fn print_results_table(report: &KernelReport, repeat: usize) {
    let Some(baseline) = report.variants.first() else {
        return;
    };

    let term_width = get_term_width();
    let fixed_width = 80;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = variant_col_width + 72 + 7;

    let baseline_mean = baseline.performance.mean();
    let baseline_result = baseline.result_sample;
    let unit = unit_name();

    println!("  {} runs per variant, times in {}", repeat, unit);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>10} {:>10} {:>9} {:>8} {:>10}",
        "Variant",
        "Mean",
        "StdDev",
        "Median",
        "Min",
        "Speedup",
        "CV",
        "Rel. Error",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for variant in &report.variants {
        let perf = &variant.performance;

        let relative_error = match (variant.result_sample, baseline_result) {
            (Some(res), Some(base)) => {
                let diff = (res - base).abs();
                if base.abs() > 1e-9 {
                    diff / base.abs()
                } else {
                    diff
                }
            }
            _ => 0.0,
        };

        println!(
            "  {:<v_width$} {:>12.2} {:>12.2} {:>10.1} {:>10} {:>9} {:>7.2}% {:>10.2e}",
            truncate(variant.name, variant_col_width),
            perf.mean(),
            perf.std_dev(),
            perf.median().unwrap_or(0.0),
            perf.min().unwrap_or(0),
            format_speedup(baseline_mean, perf.mean()),
            perf.cv() * 100.0,
            relative_error,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Where the CSV files of a run went.
pub fn print_saved_note(dir: &Path) {
    println!("Detailed test data saved to {} directory", dir.display());
    println!();
}

/// Table for `statistics.csv` rows read back from disk.
pub fn print_statistics_table(title: &str, rows: &[StatisticsRow]) {
    let Some(baseline) = rows.first() else {
        println!("  {}: no rows", title);
        return;
    };

    let name_width = rows
        .iter()
        .map(|r| r.algorithm.chars().count())
        .max()
        .unwrap_or(9)
        .max(9);
    let table_width = name_width + 77;

    println!("  {}", title);
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<n_width$} {:>22} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "Algorithm",
        "Mean ± StdDev",
        "Median",
        "Min",
        "Max",
        "Samples",
        "Speedup",
        n_width = name_width
    );
    println!("  {}", "─".repeat(table_width));
    for row in rows {
        println!(
            "  {:<n_width$} {:>22} {:>10.2} {:>10} {:>10} {:>10} {:>9}",
            row.algorithm,
            format!("{:.2} ± {:.2}", row.mean, row.std_dev),
            row.median,
            row.min,
            row.max,
            row.samples,
            format_speedup(baseline.mean, row.mean),
            n_width = name_width
        );
    }
    println!();
}

/// Print the list of available kernels
pub fn print_available_kernels(registry: &KernelRegistry) {
    println!("Available kernels:");
    println!();
    for kernel in registry.all() {
        println!(
            "  {:<16} [{}] - {}",
            kernel.name(),
            kernel.category(),
            kernel.description()
        );
        println!("  {:<16} variants: {}", "", kernel.available_variants().join(", "));
    }
}
