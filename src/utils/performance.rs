//! Running timing statistics and their CSV export.
//!
//! [`Performance`] folds samples in with Welford's online algorithm, so mean
//! and variance are always current without a second pass, and keeps the raw
//! samples for the CSV files and the order statistics.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::timer::unit_name;
use crate::error::{HarnessError, Result};

/// Accumulated timing statistics for one algorithm variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Performance {
    mean: f64,
    /// Sum of squared distances from the running mean.
    m2: f64,
    raw: Vec<u64>,
}

impl Performance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample.
    pub fn add_new_result(&mut self, sample: u64) {
        self.raw.push(sample);

        let x = sample as f64;
        let n = self.raw.len() as f64;
        if self.raw.len() == 1 {
            self.mean = x;
            self.m2 = 0.0;
        } else {
            let delta = x - self.mean;
            self.mean += delta / n;
            self.m2 += delta * (x - self.mean);
        }
    }

    /// Number of samples seen.
    pub fn repeat(&self) -> usize {
        self.raw.len()
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance, zero below two samples.
    pub fn variance(&self) -> f64 {
        if self.raw.len() < 2 {
            0.0
        } else {
            self.m2 / (self.raw.len() - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Raw samples in recording order.
    pub fn raw_samples(&self) -> &[u64] {
        &self.raw
    }

    pub fn min(&self) -> Option<u64> {
        self.raw.iter().copied().min()
    }

    pub fn max(&self) -> Option<u64> {
        self.raw.iter().copied().max()
    }

    /// Median; the mean of the two middle samples for an even count.
    pub fn median(&self) -> Option<f64> {
        if self.raw.is_empty() {
            return None;
        }
        let mut sorted = self.raw.clone();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
        } else {
            Some(sorted[mid] as f64)
        }
    }

    /// Coefficient of variation (stddev / mean), zero when the mean is zero.
    pub fn cv(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev() / self.mean
        } else {
            0.0
        }
    }

    /// Append every raw sample to `path` as `Algorithm,TestNumber,Duration(us)`.
    ///
    /// The header is written only when the file is empty, so several
    /// algorithms can share one file.
    pub fn save_to_csv(&self, path: impl AsRef<Path>, algorithm_name: &str) -> Result<()> {
        let path = path.as_ref();
        let (mut out, empty) = open_append(path)?;

        let write = |out: &mut BufWriter<File>| -> std::io::Result<()> {
            if empty {
                writeln!(out, "Algorithm,TestNumber,Duration({})", unit_name())?;
            }
            for (i, sample) in self.raw.iter().enumerate() {
                writeln!(out, "{},{},{}", algorithm_name, i + 1, sample)?;
            }
            out.flush()
        };
        write(&mut out).map_err(|e| HarnessError::io(path, e))?;

        debug!(path = %path.display(), algorithm = algorithm_name, rows = self.raw.len(), "raw samples appended");
        Ok(())
    }

    /// Append one summary row to `path`.
    pub fn generate_statistics(&self, path: impl AsRef<Path>, algorithm_name: &str) -> Result<()> {
        let path = path.as_ref();
        let (Some(min), Some(max), Some(median)) = (self.min(), self.max(), self.median()) else {
            return Err(HarnessError::EmptySamples {
                algorithm: algorithm_name.to_string(),
            });
        };
        let (mut out, empty) = open_append(path)?;

        let unit = unit_name();
        let write = |out: &mut BufWriter<File>| -> std::io::Result<()> {
            if empty {
                writeln!(
                    out,
                    "Algorithm,Mean({unit}),Median({unit}),StdDev({unit}),Min({unit}),Max({unit}),Samples"
                )?;
            }
            writeln!(
                out,
                "{},{:.2},{:.2},{:.2},{},{},{}",
                algorithm_name,
                self.mean,
                median,
                self.std_dev(),
                min,
                max,
                self.repeat()
            )?;
            out.flush()
        };
        write(&mut out).map_err(|e| HarnessError::io(path, e))?;

        debug!(path = %path.display(), algorithm = algorithm_name, "summary appended");
        Ok(())
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = unit_name();
        write!(
            f,
            "Performance: mean={:.6}{unit}, stddev={:.6}{unit}, repeat={}",
            self.mean,
            self.std_dev(),
            self.repeat()
        )
    }
}

impl Extend<u64> for Performance {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for sample in iter {
            self.add_new_result(sample);
        }
    }
}

impl FromIterator<u64> for Performance {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut perf = Performance::new();
        perf.extend(iter);
        perf
    }
}

/// Open `path` for appending, reporting whether it was empty.
fn open_append(path: &Path) -> Result<(BufWriter<File>, bool)> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| HarnessError::io(path, e))?;
    let empty = file
        .metadata()
        .map_err(|e| HarnessError::io(path, e))?
        .len()
        == 0;
    Ok((BufWriter::new(file), empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_pass_variance(samples: &[u64]) -> f64 {
        let n = samples.len() as f64;
        let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
        samples
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0)
    }

    #[test]
    fn test_empty() {
        let perf = Performance::new();
        assert_eq!(perf.repeat(), 0);
        assert_eq!(perf.mean(), 0.0);
        assert_eq!(perf.std_dev(), 0.0);
        assert_eq!(perf.median(), None);
        assert_eq!(perf.min(), None);
    }

    #[test]
    fn test_single_sample_has_zero_stddev() {
        let mut perf = Performance::new();
        perf.add_new_result(7);
        assert_eq!(perf.mean(), 7.0);
        assert_eq!(perf.variance(), 0.0);
        assert_eq!(perf.std_dev(), 0.0);
        assert_eq!(perf.repeat(), 1);
    }

    #[test]
    fn test_welford_matches_two_pass() {
        let samples = [2u64, 4, 4, 4, 5, 5, 7, 9];
        let perf: Performance = samples.iter().copied().collect();
        assert!((perf.mean() - 5.0).abs() < 1e-12);
        assert!((perf.variance() - two_pass_variance(&samples)).abs() < 1e-9);
        assert!((perf.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_order_statistics() {
        let perf: Performance = [9u64, 1, 5, 3].into_iter().collect();
        assert_eq!(perf.min(), Some(1));
        assert_eq!(perf.max(), Some(9));
        assert_eq!(perf.median(), Some(4.0));

        let odd: Performance = [9u64, 1, 5].into_iter().collect();
        assert_eq!(odd.median(), Some(5.0));
    }

    #[test]
    fn test_raw_samples_keep_order() {
        let perf: Performance = [3u64, 1, 2].into_iter().collect();
        assert_eq!(perf.raw_samples(), &[3, 1, 2]);
    }

    #[cfg(not(feature = "cpu_cycles"))]
    #[test]
    fn test_display() {
        let perf: Performance = [1u64, 3].into_iter().collect();
        assert_eq!(
            perf.to_string(),
            "Performance: mean=2.000000us, stddev=1.414214us, repeat=2"
        );
    }

    #[test]
    fn test_statistics_on_empty_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Performance::new()
            .generate_statistics(dir.path().join("statistics.csv"), "Trivial")
            .unwrap_err();
        assert!(matches!(err, HarnessError::EmptySamples { .. }));
    }

    #[cfg(not(feature = "cpu_cycles"))]
    #[test]
    fn test_csv_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw_data.csv");

        let a: Performance = [10u64, 20].into_iter().collect();
        let b: Performance = [30u64].into_iter().collect();
        a.save_to_csv(&path, "Trivial").unwrap();
        b.save_to_csv(&path, "Recursive").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Algorithm,TestNumber,Duration(us)\n\
             Trivial,1,10\n\
             Trivial,2,20\n\
             Recursive,1,30\n"
        );
    }

    #[cfg(not(feature = "cpu_cycles"))]
    #[test]
    fn test_statistics_row_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.csv");

        let perf: Performance = [1u64, 2, 3, 10].into_iter().collect();
        perf.generate_statistics(&path, "TwoWayChain").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("Algorithm,Mean(us),Median(us),StdDev(us),Min(us),Max(us),Samples")
        );
        assert_eq!(lines.next(), Some("TwoWayChain,4.00,2.50,4.08,1,10,4"));
        assert_eq!(lines.next(), None);
    }
}
