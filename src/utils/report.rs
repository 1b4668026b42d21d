//! Reading results directories back in.
//!
//! `statistics.csv` gives one summary row per run; `raw_data.csv` can be
//! folded back into [`Performance`] values, merging every run of the same
//! algorithm.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::performance::Performance;
use super::tester::{RAW_DATA_FILE, STATISTICS_FILE};
use crate::error::{HarnessError, Result};

/// One line of `statistics.csv`.
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticsRow {
    pub algorithm: String,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: u64,
    pub max: u64,
    pub samples: usize,
}

impl StatisticsRow {
    /// Summary of an in-memory run, as it would be written to disk.
    pub fn from_performance(algorithm: &str, perf: &Performance) -> Option<Self> {
        Some(Self {
            algorithm: algorithm.to_string(),
            mean: perf.mean(),
            median: perf.median()?,
            std_dev: perf.std_dev(),
            min: perf.min()?,
            max: perf.max()?,
            samples: perf.repeat(),
        })
    }
}

/// Parse `<dir>/statistics.csv`.
pub fn load_statistics(dir: impl AsRef<Path>) -> Result<Vec<StatisticsRow>> {
    let path = dir.as_ref().join(STATISTICS_FILE);
    let content = fs::read_to_string(&path).map_err(|e| HarnessError::io(&path, e))?;

    let mut rows = Vec::new();
    for (line_no, line) in data_lines(&content, &path)? {
        let fields: Vec<&str> = line.split(',').collect();
        let &[algorithm, mean, median, std_dev, min, max, samples] = fields.as_slice() else {
            return Err(parse_error(&path, line_no, format!("expected 7 fields, got {}", fields.len())));
        };
        rows.push(StatisticsRow {
            algorithm: algorithm.to_string(),
            mean: parse_field(mean, "mean", &path, line_no)?,
            median: parse_field(median, "median", &path, line_no)?,
            std_dev: parse_field(std_dev, "stddev", &path, line_no)?,
            min: parse_field(min, "min", &path, line_no)?,
            max: parse_field(max, "max", &path, line_no)?,
            samples: parse_field(samples, "samples", &path, line_no)?,
        });
    }
    debug!(path = %path.display(), rows = rows.len(), "statistics loaded");
    Ok(rows)
}

/// Parse `<dir>/raw_data.csv` into one [`Performance`] per algorithm, in
/// order of first appearance.
pub fn load_raw_data(dir: impl AsRef<Path>) -> Result<Vec<(String, Performance)>> {
    let path = dir.as_ref().join(RAW_DATA_FILE);
    let content = fs::read_to_string(&path).map_err(|e| HarnessError::io(&path, e))?;

    let mut groups: Vec<(String, Performance)> = Vec::new();
    for (line_no, line) in data_lines(&content, &path)? {
        let fields: Vec<&str> = line.split(',').collect();
        let &[algorithm, _test_number, duration] = fields.as_slice() else {
            return Err(parse_error(&path, line_no, format!("expected 3 fields, got {}", fields.len())));
        };
        let sample: u64 = parse_field(duration, "duration", &path, line_no)?;

        match groups.iter_mut().find(|(name, _)| name == algorithm) {
            Some((_, perf)) => perf.add_new_result(sample),
            None => {
                let mut perf = Performance::new();
                perf.add_new_result(sample);
                groups.push((algorithm.to_string(), perf));
            }
        }
    }
    Ok(groups)
}

/// Non-empty lines after the header, with 1-based line numbers.
fn data_lines<'c>(content: &'c str, path: &Path) -> Result<impl Iterator<Item = (usize, &'c str)>> {
    let mut lines = content.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header.starts_with("Algorithm,") => {}
        Some(_) => return Err(parse_error(path, 1, "missing header".to_string())),
        None => return Err(parse_error(path, 1, "file is empty".to_string())),
    }
    Ok(lines
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty()))
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str, path: &Path, line: usize) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| parse_error(path, line, format!("invalid {} '{}'", name, value)))
}

fn parse_error(path: &Path, line: usize, reason: String) -> HarnessError {
    HarnessError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let perf: Performance = [4u64, 8, 6].into_iter().collect();
        perf.generate_statistics(dir.path().join(STATISTICS_FILE), "Trivial")
            .unwrap();

        let rows = load_statistics(dir.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].algorithm, "Trivial");
        assert_eq!(rows[0].mean, 6.0);
        assert_eq!(rows[0].median, 6.0);
        assert_eq!((rows[0].min, rows[0].max, rows[0].samples), (4, 8, 3));
    }

    #[test]
    fn test_raw_data_groups_by_algorithm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RAW_DATA_FILE);
        let a: Performance = [1u64, 2].into_iter().collect();
        let b: Performance = [10u64].into_iter().collect();
        a.save_to_csv(&path, "Trivial").unwrap();
        b.save_to_csv(&path, "Recursive").unwrap();
        a.save_to_csv(&path, "Trivial").unwrap();

        let groups = load_raw_data(dir.path()).unwrap();
        let names: Vec<_> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Trivial", "Recursive"]);
        assert_eq!(groups[0].1.raw_samples(), &[1, 2, 1, 2]);
    }

    #[test]
    fn test_bad_row_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(STATISTICS_FILE),
            "Algorithm,Mean(us),Median(us),StdDev(us),Min(us),Max(us),Samples\nTrivial,1.00,x,0.00,1,1,1\n",
        )
        .unwrap();
        match load_statistics(dir.path()) {
            Err(HarnessError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_statistics(dir.path()),
            Err(HarnessError::Io { .. })
        ));
    }
}
