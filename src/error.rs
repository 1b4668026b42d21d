//! Error types for kernels and the measurement harness.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid input handed to a kernel variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("Number of matrix columns ({cols}) must match vector size ({len})")]
    DimensionMismatch { cols: usize, len: usize },

    #[error("Matrix row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Variant is compiled for a {rows}x{cols} matrix, got {found_rows}x{found_cols}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
}

/// Failures of the harness: measurement, persistence and verification.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No samples recorded for '{algorithm}'")]
    EmptySamples { algorithm: String },

    #[error("Repeat count must be at least 1")]
    NoRepetitions,

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("Variant '{variant}' of '{kernel}' failed verification: {detail}")]
    Verification {
        kernel: &'static str,
        variant: &'static str,
        detail: String,
    },

    #[error("Kernel '{0}' not found")]
    UnknownKernel(String),

    #[error("{path}:{line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = HarnessError> = std::result::Result<T, E>;
