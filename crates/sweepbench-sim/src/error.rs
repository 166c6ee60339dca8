//! Error types for the sweep harness and plotter.

use std::path::PathBuf;

/// Errors that end the operation that raised them.
///
/// Subject program failures are not represented here; see
/// [`SubjectFailure`](crate::subject::SubjectFailure), which a sweep records
/// and moves past.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Creating, writing or reading a file failed.
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sweep bounds are empty or start at zero.
    #[error("invalid size range: start={start} end={end} (need 1 <= start <= end)")]
    InvalidRange { start: usize, end: usize },

    /// A line in a metrics or input file does not have the expected shape.
    #[error("format error at line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// Configuration file could not be parsed.
    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl BenchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
