/// Error types for the frequency analyzer
///
/// Every failure the engine can report is one of these variants. Features that
/// simply do not apply to a table (correlation over tetragrams, for example) are
/// not errors and never show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No file path on the command line and nothing usable on stdin
    #[error("no file specified")]
    NoInput,

    #[error("file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("file '{}' is a directory", .0.display())]
    IsDirectory(PathBuf),

    #[error("os error reading '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An all-zero (or otherwise flat) distribution was fed to a statistic
    #[error("cannot {operation}: empty distribution (division by 0)")]
    DegenerateStatistics { operation: &'static str },
}

impl AnalysisError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalysisError::NoInput => 2,
            AnalysisError::NotFound(_) => 3,
            AnalysisError::IsDirectory(_) => 4,
            AnalysisError::Unreadable { .. } => 5,
            AnalysisError::InvalidConfiguration(_) => 6,
            AnalysisError::DegenerateStatistics { .. } => 7,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AnalysisError::InvalidConfiguration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            AnalysisError::NoInput,
            AnalysisError::NotFound(PathBuf::from("a")),
            AnalysisError::IsDirectory(PathBuf::from("b")),
            AnalysisError::Unreadable {
                path: PathBuf::from("c"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            },
            AnalysisError::invalid("bad"),
            AnalysisError::DegenerateStatistics { operation: "normalise" },
        ];

        let mut codes: Vec<i32> = errors.iter().map(AnalysisError::exit_code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn test_degenerate_message() {
        let err = AnalysisError::DegenerateStatistics { operation: "normalise" };
        assert_eq!(err.to_string(), "cannot normalise: empty distribution (division by 0)");
    }
}
