/// File handling utilities
///
/// This module provides the text source for the analyzer: resolving which file to
/// read, reading it with the failure causes kept apart, and naming output files.

use std::fs;
use std::io::{BufRead, ErrorKind};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::error::{AnalysisError, Result};

/// Pick the input path: the command-line argument if given, otherwise the first
/// line read from `stdin`
pub fn resolve_input_path<R: BufRead>(arg: Option<&str>, stdin: R) -> Result<PathBuf> {
    if let Some(path) = arg.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let line = stdin
        .lines()
        .next()
        .transpose()
        .map_err(|source| AnalysisError::Unreadable {
            path: PathBuf::from("<stdin>"),
            source,
        })?;

    match line {
        Some(line) => {
            let path = line.trim_end_matches(['\r', '\n']);
            if path.is_empty() {
                Err(AnalysisError::NoInput)
            } else {
                debug!("Read input path from stdin: {}", path);
                Ok(PathBuf::from(path))
            }
        }
        None => Err(AnalysisError::NoInput),
    }
}

/// Read a whole text file as UTF-8
pub fn read_text(file_path: &Path) -> Result<String> {
    if file_path.is_dir() {
        return Err(AnalysisError::IsDirectory(file_path.to_path_buf()));
    }

    match fs::read_to_string(file_path) {
        Ok(content) => {
            info!("Read {} bytes from {}", content.len(), file_path.display());
            Ok(content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AnalysisError::NotFound(file_path.to_path_buf()))
        }
        Err(source) => Err(AnalysisError::Unreadable {
            path: file_path.to_path_buf(),
            source,
        }),
    }
}

/// Output file name for a stride section.
///
/// `extension` is appended when `base` does not already end with it; sections after
/// the first get an `_<index>` suffix before the extension.
pub fn section_output_path(base: &str, extension: &str, index: usize) -> PathBuf {
    let stem = base.strip_suffix(extension).unwrap_or(base);
    if index > 0 {
        PathBuf::from(format!("{}_{}{}", stem, index, extension))
    } else {
        PathBuf::from(format!("{}{}", stem, extension))
    }
}
