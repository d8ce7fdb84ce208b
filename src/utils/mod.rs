/// Utility modules for the frequency analyzer
///
/// This module contains the collaborators around the engine: reading input text
/// and formatting or exporting results.

pub mod file_utils;
pub mod output_formatter;
