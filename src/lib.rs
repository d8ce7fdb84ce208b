/// Frequency Analyzer - A frequency analysis tool for classical cryptanalysis
///
/// This library counts letters, tetragrams or words in a text, compares letter
/// distributions against English and guesses substitution keys from the ranking.

// Re-export core modules
pub mod config;
pub mod core;
pub mod utils;

// Re-export main analyzer types for convenience
pub use crate::config::AnalysisOptions;
pub use crate::core::analyzer::{Feature, FrequencyAnalyzer, OutputTable, SectionReport};
pub use crate::core::error::AnalysisError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analyze a single file and return one report per stride section
///
/// This is a convenience function for simple use cases.
///
/// # Arguments
///
/// * `file_path` - Path to the text file to analyze
/// * `options` - Analysis options
pub fn analyze_file<P: AsRef<std::path::Path>>(
    file_path: P,
    options: AnalysisOptions,
) -> crate::core::error::Result<Vec<SectionReport>> {
    let text = utils::file_utils::read_text(file_path.as_ref())?;
    let analyzer = FrequencyAnalyzer::new(options)?;
    analyzer.analyze_text(&text)
}
