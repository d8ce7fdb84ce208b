/// Core module for frequency analysis
///
/// This module contains the analysis engine: symbol extraction, tallying, the
/// statistical transforms, and the English correlation and key-mapping statistics.

pub mod analyzer;
pub mod correlation;
pub mod error;
pub mod extractor;
pub mod key_map;
pub mod reference;
pub mod table;
pub mod tally;
pub mod transforms;
