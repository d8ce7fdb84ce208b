/// Core frequency analyzer implementation
///
/// This file contains the `FrequencyAnalyzer` which coordinates a run: input
/// preprocessing, stride sections, tallying, transforms and the derived statistics.

use log::{debug, info};

use crate::config::AnalysisOptions;
use crate::core::correlation::correlation;
use crate::core::error::Result;
use crate::core::extractor::{preprocess, ExtractorConfig, SymbolMode};
use crate::core::key_map::KeyMap;
use crate::core::table::{FrequencyTable, ScaledTable};
use crate::core::tally::count_symbols;
use crate::core::transforms::{log_rescale, normalize, strip_zeros};

/// Outcome of an optional per-section feature
#[derive(Debug, Clone, PartialEq)]
pub enum Feature<T> {
    /// Not requested
    Off,
    /// Requested, but the table is not keyed by A-Z
    NotApplicable,
    Value(T),
}

impl<T> Feature<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Feature::Value(v) => Some(v),
            _ => None,
        }
    }

    fn from_option(value: Option<T>) -> Self {
        value.map_or(Feature::NotApplicable, Feature::Value)
    }
}

/// The table that gets printed or saved
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTable {
    Counts(FrequencyTable),
    Scaled(ScaledTable),
}

impl OutputTable {
    /// Sum of the values; for raw counts this is the sample length
    pub fn total(&self) -> f64 {
        match self {
            OutputTable::Counts(table) => table.total(),
            OutputTable::Scaled(table) => table.total(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OutputTable::Counts(table) => table.len(),
            OutputTable::Scaled(table) => table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn without_zeros(&self) -> Self {
        match self {
            OutputTable::Counts(table) => OutputTable::Counts(strip_zeros(table)),
            OutputTable::Scaled(table) => OutputTable::Scaled(strip_zeros(table)),
        }
    }
}

/// Everything computed for one stride section
#[derive(Debug, Clone)]
pub struct SectionReport {
    /// Zero-based section index
    pub index: usize,
    /// Raw counts in tally order
    pub frequencies: FrequencyTable,
    pub output: OutputTable,
    pub correlation: Feature<f64>,
    pub key_map: Feature<KeyMap>,
}

impl SectionReport {
    pub fn sample_length(&self) -> f64 {
        self.output.total()
    }
}

/// Runs one option set over input texts
#[derive(Debug, Clone)]
pub struct FrequencyAnalyzer {
    options: AnalysisOptions,
    extractor: ExtractorConfig,
}

impl FrequencyAnalyzer {
    /// Create an analyzer, rejecting options that cannot run
    pub fn new(options: AnalysisOptions) -> Result<Self> {
        options.validate()?;
        let extractor = options.extractor_config();
        Ok(Self { options, extractor })
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze a whole text, one report per stride section
    pub fn analyze_text(&self, text: &str) -> Result<Vec<SectionReport>> {
        let text = preprocess(text, self.options.uppercase, self.options.alphabetic_only);
        let sections = self.options.nth_letter.partition(&text);
        info!(
            "Analyzing {} characters as {} section(s) in {:?} mode",
            text.chars().count(),
            sections.len(),
            self.extractor.mode
        );

        sections
            .iter()
            .enumerate()
            .map(|(index, section)| self.analyze_section(index, section))
            .collect()
    }

    /// Analyze one already-partitioned section
    pub fn analyze_section(&self, index: usize, section: &str) -> Result<SectionReport> {
        let frequencies = count_symbols(section, &self.extractor);
        debug!(
            "Section {}: {} symbols counted over {} keys",
            index + 1,
            frequencies.sum(),
            frequencies.len()
        );

        let output = if self.options.normalize {
            OutputTable::Scaled(normalize(&frequencies)?)
        } else if let Some(base) = self.options.log_base {
            OutputTable::Scaled(log_rescale(&frequencies, base)?)
        } else {
            OutputTable::Counts(frequencies.clone())
        };
        let output = if self.options.strip_zeros {
            output.without_zeros()
        } else {
            output
        };

        let correlation = if self.options.correlation {
            Feature::from_option(correlation(&frequencies)?)
        } else {
            Feature::Off
        };

        let key_map = if !self.options.auto_map {
            Feature::Off
        } else if self.extractor.mode != SymbolMode::Letters {
            Feature::NotApplicable
        } else {
            Feature::from_option(KeyMap::from_table(&frequencies))
        };

        Ok(SectionReport {
            index,
            frequencies,
            output,
            correlation,
            key_map,
        })
    }
}
