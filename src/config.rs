/// Analysis configuration
///
/// `AnalysisOptions` carries every switch the engine understands. It can be loaded
/// from a JSON file and is then overridden by command-line flags.

use std::path::Path;

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{AnalysisError, Result};
use crate::core::extractor::{parse_charset, ExtractorConfig, Stride, SymbolMode};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Count upper and lower case separately
    pub case_sensitive: bool,
    /// Comma-separated custom symbol set
    pub charset: Option<String>,
    /// Guess a substitution key from the letter ranking
    pub auto_map: bool,
    /// Score the distribution against English
    pub correlation: bool,
    pub normalize: bool,
    pub log_base: Option<u32>,
    pub tetragram: bool,
    /// Count words; takes precedence over `tetragram`
    pub word: bool,
    pub nth_letter: Stride,
    pub strip_zeros: bool,
    /// Report the sample length
    pub length: bool,
    /// Uppercase the input before analysis
    pub uppercase: bool,
    /// Keep only ASCII letters and spaces of the input
    pub alphabetic_only: bool,
}

impl AnalysisOptions {
    pub fn mode(&self) -> SymbolMode {
        if self.word {
            SymbolMode::Words
        } else if self.tetragram {
            SymbolMode::Tetragrams
        } else {
            SymbolMode::Letters
        }
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            ignore_case: !self.case_sensitive,
            charset: self.charset.as_deref().and_then(parse_charset),
            mode: self.mode(),
        }
    }

    /// Reject option sets that cannot run; warn about features that will not apply
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = self.log_base {
            if base < 2 {
                return Err(AnalysisError::invalid(format!(
                    "log base must be at least 2, got {}",
                    base
                )));
            }
        }

        if self.normalize && self.log_base.is_some() {
            warn!("Both normalise and log base requested; only normalising");
        }

        if self.mode() != SymbolMode::Letters {
            if self.auto_map {
                warn!("Automatic key mapping does not work with tetragram or word analysis");
            }
            if self.correlation {
                warn!("Correlation does not work with tetragram or word analysis");
            }
        }

        Ok(())
    }
}

/// Default options as JSON
pub fn default_config() -> Value {
    serde_json::to_value(AnalysisOptions::default()).unwrap_or_default()
}

/// Load options from a JSON file.
///
/// A missing or unreadable file, or invalid JSON, is logged and the defaults are used instead.
pub fn load_config(config_path: Option<&Path>) -> Result<AnalysisOptions> {
    let path = match config_path {
        Some(path) => path,
        None => return Ok(AnalysisOptions::default()),
    };

    if !path.exists() {
        error!("Configuration file not found: {}", path.display());
        return Ok(AnalysisOptions::default());
    }

    let config_str = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read configuration file {}: {}", path.display(), e);
            return Ok(AnalysisOptions::default());
        }
    };

    match serde_json::from_str(&config_str) {
        Ok(options) => {
            info!("Loaded configuration from {}", path.display());
            Ok(options)
        }
        Err(e) => {
            error!("Invalid JSON in configuration file: {}", e);
            Ok(AnalysisOptions::default())
        }
    }
}
