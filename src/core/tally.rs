/// Frequency tally
///
/// Counts symbols into a `FrequencyTable` in one forward pass. Fixed key sets
/// (letters, tetragrams) only ever have existing entries incremented; word tables
/// grow as new words turn up.

use log::debug;

use crate::core::extractor::{ExtractorConfig, SymbolMode, MAX_WORD_LENGTH};
use crate::core::table::FrequencyTable;

/// Incremental counter over a key set
#[derive(Debug, Clone)]
pub struct Tally {
    table: FrequencyTable,
    ignore_case: bool,
    open_keys: bool,
}

impl Tally {
    /// Start from `keys`, all at zero. With `open_keys` unknown symbols are added.
    pub fn new(keys: Vec<String>, ignore_case: bool, open_keys: bool) -> Self {
        Self {
            table: FrequencyTable::with_keys(keys, 0),
            ignore_case,
            open_keys,
        }
    }

    /// Tally configured the way the extractor produces symbols
    pub fn for_config(config: &ExtractorConfig) -> Self {
        let keys = config.initial_keys();
        debug!("Frequency table starts with {} keys", keys.len());
        Self::new(keys, config.ignore_case, config.mode == SymbolMode::Words)
    }

    pub fn record(&mut self, symbol: &str) {
        if self.ignore_case {
            let folded = symbol.to_uppercase();
            match self.table.get_mut(&folded) {
                Some(count) => *count += 1,
                None if self.open_keys => self.table.insert(folded, 1),
                None => {}
            }
        } else {
            match self.table.get_mut(symbol) {
                Some(count) => *count += 1,
                None if self.open_keys && symbol.chars().count() <= MAX_WORD_LENGTH => {
                    self.table.insert(symbol, 1)
                }
                None => {}
            }
        }
    }

    /// Finish counting; entries come back sorted by descending count, ties in key order
    pub fn finish(mut self) -> FrequencyTable {
        self.table.sort_by_value_desc();
        self.table
    }
}

/// Extract and count the symbols of `text`
pub fn count_symbols(text: &str, config: &ExtractorConfig) -> FrequencyTable {
    let mut tally = Tally::for_config(config);
    for symbol in config.extract(text) {
        tally.record(&symbol);
    }
    tally.finish()
}
