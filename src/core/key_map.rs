/// Rank-order substitution key guess
///
/// Pairs the most frequent observed letter with 'E', the next with 'T', and so on
/// down the English ranking.

use log::warn;
use serde::Serialize;

use crate::core::reference::{is_letter_table, ranked_letters};
use crate::core::table::FrequencyTable;

/// Observed letter to English letter, ordered by observed letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyMap {
    pairs: Vec<(char, char)>,
}

impl KeyMap {
    /// Build the mapping from a tally-ordered table. `None` unless keyed by A-Z.
    pub fn from_table(table: &FrequencyTable) -> Option<Self> {
        if !is_letter_table(table) {
            warn!("Automatic key mapping needs a table keyed by A-Z; skipping");
            return None;
        }

        let mut pairs: Vec<(char, char)> = table
            .keys()
            .filter_map(|key| key.chars().next())
            .zip(ranked_letters())
            .collect();
        pairs.sort_by_key(|&(observed, _)| observed);

        Some(Self { pairs })
    }

    /// English letter assigned to `observed`
    pub fn get(&self, observed: char) -> Option<char> {
        self.pairs
            .iter()
            .find(|(from, _)| *from == observed)
            .map(|&(_, to)| to)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.pairs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Assigned letters concatenated in A-Z order of the observed letters
    pub fn as_key(&self) -> String {
        self.pairs.iter().map(|&(_, to)| to).collect()
    }
}
