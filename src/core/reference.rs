/// English reference letter frequencies
///
/// The array order is the canonical English ranking. Correlation pairs observed
/// values with this order and the key mapper assigns letters by it, so it must
/// never be re-sorted.

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::core::table::Table;

/// Share of English text taken up by each letter, most frequent first
pub const ENGLISH_FREQUENCIES: [(char, f64); 26] = [
    ('E', 0.1259063863781522),
    ('T', 0.10006782449472729),
    ('A', 0.07925578930508564),
    ('O', 0.07528914392832355),
    ('I', 0.07378434974501549),
    ('N', 0.06892787863567965),
    ('S', 0.06096690441491981),
    ('R', 0.05995843525133622),
    ('H', 0.05484885815584606),
    ('L', 0.03803115181020215),
    ('D', 0.03686844618630578),
    ('U', 0.03051311306521236),
    ('C', 0.02966085775245839),
    ('M', 0.02456512239058604),
    ('W', 0.021092824643031576),
    ('F', 0.021057231613728626),
    ('G', 0.02053717790780219),
    ('Y', 0.019817407759675866),
    ('P', 0.01863097344957753),
    ('B', 0.015449352107997161),
    ('V', 0.011067454722700642),
    ('K', 0.009040629442949318),
    ('X', 0.0018271088375514369),
    ('J', 0.0013525351135121027),
    ('Q', 0.0008878483420569212),
    ('Z', 0.0005951945455659984),
];

lazy_static! {
    /// The 26 uppercase letters as table keys
    pub static ref REFERENCE_KEYS: HashSet<String> = ENGLISH_FREQUENCIES
        .iter()
        .map(|(letter, _)| letter.to_string())
        .collect();
}

/// Letters in canonical rank order
pub fn ranked_letters() -> impl Iterator<Item = char> {
    ENGLISH_FREQUENCIES.iter().map(|&(letter, _)| letter)
}

/// Reference frequencies in canonical rank order
pub fn ranked_frequencies() -> impl Iterator<Item = f64> {
    ENGLISH_FREQUENCIES.iter().map(|&(_, freq)| freq)
}

/// True when the table is keyed by exactly the 26 uppercase letters
pub fn is_letter_table<V: Copy>(table: &Table<V>) -> bool {
    table.has_key_set(&REFERENCE_KEYS)
}
