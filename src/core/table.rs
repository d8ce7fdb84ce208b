/// Ordered symbol tables
///
/// A `Table` keeps its entries in insertion order (or whatever order the last sort
/// left them in) and offers constant-time lookup by symbol. The order matters:
/// correlation and key mapping pair entries position by position.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::transforms::LOG_ZERO_SENTINEL;

/// Symbol counts produced by a tally
pub type FrequencyTable = Table<u64>;

/// Derived values (normalised or log-rescaled)
pub type ScaledTable = Table<f64>;

/// Values that can live in a printable table
pub trait TableValue: Copy + PartialOrd + fmt::Display + Serialize {
    fn is_zero(&self) -> bool;
    fn as_f64(&self) -> f64;

    /// Write the value as it appears in saved tables
    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize(serializer)
    }
}

impl TableValue for u64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }

    fn as_f64(&self) -> f64 {
        *self as f64
    }
}

impl TableValue for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn as_f64(&self) -> f64 {
        *self
    }

    // The log(0) stand-in is saved as the integer -1
    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if *self == LOG_ZERO_SENTINEL {
            serializer.serialize_i64(LOG_ZERO_SENTINEL as i64)
        } else {
            serializer.serialize_f64(*self)
        }
    }
}

struct SavedValue<'a, V>(&'a V);

impl<V: TableValue> Serialize for SavedValue<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_value(serializer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Copy> Table<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table with every key set to `initial`; repeated keys keep their first position
    pub fn with_keys<I, S>(keys: I, initial: V) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for key in keys {
            let key = key.into();
            if !table.index.contains_key(&key) {
                table.push(key, initial);
            }
        }
        table
    }

    fn push(&mut self, key: String, value: V) {
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    /// Insert a new entry at the end, or overwrite the value of an existing one in place
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => self.push(key, value),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    /// True when the key set equals `keys` exactly, ignoring order
    pub fn has_key_set(&self, keys: &HashSet<String>) -> bool {
        self.len() == keys.len() && self.keys().all(|k| keys.contains(k))
    }

    /// Copy of the table with every value passed through `f`, order preserved
    pub fn map_values<W: Copy>(&self, mut f: impl FnMut(V) -> W) -> Table<W> {
        Table {
            entries: self.entries.iter().map(|(k, v)| (k.clone(), f(*v))).collect(),
            index: self.index.clone(),
        }
    }

    /// Copy of the table keeping only entries accepted by `keep`
    pub fn filtered(&self, mut keep: impl FnMut(&str, V) -> bool) -> Self {
        let mut table = Self::new();
        for (key, value) in &self.entries {
            if keep(key, *value) {
                table.push(key.clone(), *value);
            }
        }
        table
    }

    /// Length of the longest key in characters
    pub fn longest_key(&self) -> usize {
        self.keys().map(|k| k.chars().count()).max().unwrap_or(0)
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, (key, _))| (key.clone(), pos))
            .collect();
    }
}

impl<V: TableValue> Table<V> {
    /// Stable sort by descending value
    pub fn sort_by_value_desc(&mut self) {
        self.entries
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        self.reindex();
    }

    pub fn total(&self) -> f64 {
        self.values().map(|v| v.as_f64()).sum()
    }
}

impl FrequencyTable {
    /// Sum of all counts
    pub fn sum(&self) -> u64 {
        self.values().sum()
    }
}

impl<V: TableValue> Serialize for Table<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, &SavedValue(value))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_keys_skips_duplicates() {
        let table: FrequencyTable = Table::with_keys(["A", "B", "A", "C"], 0);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(table.get("A"), Some(0));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut table = FrequencyTable::new();
        table.insert("X", 1);
        table.insert("Y", 3);
        table.insert("Z", 1);
        table.insert("W", 3);
        table.sort_by_value_desc();

        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["Y", "W", "X", "Z"]);
        assert_eq!(table.get("Z"), Some(1));
        *table.get_mut("Z").unwrap() += 5;
        assert_eq!(table.get("Z"), Some(6));
    }

    #[test]
    fn test_key_set_comparison_ignores_order() {
        let table: FrequencyTable = Table::with_keys(["B", "A"], 0);
        let keys: HashSet<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();
        assert!(table.has_key_set(&keys));

        let bigger: FrequencyTable = Table::with_keys(["A", "B", "C"], 0);
        assert!(!bigger.has_key_set(&keys));
    }

    #[test]
    fn test_serializes_in_table_order() {
        let mut table = FrequencyTable::new();
        table.insert("Z", 2);
        table.insert("A", 1);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"Z":2,"A":1}"#);
    }

    #[test]
    fn test_log_zero_stand_in_serializes_as_integer() {
        let mut table = ScaledTable::new();
        table.insert("E", 0.5);
        table.insert("Q", LOG_ZERO_SENTINEL);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"E":0.5,"Q":-1}"#);
    }

    #[test]
    fn test_filtered_and_map_values() {
        let mut table = FrequencyTable::new();
        table.insert("A", 0);
        table.insert("B", 2);
        let kept = table.filtered(|_, v| v != 0);
        assert_eq!(kept.len(), 1);
        assert!(!kept.contains_key("A"));

        let halved = table.map_values(|v| v as f64 / 2.0);
        assert_eq!(halved.get("B"), Some(1.0));
        assert_eq!(halved.total(), 1.0);
    }
}
