/// Symbol extraction
///
/// Turns raw text into the sequence of symbols that gets tallied: single characters,
/// 4-character windows, or words. Also owns the key-set rules (which symbols a table
/// starts out with) and the stride partitioning of the input text.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{AnalysisError, Result};

/// Window length used in tetragram mode
pub const TETRAGRAM_LENGTH: usize = 4;

/// Longest word registered in case-sensitive word mode
pub const MAX_WORD_LENGTH: usize = 45;

lazy_static! {
    static ref NON_WORD_CHARS: Regex = Regex::new(r"[^a-zA-Z\d\s]").unwrap();
    static ref NON_ALPHABETIC_CHARS: Regex = Regex::new(r"[^a-zA-Z ]").unwrap();
}

/// What counts as a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolMode {
    #[default]
    Letters,
    Tetragrams,
    Words,
}

/// Settings that decide how text becomes symbols
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractorConfig {
    /// Fold symbols to uppercase before lookup
    pub ignore_case: bool,
    /// Explicit key set; replaces the default alphabet
    pub charset: Option<Vec<String>>,
    pub mode: SymbolMode,
}

impl ExtractorConfig {
    /// Keys of a single-character table for this configuration
    pub fn base_keys(&self) -> Vec<String> {
        match &self.charset {
            Some(charset) => charset.clone(),
            None if self.ignore_case => ('A'..='Z').map(String::from).collect(),
            None => (32u8..=126).map(|b| (b as char).to_string()).collect(),
        }
    }

    /// Keys the frequency table is created with; word tables start empty
    pub fn initial_keys(&self) -> Vec<String> {
        match self.mode {
            SymbolMode::Letters => self.base_keys(),
            SymbolMode::Tetragrams => {
                let alphabet = tetragram_alphabet(&self.base_keys());
                debug!("Tetragram alphabet has {} letters", alphabet.len());
                tetragram_keys(&alphabet)
            }
            SymbolMode::Words => Vec::new(),
        }
    }

    /// Split text into the symbols to tally
    pub fn extract(&self, text: &str) -> Vec<String> {
        match self.mode {
            SymbolMode::Letters => text.chars().map(String::from).collect(),
            SymbolMode::Tetragrams => sliding_windows(text, TETRAGRAM_LENGTH),
            SymbolMode::Words => split_words(text),
        }
    }
}

/// Split a comma-separated charset; an empty spec means "use the default alphabet"
pub fn parse_charset(spec: &str) -> Option<Vec<String>> {
    if spec.is_empty() {
        None
    } else {
        Some(spec.split(',').map(str::to_string).collect())
    }
}

/// Letters tetragrams are built from: uppercased, de-duplicated in first-seen order,
/// and limited to ASCII letters and whitespace
pub fn tetragram_alphabet<S: AsRef<str>>(keys: &[S]) -> Vec<char> {
    let mut alphabet = Vec::new();
    for key in keys {
        for c in key.as_ref().to_uppercase().chars() {
            if (c.is_ascii_alphabetic() || c.is_whitespace()) && !alphabet.contains(&c) {
                alphabet.push(c);
            }
        }
    }
    alphabet
}

/// Every 4-length combination of the alphabet, first position varying slowest
pub fn tetragram_keys(alphabet: &[char]) -> Vec<String> {
    let mut keys = vec![String::new()];
    for _ in 0..TETRAGRAM_LENGTH {
        keys = keys
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |&c| {
                    let mut key = prefix.clone();
                    key.push(c);
                    key
                })
            })
            .collect();
    }
    keys
}

/// One window per character position; windows near the end come out shorter
/// than `size` and never match a key
pub fn sliding_windows(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len())
        .map(|start| {
            let end = (start + size).min(chars.len());
            chars[start..end].iter().collect()
        })
        .collect()
}

/// Clean text for word counting.
///
/// Drops everything but letters, digits and whitespace, removes newlines and then
/// replaces double spaces once. Runs of three or more spaces survive as two and
/// produce empty words when split.
pub fn clean_words(text: &str) -> String {
    let cleaned = NON_WORD_CHARS.replace_all(text, "");
    cleaned.replace('\n', "").replace("  ", " ")
}

pub fn split_words(text: &str) -> Vec<String> {
    clean_words(text).split(' ').map(str::to_string).collect()
}

/// Optional input rewrites applied before anything else
pub fn preprocess(text: &str, uppercase: bool, alphabetic_only: bool) -> String {
    let mut text = if uppercase {
        text.to_uppercase()
    } else {
        text.to_string()
    };
    if alphabetic_only {
        text = NON_ALPHABETIC_CHARS.replace_all(&text, "").into_owned();
    }
    text
}

/// Which characters of the text are analysed, and as how many sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StrideSpec", into = "String")]
pub enum Stride {
    /// Every n-th character from the start, as one section
    Every(usize),
    /// `n` sections, section i holding the characters at positions i, i+n, i+2n, ...
    Interleaved(usize),
}

impl Default for Stride {
    fn default() -> Self {
        Stride::Every(1)
    }
}

impl Stride {
    /// Cut the text into the sections to analyse
    pub fn partition(&self, text: &str) -> Vec<String> {
        match *self {
            Stride::Every(n) => vec![text.chars().step_by(n).collect()],
            Stride::Interleaved(n) => (0..n)
                .map(|offset| text.chars().skip(offset).step_by(n).collect())
                .collect(),
        }
    }

    fn step(&self) -> usize {
        match *self {
            Stride::Every(n) | Stride::Interleaved(n) => n,
        }
    }
}

impl FromStr for Stride {
    type Err = AnalysisError;

    /// Accepts `n` or `n,k`; a non-zero `k` asks for interleaved sections
    fn from_str(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
        let parse = |part: &str| {
            part.parse::<usize>().map_err(|_| {
                AnalysisError::invalid(format!("invalid number pair for the nth letter argument: '{}'", spec))
            })
        };

        let stride = match parts.as_slice() {
            [n] => Stride::Every(parse(*n)?),
            [n, k] => {
                let n = parse(*n)?;
                if parse(*k)? != 0 {
                    Stride::Interleaved(n)
                } else {
                    Stride::Every(n)
                }
            }
            _ => {
                return Err(AnalysisError::invalid(format!(
                    "invalid number pair for the nth letter argument: '{}'",
                    spec
                )))
            }
        };

        if stride.step() == 0 {
            return Err(AnalysisError::invalid("the nth letter step must be at least 1"));
        }
        Ok(stride)
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stride::Every(n) => write!(f, "{}", n),
            Stride::Interleaved(n) => write!(f, "{},1", n),
        }
    }
}

impl From<Stride> for String {
    fn from(stride: Stride) -> Self {
        stride.to_string()
    }
}

/// Stride as written in a config file: `3` or `"3,1"`
#[derive(Deserialize)]
#[serde(untagged)]
enum StrideSpec {
    Number(usize),
    Text(String),
}

impl TryFrom<StrideSpec> for Stride {
    type Error = AnalysisError;

    fn try_from(spec: StrideSpec) -> Result<Self> {
        match spec {
            StrideSpec::Number(n) => n.to_string().parse(),
            StrideSpec::Text(text) => text.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabets() {
        let folded = ExtractorConfig {
            ignore_case: true,
            ..Default::default()
        };
        let keys = folded.base_keys();
        assert_eq!(keys.len(), 26);
        assert_eq!(keys[0], "A");

        let printable = ExtractorConfig::default().base_keys();
        assert_eq!(printable.len(), 95);
        assert_eq!(printable[0], " ");
        assert_eq!(printable[94], "~");
    }

    #[test]
    fn test_custom_charset_replaces_alphabet() {
        let config = ExtractorConfig {
            ignore_case: false,
            charset: parse_charset("a,b,c"),
            mode: SymbolMode::Letters,
        };
        assert_eq!(config.initial_keys(), vec!["a", "b", "c"]);
        assert_eq!(parse_charset(""), None);
    }

    #[test]
    fn test_tetragram_keys_over_two_letters() {
        let alphabet = tetragram_alphabet(&["A", "B"]);
        let keys = tetragram_keys(&alphabet);
        assert_eq!(keys.len(), 16);
        assert_eq!(keys[0], "AAAA");
        assert_eq!(keys[1], "AAAB");
        assert_eq!(keys[15], "BBBB");

        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn test_tetragram_alphabet_strips_digits_and_punctuation() {
        let alphabet = tetragram_alphabet(&["a", "A", "1", ".", " ", "b"]);
        assert_eq!(alphabet, vec!['A', ' ', 'B']);
    }

    #[test]
    fn test_sliding_windows_keep_short_tail() {
        let windows = sliding_windows("ABCDE", 4);
        assert_eq!(windows, vec!["ABCD", "BCDE", "CDE", "DE", "E"]);
    }

    #[test]
    fn test_word_cleanup_collapses_spaces_once() {
        assert_eq!(clean_words("the cat, the dog!"), "the cat the dog");
        assert_eq!(clean_words("a\nb"), "ab");
        assert_eq!(split_words("a   b"), vec!["a", "", "b"]);
        assert_eq!(split_words("a    b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_preprocess() {
        assert_eq!(preprocess("Hello, World!", true, false), "HELLO, WORLD!");
        assert_eq!(preprocess("Hello, World!", false, true), "Hello World");
        assert_eq!(preprocess("abc 123", true, true), "ABC ");
    }

    #[test]
    fn test_stride_parsing() {
        assert_eq!("3".parse::<Stride>().unwrap(), Stride::Every(3));
        assert_eq!("3,1".parse::<Stride>().unwrap(), Stride::Interleaved(3));
        assert_eq!("3,0".parse::<Stride>().unwrap(), Stride::Every(3));
        assert!("0".parse::<Stride>().is_err());
        assert!("x,1".parse::<Stride>().is_err());
        assert!("1,2,3".parse::<Stride>().is_err());
    }

    #[test]
    fn test_stride_partition() {
        let sections = Stride::Interleaved(2).partition("ABCDEFGH");
        assert_eq!(sections, vec!["ACEG", "BDFH"]);

        let single = Stride::Every(3).partition("ABCDEFGH");
        assert_eq!(single, vec!["ADG"]);
    }

    #[test]
    fn test_stride_from_config_json() {
        let pair: Stride = serde_json::from_str(r#""2,1""#).unwrap();
        assert_eq!(pair, Stride::Interleaved(2));
        let single: Stride = serde_json::from_str("4").unwrap();
        assert_eq!(single, Stride::Every(4));
        assert_eq!(serde_json::to_string(&pair).unwrap(), r#""2,1""#);
    }
}
