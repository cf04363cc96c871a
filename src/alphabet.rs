//! Ordered symbol sets used as rows and columns of the frequency matrix

use crate::error::{HeatmapError, Result};
use rustc_hash::FxHashMap;
use std::fmt;

/// Arabic letters counted by default (OpenITI corpus)
pub const DEFAULT_ALPHABET: &str = "اإأآبتثجحخدذرزسشصضطظعغفقكلمنهويىؤءئة";

/// An ordered sequence of distinct characters
///
/// Order is significant: it fixes the row/column order of the report.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    /// Symbol -> position in `symbols`
    ranks: FxHashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from a string, one symbol per `char`
    ///
    /// Fails on an empty string or a repeated symbol.
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(HeatmapError::InvalidConfig(
                "alphabet must contain at least one symbol".to_string(),
            ));
        }

        let mut ranks = FxHashMap::default();
        for (rank, &symbol) in symbols.iter().enumerate() {
            if ranks.insert(symbol, rank).is_some() {
                return Err(HeatmapError::InvalidConfig(format!(
                    "alphabet contains duplicate symbol {:?}",
                    symbol
                )));
            }
        }

        Ok(Self { symbols, ranks })
    }

    /// Position of a symbol, if it belongs to the alphabet
    #[inline]
    pub fn rank(&self, symbol: char) -> Option<usize> {
        self.ranks.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.ranks.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Symbol at a given rank
    pub fn symbol(&self, rank: usize) -> Option<char> {
        self.symbols.get(rank).copied()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// Canonical string form of a bigram
#[inline]
pub fn bigram_key(first: char, second: char) -> String {
    let mut key = String::with_capacity(first.len_utf8() + second.len_utf8());
    key.push(first);
    key.push(second);
    key
}

/// Split a bigram key back into its two symbols
pub fn split_bigram(key: &str) -> Option<(char, char)> {
    let mut chars = key.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some((first, second))
}
