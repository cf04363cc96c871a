use crate::alphabet::{bigram_key, split_bigram, Alphabet};
use crate::bigram::{extract_bigrams, with_file_text};
use crate::error::{HeatmapError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Dense table of bigram counts over an alphabet
///
/// Holds exactly one entry per ordered pair of alphabet symbols, stored
/// row-major by symbol rank. Entries are never removed and only grow while
/// counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTable {
    alphabet: Alphabet,
    counts: Vec<u64>,
}

impl CountTable {
    /// Create a table with a zero entry for every ordered pair
    pub fn new(alphabet: Alphabet) -> Self {
        let size = alphabet.len() * alphabet.len();
        Self {
            alphabet,
            counts: vec![0; size],
        }
    }

    /// Rebuild a table from a `bigram -> count` mapping
    ///
    /// The mapping must cover exactly the pairs of `alphabet`.
    pub fn from_counts(alphabet: Alphabet, counts: &BTreeMap<String, u64>) -> Result<Self> {
        let mut table = Self::new(alphabet);

        for (key, &count) in counts {
            let slot = split_bigram(key)
                .and_then(|(a, b)| table.slot(a, b))
                .ok_or_else(|| {
                    HeatmapError::AlphabetMismatch(format!("unexpected bigram {:?}", key))
                })?;
            table.counts[slot] = count;
        }

        if counts.len() != table.len() {
            return Err(HeatmapError::AlphabetMismatch(format!(
                "expected {} bigrams, found {}",
                table.len(),
                counts.len()
            )));
        }

        Ok(table)
    }

    /// Export as a sorted `bigram -> count` mapping
    pub fn to_counts(&self) -> BTreeMap<String, u64> {
        self.iter().collect()
    }

    #[inline]
    fn slot(&self, first: char, second: char) -> Option<usize> {
        let row = self.alphabet.rank(first)?;
        let col = self.alphabet.rank(second)?;
        Some(row * self.alphabet.len() + col)
    }

    /// Count every in-alphabet bigram of `text`
    ///
    /// Pairs with a symbol outside the alphabet are ignored.
    pub fn accumulate_text(&mut self, text: &str) {
        for (first, second) in extract_bigrams(text) {
            if let Some(slot) = self.slot(first, second) {
                self.counts[slot] += 1;
            }
        }
    }

    /// Read a file and count its bigrams
    ///
    /// On a read or decoding error the table is left untouched.
    pub fn accumulate_file(&mut self, path: &Path) -> Result<()> {
        with_file_text(path, |text| self.accumulate_text(text))
    }

    /// Add the counts of another table over the same alphabet
    pub fn merge(&mut self, other: &CountTable) -> Result<()> {
        if self.alphabet != other.alphabet {
            return Err(HeatmapError::AlphabetMismatch(format!(
                "cannot merge table over {:?} into table over {:?}",
                other.alphabet.to_string(),
                self.alphabet.to_string()
            )));
        }

        self.add_counts(other);
        Ok(())
    }

    /// Entry-wise addition; callers guarantee identical alphabets
    pub(crate) fn add_counts(&mut self, other: &CountTable) {
        debug_assert_eq!(self.alphabet, other.alphabet);
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
    }

    /// Count for a bigram given as a two-symbol string
    pub fn get(&self, bigram: &str) -> Option<u64> {
        let (first, second) = split_bigram(bigram)?;
        self.count(first, second)
    }

    /// Count for an ordered symbol pair
    pub fn count(&self, first: char, second: char) -> Option<u64> {
        self.slot(first, second).map(|slot| self.counts[slot])
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of entries (always alphabet length squared)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in alphabet order (row by row)
    pub fn iter(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        let symbols = self.alphabet.symbols();
        let n = symbols.len();
        self.counts.iter().enumerate().map(move |(slot, &count)| {
            (bigram_key(symbols[slot / n], symbols[slot % n]), count)
        })
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Smallest count, zero entries included
    pub fn min_count(&self) -> u64 {
        self.counts.iter().copied().min().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of bigrams seen at least once
    pub fn observed(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// The `limit` most frequent bigrams, ties broken by alphabet order
    pub fn top(&self, limit: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(usize, (String, u64))> = self.iter().enumerate().collect();
        entries.sort_by(|(ia, (_, ca)), (ib, (_, cb))| cb.cmp(ca).then(ia.cmp(ib)));
        entries
            .into_iter()
            .take(limit)
            .map(|(_, entry)| entry)
            .collect()
    }
}
