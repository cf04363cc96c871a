//! Bigram extraction from text
//!
//! A bigram is any two adjacent characters. Extraction is a sliding window of
//! width 2 and stride 1; filtering against an alphabet happens in the count
//! table, not here.

use crate::error::{HeatmapError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Iterator over adjacent character pairs of a string
pub struct BigramIterator<'a> {
    chars: std::str::Chars<'a>,
    previous: Option<char>,
}

impl<'a> BigramIterator<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut chars = text.chars();
        let previous = chars.next();
        Self { chars, previous }
    }
}

impl<'a> Iterator for BigramIterator<'a> {
    type Item = (char, char);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let first = self.previous?;
        let second = self.chars.next()?;
        self.previous = Some(second);
        Some((first, second))
    }
}

/// Extract every adjacent character pair of `text`, in order
pub fn extract_bigrams(text: &str) -> BigramIterator<'_> {
    BigramIterator::new(text)
}

/// Read a file and hand its decoded text to `f`
///
/// The file is memory-mapped; content that is not valid UTF-8 yields
/// `HeatmapError::Decode` and `f` is never called.
pub fn with_file_text<T>(path: &Path, f: impl FnOnce(&str) -> T) -> Result<T> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;

    // Mapping a zero-length file fails on some platforms
    if metadata.len() == 0 {
        return Ok(f(""));
    }

    let mmap = unsafe { Mmap::map(&file)? };

    let text = std::str::from_utf8(&mmap[..])
        .map_err(|e| HeatmapError::Decode(format!("{}: {}", path.display(), e)))?;

    Ok(f(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_extract_bigrams_simple() {
        let bigrams: Vec<_> = extract_bigrams("aabba").collect();
        assert_eq!(
            bigrams,
            vec![('a', 'a'), ('a', 'b'), ('b', 'b'), ('b', 'a')]
        );
    }

    #[test]
    fn test_extract_bigrams_short_input() {
        assert_eq!(extract_bigrams("").count(), 0);
        assert_eq!(extract_bigrams("x").count(), 0);
        assert_eq!(extract_bigrams("xy").count(), 1);
    }

    #[test]
    fn test_extract_bigrams_keeps_delimiters() {
        // Filtering is the table's job; spaces still form pairs here
        let bigrams: Vec<_> = extract_bigrams("a b").collect();
        assert_eq!(bigrams, vec![('a', ' '), (' ', 'b')]);
    }

    #[test]
    fn test_extract_bigrams_multibyte() {
        let bigrams: Vec<_> = extract_bigrams("كتب").collect();
        assert_eq!(bigrams, vec![('ك', 'ت'), ('ت', 'ب')]);
    }

    #[test]
    fn test_with_file_text_reads_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("text-ara1");
        std::fs::write(&path, "hello").unwrap();

        let len = with_file_text(&path, |text| text.len()).unwrap();
        assert_eq!(len, 5);
    }

    #[test]
    fn test_with_file_text_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty-ara1");
        std::fs::write(&path, "").unwrap();

        let text = with_file_text(&path, |text| text.to_string()).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_with_file_text_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary-ara1");
        std::fs::write(&path, [0x61, 0xff, 0xfe, 0x62]).unwrap();

        let result = with_file_text(&path, |_| ());
        assert!(matches!(result, Err(HeatmapError::Decode(_))));
    }

    #[test]
    fn test_with_file_text_missing_file() {
        let dir = tempdir().unwrap();
        let result = with_file_text(&dir.path().join("missing"), |_| ());
        assert!(matches!(result, Err(HeatmapError::Io(_))));
    }
}
