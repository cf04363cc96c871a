//! Run configuration
//!
//! Every option has a default matching the OpenITI corpus layout. Values can
//! come from a TOML file and are then overridden by command-line flags.
//!
//! ```toml
//! root = "/data/OpenITI/25Y_repos"
//! alphabet = "ابت"
//! buckets = 10
//! cutoff = 1000        # 0 disables the cutoff
//! palette = "YlOrBr"
//! title = "Bi-gram frequencies"
//! report_path = "freq_table.html"
//! table_path = "bigram_count.json"
//! ```

use crate::alphabet::{Alphabet, DEFAULT_ALPHABET};
use crate::bucket::{DEFAULT_BUCKETS, DEFAULT_CUTOFF};
use crate::corpus::{
    default_exclude_dirs, default_exclude_files, CorpusFilter, CorpusSelector,
    DEFAULT_INCLUDE_PATTERN,
};
use crate::error::{HeatmapError, Result};
use crate::palette::DEFAULT_PALETTE;
use crate::report::DEFAULT_TITLE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapConfig {
    /// Corpus root directory
    pub root: PathBuf,

    /// Symbols counted, in report order
    pub alphabet: String,

    /// Number of color buckets
    pub buckets: usize,

    /// Counts below this go to bucket 0 (`None` or 0 disables)
    pub cutoff: Option<u64>,

    /// Palette name for buckets 1..N
    pub palette: String,

    pub title: String,

    pub report_path: PathBuf,

    /// Where the count table is saved and loaded
    pub table_path: PathBuf,

    /// Directory names pruned from the walk
    pub exclude_dirs: Vec<String>,

    /// File names never counted
    pub exclude_files: Vec<String>,

    /// Regex a file name must match to be counted
    pub include_pattern: String,

    /// Save the table after this many files (0 = only at the end)
    pub checkpoint_every: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            alphabet: DEFAULT_ALPHABET.to_string(),
            buckets: DEFAULT_BUCKETS,
            cutoff: Some(DEFAULT_CUTOFF),
            palette: DEFAULT_PALETTE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            report_path: PathBuf::from("freq_table.html"),
            table_path: PathBuf::from("bigram_count.json"),
            exclude_dirs: default_exclude_dirs(),
            exclude_files: default_exclude_files(),
            include_pattern: DEFAULT_INCLUDE_PATTERN.to_string(),
            checkpoint_every: 1,
        }
    }
}

impl HeatmapConfig {
    /// Read a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| HeatmapError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| HeatmapError::InvalidConfig(e.to_string()))
    }

    /// Fail fast on settings that make counting or bucketing undefined
    pub fn validate(&self) -> Result<()> {
        self.alphabet()?;
        if self.buckets == 0 {
            return Err(HeatmapError::InvalidConfig(
                "number of buckets must be at least 1".to_string(),
            ));
        }
        self.corpus_filter()?;
        Ok(())
    }

    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::new(&self.alphabet)
    }

    /// Cutoff with 0 normalised to disabled
    pub fn effective_cutoff(&self) -> Option<u64> {
        self.cutoff.filter(|&c| c > 0)
    }

    pub fn corpus_filter(&self) -> Result<CorpusFilter> {
        CorpusFilter::new(
            self.exclude_dirs.clone(),
            self.exclude_files.clone(),
            &self.include_pattern,
        )
    }

    pub fn corpus_selector(&self) -> Result<CorpusSelector> {
        Ok(CorpusSelector::new(self.root.clone(), self.corpus_filter()?))
    }
}
