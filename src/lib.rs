//! Character bigram frequency heatmaps for text corpora
//!
//! Walks a corpus, counts every ordered pair of adjacent alphabet symbols,
//! and renders the counts as a colored HTML table on a logarithmic scale.
//!
//! # Example
//!
//! ```no_run
//! use bigram_heatmap::{pipeline, BrewerPalettes, HeatmapConfig};
//!
//! let config = HeatmapConfig {
//!     root: "/path/to/corpus".into(),
//!     ..Default::default()
//! };
//!
//! // Count, checkpointing to config.table_path
//! let (table, _summary) = pipeline::count(&config, false, false).unwrap();
//!
//! // Render to config.report_path
//! pipeline::generate_report(&table, &config, &BrewerPalettes).unwrap();
//! ```

mod alphabet;
mod bigram;
mod bucket;
mod config;
mod corpus;
mod error;
mod matrix;
mod palette;
mod persistence;
pub mod pipeline;
mod report;
mod scanner;
mod table;

// Re-export public API
pub use alphabet::{bigram_key, split_bigram, Alphabet, DEFAULT_ALPHABET};
pub use bigram::{extract_bigrams, with_file_text, BigramIterator};
pub use bucket::{BucketRange, Bucketizer, DEFAULT_BUCKETS, DEFAULT_CUTOFF};
pub use config::HeatmapConfig;
pub use corpus::{
    default_exclude_dirs, default_exclude_files, CorpusFilter, CorpusSelector,
    DEFAULT_INCLUDE_PATTERN,
};
pub use error::{HeatmapError, Result};
pub use matrix::{build_matrix, Cell, FrequencyMatrix};
pub use palette::{bucket_colors, BrewerPalettes, PaletteProvider, BUCKET_ZERO_COLOR, DEFAULT_PALETTE};
pub use persistence::{load_table, save_table, table_exists, write_atomic, write_report};
pub use report::{group_thousands, render_report, Legend, DEFAULT_TITLE};
pub use scanner::{count_corpus, count_corpus_parallel, ScanOptions, ScanSummary};
pub use table::CountTable;
