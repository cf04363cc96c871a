//! End-to-end steps shared by the command-line subcommands

use crate::bucket::Bucketizer;
use crate::config::HeatmapConfig;
use crate::error::{HeatmapError, Result};
use crate::matrix::build_matrix;
use crate::palette::{bucket_colors, PaletteProvider};
use crate::persistence::{load_table, save_table, write_report};
use crate::report::{render_report, Legend};
use crate::scanner::{count_corpus, count_corpus_parallel, ScanOptions, ScanSummary};
use crate::table::CountTable;
use tracing::info;

/// Scan the configured corpus
///
/// With `resume`, counting continues from the table saved at
/// `config.table_path`. The sequential scan checkpoints to that path; the
/// parallel scan saves once at the end.
pub fn count(config: &HeatmapConfig, parallel: bool, resume: bool) -> Result<(CountTable, ScanSummary)> {
    config.validate()?;
    let alphabet = config.alphabet()?;
    let selector = config.corpus_selector()?;

    info!(
        "counting bigrams of {} symbols under {}",
        alphabet.len(),
        selector.root().display()
    );

    let mut table = if resume {
        load_table(&config.table_path, alphabet.clone())?
    } else {
        CountTable::new(alphabet.clone())
    };

    if parallel {
        let files: Vec<_> = selector.files().collect();
        let (partial, summary) = count_corpus_parallel(&files, &alphabet);
        table.merge(&partial)?;
        save_table(&table, &config.table_path)?;
        return Ok((table, summary));
    }

    let options = ScanOptions {
        checkpoint_path: Some(config.table_path.clone()),
        checkpoint_every: config.checkpoint_every,
    };
    let summary = count_corpus(selector.files(), &mut table, &options)?;

    Ok((table, summary))
}

/// Load the saved count table for the configured alphabet
///
/// A missing file is `TableNotFound`; an unreadable one keeps its own error.
pub fn load(config: &HeatmapConfig) -> Result<CountTable> {
    load_table(&config.table_path, config.alphabet()?)
}

/// Render the heatmap page for `table` without writing it
///
/// The bucket scale is computed from the maximum over the whole table, even
/// when the configured alphabet selects only part of it.
pub fn render(
    table: &CountTable,
    config: &HeatmapConfig,
    palettes: &dyn PaletteProvider,
) -> Result<String> {
    config.validate()?;
    let alphabet = config.alphabet()?;
    let matrix = build_matrix(table, &alphabet)?;

    let bucketizer = Bucketizer::new(config.buckets, config.effective_cutoff(), table.max_count())?;
    info!(
        "max count {}, bucket width {:.4}",
        bucketizer.max_count(),
        bucketizer.width()
    );

    let colors = bucket_colors(palettes, &config.palette, config.buckets)?;
    if colors.len() != config.buckets {
        return Err(HeatmapError::UnknownPalette(format!(
            "{} supplied {} colors for {} buckets",
            config.palette,
            colors.len(),
            config.buckets
        )));
    }

    let legend = Legend::new(&bucketizer, table.min_count());

    Ok(render_report(
        &matrix,
        |count| bucketizer.classify(count),
        |bucket| colors[bucket].clone(),
        &legend,
        &config.title,
    ))
}

/// Render and write the report to `config.report_path`
///
/// Nothing is written unless rendering succeeds.
pub fn generate_report(
    table: &CountTable,
    config: &HeatmapConfig,
    palettes: &dyn PaletteProvider,
) -> Result<()> {
    let html = render(table, config, palettes)?;
    write_report(&html, &config.report_path)?;
    info!("wrote report to {}", config.report_path.display());
    Ok(())
}
