use crate::alphabet::Alphabet;
use crate::error::{HeatmapError, Result};
use crate::persistence::save_table;
use crate::table::CountTable;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Checkpointing behaviour of a sequential scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Where to save the table while scanning
    pub checkpoint_path: Option<PathBuf>,

    /// Save after this many counted files (0 = only once at the end)
    pub checkpoint_every: usize,
}

/// Outcome of a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_counted: usize,
    pub files_skipped: usize,
}

impl ScanSummary {
    fn absorb(self, other: ScanSummary) -> ScanSummary {
        ScanSummary {
            files_counted: self.files_counted + other.files_counted,
            files_skipped: self.files_skipped + other.files_skipped,
        }
    }
}

/// Count one file into `table`, logging and skipping unreadable files
///
/// Returns whether the file was counted.
fn count_file(table: &mut CountTable, path: &Path) -> bool {
    match table.accumulate_file(path) {
        Ok(()) => {
            debug!("counted {}", path.display());
            true
        }
        Err(HeatmapError::Decode(e)) => {
            warn!("skipping file that is not valid text: {}", e);
            false
        }
        Err(e) => {
            warn!("skipping {}: {}", path.display(), e);
            false
        }
    }
}

/// Count files one after another into `table`
///
/// Each file is read and merged completely before the next one is opened.
/// With a checkpoint path the table is saved every `checkpoint_every`
/// counted files and once more at the end.
pub fn count_corpus<I>(files: I, table: &mut CountTable, options: &ScanOptions) -> Result<ScanSummary>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut summary = ScanSummary::default();

    for path in files {
        info!("{}", path.display());

        if !count_file(table, &path) {
            summary.files_skipped += 1;
            continue;
        }
        summary.files_counted += 1;

        if let Some(checkpoint) = &options.checkpoint_path {
            if options.checkpoint_every > 0 && summary.files_counted % options.checkpoint_every == 0 {
                save_table(table, checkpoint)?;
            }
        }
    }

    if let Some(checkpoint) = &options.checkpoint_path {
        save_table(table, checkpoint)?;
    }

    info!(
        "counted {} files ({} skipped)",
        summary.files_counted, summary.files_skipped
    );

    Ok(summary)
}

/// Count files on the rayon pool
///
/// Every worker fills its own partial table; partial tables are summed at
/// the end, so the result equals a sequential scan of the same files.
pub fn count_corpus_parallel(files: &[PathBuf], alphabet: &Alphabet) -> (CountTable, ScanSummary) {
    let empty = || (CountTable::new(alphabet.clone()), ScanSummary::default());

    let (table, summary) = files
        .par_iter()
        .fold(empty, |(mut table, mut summary), path| {
            if count_file(&mut table, path) {
                summary.files_counted += 1;
            } else {
                summary.files_skipped += 1;
            }
            (table, summary)
        })
        .reduce(empty, |(mut left, ls), (right, rs)| {
            left.add_counts(&right);
            (left, ls.absorb(rs))
        });

    info!(
        "counted {} files ({} skipped) in parallel",
        summary.files_counted, summary.files_skipped
    );

    (table, summary)
}
