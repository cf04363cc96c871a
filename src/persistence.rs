use crate::alphabet::Alphabet;
use crate::error::{HeatmapError, Result};
use crate::table::CountTable;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Save the count table as a JSON object of `bigram -> count`
///
/// Keys are sorted. The file is replaced atomically, so a reader never sees
/// a partial table.
pub fn save_table(table: &CountTable, path: &Path) -> Result<()> {
    let encoded = serde_json::to_vec_pretty(&table.to_counts())
        .map_err(|e| HeatmapError::Serialization(e.to_string()))?;

    write_atomic(path, &encoded)
}

/// Load a count table saved by [`save_table`]
///
/// The stored bigrams must be exactly the pairs of `alphabet`.
pub fn load_table(path: &Path, alphabet: Alphabet) -> Result<CountTable> {
    if !path.exists() {
        return Err(HeatmapError::TableNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let counts: BTreeMap<String, u64> = serde_json::from_reader(reader)
        .map_err(|e| HeatmapError::Serialization(format!("{}: {}", path.display(), e)))?;

    CountTable::from_counts(alphabet, &counts)
}

/// Check if a count table file exists and parses as a JSON object
pub fn table_exists(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };

    serde_json::from_reader::<_, BTreeMap<String, u64>>(BufReader::new(file)).is_ok()
}

/// Write a finished report page
pub fn write_report(html: &str, path: &Path) -> Result<()> {
    write_atomic(path, html.as_bytes())
}

/// Replace `path` with `bytes` via a temporary sibling and a rename
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| HeatmapError::Io(format!("invalid output path: {}", path.display())))?;
    let tmp = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

    {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }

    Ok(())
}
