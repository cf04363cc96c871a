//! Corpus file selection
//!
//! Decides which files under a root directory are texts to be counted.
//! Excluded directories are pruned while walking, so nothing beneath them is
//! ever listed.

use crate::error::{HeatmapError, Result};
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Default inclusion rule: `-` + 3-letter code + digit, optional status suffix
pub const DEFAULT_INCLUDE_PATTERN: &str = r"-\w{3}\d(?:\.(?:inProgress|completed|mARkdown))?$";

/// Directory names skipped by default
pub fn default_exclude_dirs() -> Vec<String> {
    [
        "OpenITI.github.io",
        "Annotation",
        "maintenance",
        "i.mech00",
        "i.mech01",
        "i.mech02",
        "i.mech03",
        "i.mech04",
        "i.mech05",
        "i.mech06",
        "i.mech07",
        "i.mech",
        "i.mech_Temp",
        "i.mech08",
        "i.mech09",
        "i.logic",
        "i.cex",
        "i.cex_Temp",
        ".git",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// File names skipped by default
pub fn default_exclude_files() -> Vec<String> {
    [
        "README.md",
        ".DS_Store",
        ".gitignore",
        "text_questionnaire.md",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Name-based selection rules, independent of any file system
#[derive(Debug, Clone)]
pub struct CorpusFilter {
    exclude_dirs: Vec<String>,
    exclude_files: Vec<String>,
    include: Regex,
}

impl CorpusFilter {
    pub fn new(
        exclude_dirs: Vec<String>,
        exclude_files: Vec<String>,
        include_pattern: &str,
    ) -> Result<Self> {
        let include = Regex::new(include_pattern)
            .map_err(|e| HeatmapError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            exclude_dirs,
            exclude_files,
            include,
        })
    }

    /// Should the walk descend into a directory with this name?
    pub fn descends_into(&self, dir_name: &str) -> bool {
        !self.exclude_dirs.iter().any(|d| d == dir_name)
    }

    /// Is a file with this name a corpus text?
    pub fn selects_file(&self, file_name: &str) -> bool {
        !self.exclude_files.iter().any(|f| f == file_name) && self.include.is_match(file_name)
    }

    /// Would a file at `relative` (to the corpus root) be selected?
    ///
    /// Equivalent to a pruned walk: any excluded ancestor directory rejects
    /// the file.
    pub fn admits(&self, relative: &Path) -> bool {
        let mut names: Vec<&str> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => match name.to_str() {
                    Some(name) => names.push(name),
                    None => return false,
                },
                Component::CurDir => {}
                _ => return false,
            }
        }

        let Some((file_name, dirs)) = names.split_last() else {
            return false;
        };

        dirs.iter().all(|d| self.descends_into(d)) && self.selects_file(file_name)
    }
}

/// Enumerates corpus files under a root directory
///
/// Each call to [`CorpusSelector::files`] starts a fresh walk, so the
/// sequence can be restarted any number of times.
#[derive(Debug, Clone)]
pub struct CorpusSelector {
    root: PathBuf,
    filter: CorpusFilter,
}

impl CorpusSelector {
    pub fn new(root: impl Into<PathBuf>, filter: CorpusFilter) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> &CorpusFilter {
        &self.filter
    }

    /// Lazily walk the corpus, yielding selected files in sorted order
    ///
    /// An entry that cannot be read (typically a directory without list
    /// permission) is yielded as `HeatmapError::WalkDir`; the walk then
    /// continues with its siblings.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                // The root itself is never pruned
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .map_or(true, |name| self.filter.descends_into(name))
            })
            .filter(move |entry| match entry {
                Ok(entry) => {
                    entry.file_type().is_file()
                        && entry
                            .file_name()
                            .to_str()
                            .is_some_and(|name| self.filter.selects_file(name))
                }
                Err(_) => true,
            })
            .map(|entry| {
                entry
                    .map(|entry| entry.into_path())
                    .map_err(|e| HeatmapError::WalkDir(e.to_string()))
            })
    }

    /// Selected files only; walk errors are logged and skipped
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.walk().filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
    }
}
