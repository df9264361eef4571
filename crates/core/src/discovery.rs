use crate::error::{ConfigurationError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Selects source files under a directory via include/exclude globs.
///
/// Matching runs against root-relative paths, so `*.kt` only matches files
/// directly under the scanned directory while `**/*.kt` recurses. An empty
/// include set matches everything; excludes always win.
#[derive(Debug)]
pub struct SourceScanner {
    includes: GlobSet,
    match_all: bool,
    excludes: GlobSet,
}

impl SourceScanner {
    pub fn new(includes: &[String], excludes: &[String]) -> Result<Self> {
        Ok(Self {
            includes: build_glob_set(includes, "include")?,
            match_all: includes.is_empty(),
            excludes: build_glob_set(excludes, "exclude")?,
        })
    }

    /// Returns the matching files under `root`, in file-name sort order.
    /// Paths are returned as found, not canonicalized.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut out = Vec::new();

        let walk = WalkDir::new(root).follow_links(false).sort_by_file_name();
        for entry in walk {
            let entry = entry.map_err(|e| {
                ConfigurationError::with_source(
                    format!("Failed to scan source folder {}", root.display()),
                    e,
                )
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let rel = path.strip_prefix(root).unwrap_or(path);
            let rel = rel.to_string_lossy().replace('\\', "/");

            if !self.match_all && !self.includes.is_match(&rel) {
                continue;
            }
            if self.excludes.is_match(&rel) {
                continue;
            }

            out.push(path.to_path_buf());
        }

        Ok(out)
    }
}

fn build_glob_set(patterns: &[String], kind: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // `*` must stop at path separators so `*.kt` stays top-level while
        // `**/*.kt` recurses.
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                ConfigurationError::with_source(format!("Invalid {kind} pattern `{pattern}`"), e)
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        ConfigurationError::with_source(format!("Failed to compile {kind} patterns"), e)
    })
}
