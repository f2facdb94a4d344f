// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File walking for test discovery, with gitignore support.
//!
//! Uses the `ignore` crate so `.gitignore`, hidden files and depth limits
//! are honored. The walk is sequential: discovery runs once per invocation
//! and its result must be complete, so any error other than a symlink loop
//! aborts it.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{Error, Result};

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Directories to skip entirely during walking.
/// Filtered during traversal, so no I/O happens on these subtrees.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// Helper to check if an ignore::Error is a symlink loop error.
fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. } => is_loop_error(err),
        ignore::Error::WithDepth { err, .. } => is_loop_error(err),
        ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (default: 100).
    pub max_depth: Option<usize>,

    /// Whether to respect gitignore files.
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            git_ignore: true,
            hidden: true,
        }
    }
}

/// Statistics from a walk operation.
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Files accepted by the filter.
    pub files_found: usize,

    /// Files rejected by the filter.
    pub files_skipped: usize,

    /// Symlink loops detected.
    pub symlink_loops: usize,
}

/// File walker with gitignore support.
pub struct FileWalker {
    config: WalkerConfig,
}

impl Default for FileWalker {
    fn default() -> Self {
        Self::new(WalkerConfig::default())
    }
}

impl FileWalker {
    /// Create a new walker with the given configuration.
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Collect every file under `root` accepted by `filter`, in walk order.
    pub fn walk_filtered(
        &self,
        root: &Path,
        filter: impl Fn(&Path) -> bool,
    ) -> Result<(Vec<PathBuf>, WalkStats)> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(true)
            .git_global(true)
            .follow_links(true)
            .max_depth(self.config.max_depth);

        builder.filter_entry(|entry| {
            !entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
                || !entry
                    .file_name()
                    .to_str()
                    .map(|name| SKIP_DIRECTORIES.contains(&name))
                    .unwrap_or(false)
        });

        let mut files = Vec::new();
        let mut stats = WalkStats::default();

        for entry in builder.build() {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                        continue;
                    }
                    if filter(entry.path()) {
                        stats.files_found += 1;
                        files.push(entry.into_path());
                    } else {
                        stats.files_skipped += 1;
                    }
                }
                Err(err) if is_loop_error(&err) => {
                    tracing::warn!("Symlink loop detected: {}", err);
                    stats.symlink_loops += 1;
                }
                Err(err) => {
                    return Err(Error::Walk {
                        message: err.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            "walked {}: {} files kept, {} skipped",
            root.display(),
            stats.files_found,
            stats.files_skipped
        );
        Ok((files, stats))
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
