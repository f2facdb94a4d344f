// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Nearest-module lookup by manifest file.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::paths;

/// Finds the module directory owning a path by walking parent directories
/// until one holds the manifest file. Results are memoized per directory.
pub struct ManifestLocator {
    manifest_name: String,
    cache: DashMap<PathBuf, Option<PathBuf>>,
}

impl ManifestLocator {
    pub fn new(manifest_name: impl Into<String>) -> Self {
        Self {
            manifest_name: manifest_name.into(),
            cache: DashMap::new(),
        }
    }

    pub fn manifest_name(&self) -> &str {
        &self.manifest_name
    }

    /// Nearest directory at or above `dir` holding the manifest.
    ///
    /// `None` when the walk reaches the filesystem root without a match.
    pub fn module_dir(&self, dir: &Path) -> Option<PathBuf> {
        let start = paths::normalize(dir);
        let mut visited: Vec<PathBuf> = Vec::new();
        let mut current: Option<&Path> = Some(start.as_path());

        let found = loop {
            let Some(candidate) = current else {
                break None;
            };
            if let Some(cached) = self.cache.get(candidate) {
                break cached.clone();
            }
            visited.push(candidate.to_path_buf());
            if candidate.join(&self.manifest_name).is_file() {
                break Some(candidate.to_path_buf());
            }
            current = candidate.parent();
        };

        for dir in visited {
            self.cache.insert(dir, found.clone());
        }
        if found.is_none() {
            tracing::debug!("no {} above {}", self.manifest_name, start.display());
        }
        found
    }

    /// Module directory owning the file at `path`.
    pub fn module_for_file(&self, path: &Path) -> Option<PathBuf> {
        self.module_dir(path.parent()?)
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
