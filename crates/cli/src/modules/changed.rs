// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Modules touched by a change set, for incremental builds.
//!
//! Every changed path (deletions included) selects the module owning it. A
//! path containing one of the configured full-build fragments selects every
//! module instead. Fragments are matched against the repository-relative
//! path with a leading `/`, so `/base/` also matches a top-level `base/`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::{ManifestLocator, ModuleList};
use crate::change::ChangeSet;
use crate::paths;

/// Maps change sets to the modules that must be rebuilt.
pub struct ChangedModules {
    root: PathBuf,
    manifests: ManifestLocator,
    full_build_paths: Vec<String>,
}

impl ChangedModules {
    pub fn new(root: impl Into<PathBuf>, manifests: ManifestLocator, full_build_paths: Vec<String>) -> Self {
        Self {
            root: root.into(),
            manifests,
            full_build_paths,
        }
    }

    /// Full-build fragment contained in the rooted slash form of `path`.
    fn full_build_trigger(&self, path: &Path) -> Option<&str> {
        let rooted = format!("/{}", paths::to_slash(path).trim_start_matches('/'));
        self.full_build_paths
            .iter()
            .map(String::as_str)
            .find(|fragment| !fragment.is_empty() && rooted.contains(fragment))
    }

    pub fn select(&self, changes: &ChangeSet) -> ModuleList {
        let mut dirs = BTreeSet::new();

        for item in changes {
            if let Some(fragment) = self.full_build_trigger(&item.path) {
                tracing::info!("{} matches {}; selecting all modules", item.path.display(), fragment);
                return ModuleList::All;
            }
            let full = paths::absolutize(&item.path, &self.root);
            // Submodule entries show up as directories.
            if full.is_dir() {
                continue;
            }
            match self.manifests.module_for_file(&full) {
                Some(module) => {
                    dirs.insert(module);
                }
                None => tracing::debug!("{} belongs to no module", item.path.display()),
            }
        }

        ModuleList::Dirs(dirs.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "changed_tests.rs"]
mod tests;
