// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Module list files: one module directory or manifest path per line.
//!
//! A trailing manifest file name is stripped, so `core/pom.xml` and `core`
//! name the same module. Relative entries resolve against the project root.
//! A line holding only `*` selects every module.

use std::path::{Path, PathBuf};

use super::{Closure, ModuleGraphProvider, ModuleGraphSelector};
use crate::error::{Error, Result};
use crate::paths;

/// Line that selects every module in the graph.
pub const SELECT_ALL: &str = "*";

/// Modules named by one or more list files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleList {
    All,
    Dirs(Vec<PathBuf>),
}

impl ModuleList {
    /// Parse one list file's content.
    pub fn parse(content: &str, manifest_name: &str, root: &Path) -> Self {
        let mut dirs = Vec::new();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line == SELECT_ALL {
                return ModuleList::All;
            }
            let entry = line.strip_suffix(manifest_name).unwrap_or(line);
            let entry = if entry.is_empty() { "." } else { entry };
            dirs.push(paths::absolutize(Path::new(entry), root));
        }
        ModuleList::Dirs(dirs)
    }

    /// Read and merge list files. Missing files are skipped with a warning.
    pub fn read(files: &[PathBuf], manifest_name: &str, root: &Path) -> Result<Self> {
        let mut merged = Vec::new();
        for file in files {
            if !file.exists() {
                tracing::warn!("module list {} does not exist", file.display());
                continue;
            }
            let content = std::fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
            match Self::parse(&content, manifest_name, root) {
                ModuleList::All => {
                    tracing::info!("{} selects all modules", file.display());
                    return Ok(ModuleList::All);
                }
                ModuleList::Dirs(dirs) => merged.extend(dirs),
            }
        }
        Ok(ModuleList::Dirs(merged))
    }

    /// Sorted module directories selected by applying `closure`.
    pub fn select(&self, graph: &dyn ModuleGraphProvider, closure: Closure) -> Vec<PathBuf> {
        let nodes = match self {
            ModuleList::All => graph.all().into_iter().collect(),
            ModuleList::Dirs(dirs) => ModuleGraphSelector::new(graph).select(closure, dirs),
        };
        let mut roots: Vec<PathBuf> = nodes.into_iter().map(|n| n.root).collect();
        roots.sort();
        roots.dedup();
        roots
    }

    /// Render as list-file lines: sorted manifest paths relative to `root`.
    ///
    /// A module directory named in `strip_dirs` is replaced by its parent.
    pub fn to_lines(&self, manifest_name: &str, root: &Path, strip_dirs: &[String]) -> Vec<String> {
        let dirs = match self {
            ModuleList::All => return vec![SELECT_ALL.to_string()],
            ModuleList::Dirs(dirs) => dirs,
        };
        let mut lines: Vec<String> = dirs
            .iter()
            .map(|dir| {
                let dir = strip_module_dir(dir, strip_dirs);
                let relative = dir.strip_prefix(root).unwrap_or(&dir);
                paths::to_slash(&relative.join(manifest_name))
            })
            .collect();
        lines.sort();
        lines.dedup();
        lines
    }
}

/// `dir`'s parent when its last component is one of `strip_dirs`.
pub fn strip_module_dir(dir: &Path, strip_dirs: &[String]) -> PathBuf {
    let stripped = dir
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| strip_dirs.iter().any(|s| s == name));
    match dir.parent() {
        Some(parent) if stripped => parent.to_path_buf(),
        _ => dir.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
