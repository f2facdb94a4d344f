// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git-backed change-set provider.
//!
//! Diffs and historical content come from the `git` executable so the
//! `diff --git` header format is parsed exactly as git prints it. Path
//! quoting is limited to special characters; non-ASCII paths stay literal. Working
//! tree status goes through git2 (libgit2).
//!
//! ## Caching
//!
//! - `diff` results are cached per `(from, to)` pair.
//! - `content_at` results are cached per `revision:path`.
//! - Failed calls are never cached, so a retry re-invokes git.

use std::path::{Path, PathBuf};
use std::process::Command;

use dashmap::DashMap;
use git2::{Repository, Status, StatusOptions};

use crate::change::{ChangeSet, ChangeSetItem, ChangeSetProvider, ChangeType, parse_diff_output};
use crate::error::{Error, Result};
use crate::paths;

/// Change-set provider for one git repository.
pub struct GitClient {
    root: PathBuf,
    diff_cache: DashMap<(String, String), ChangeSet>,
    content_cache: DashMap<String, String>,
}

impl GitClient {
    /// Create a client for the repository at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            diff_cache: DashMap::new(),
            content_cache: DashMap::new(),
        }
    }

    /// Run `git -P -c core.quotePath=false -C <root> <args>` and return stdout.
    fn run_git(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("git {}", args.join(" "));
        tracing::debug!("running {}", command_line);

        let output = Command::new("git")
            .arg("-P")
            .args(["-c", "core.quotePath=false"])
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(|e| Error::Vcs {
                command: command_line.clone(),
                message: format!("failed to run git: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Vcs {
                command: command_line,
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn status_error(e: git2::Error) -> Error {
        Error::Vcs {
            command: "status".to_string(),
            message: e.message().to_string(),
        }
    }
}

impl ChangeSetProvider for GitClient {
    fn root(&self) -> &Path {
        &self.root
    }

    fn diff(&self, from: &str, to: &str) -> Result<ChangeSet> {
        let key = (from.to_string(), to.to_string());
        if let Some(cached) = self.diff_cache.get(&key) {
            return Ok(cached.clone());
        }

        let range = format!("{from}...{to}");
        let output = self.run_git(&["diff", "--ignore-all-space", "--no-renames", &range])?;
        let items = parse_diff_output(&output);
        tracing::debug!("diff {} -> {} changed files", range, items.len());

        self.diff_cache.insert(key, items.clone());
        Ok(items)
    }

    fn content_at(&self, path: &Path, revision: &str) -> Result<String> {
        let key = format!("{}:{}", revision, paths::to_slash(path));
        if let Some(cached) = self.content_cache.get(&key) {
            return Ok(cached.clone());
        }

        let content = self.run_git(&["show", &key])?;
        self.content_cache.insert(key, content.clone());
        Ok(content)
    }

    fn working_tree_status(&self) -> Result<ChangeSet> {
        let repo = Repository::discover(&self.root).map_err(Self::status_error)?;

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(false)
            .renames_index_to_workdir(false);

        let statuses = repo.statuses(Some(&mut options)).map_err(Self::status_error)?;

        let mut items = ChangeSet::new();
        for entry in statuses.iter() {
            let Some(path) = entry.path() else {
                continue;
            };
            if let Some(change_type) = classify_status(entry.status()) {
                items.insert(ChangeSetItem::new(change_type, path));
            }
        }
        Ok(items)
    }
}

/// Map a git2 status to the change it would become once everything is staged.
///
/// Untracked files are reported as added.
fn classify_status(status: Status) -> Option<ChangeType> {
    if status.contains(Status::INDEX_NEW | Status::WT_DELETED) {
        // Staged then removed again: staging everything leaves no change.
        None
    } else if status.intersects(Status::WT_DELETED | Status::INDEX_DELETED) {
        Some(ChangeType::Deleted)
    } else if status.intersects(Status::WT_NEW | Status::INDEX_NEW) {
        Some(ChangeType::Added)
    } else if status.intersects(
        Status::WT_MODIFIED
            | Status::INDEX_MODIFIED
            | Status::WT_TYPECHANGE
            | Status::INDEX_TYPECHANGE
            | Status::WT_RENAMED
            | Status::INDEX_RENAMED,
    ) {
        Some(ChangeType::Modified)
    } else {
        None
    }
}

/// Check if a path is in a git repository.
pub fn is_git_repo(root: &Path) -> bool {
    Repository::discover(root).is_ok()
}

/// Detect the comparison branch (main or master).
pub fn detect_base_branch(root: &Path) -> Option<String> {
    let repo = Repository::discover(root).ok()?;

    if repo.find_branch("main", git2::BranchType::Local).is_ok() {
        return Some("main".to_string());
    }

    if repo.find_branch("master", git2::BranchType::Local).is_ok() {
        return Some("master".to_string());
    }

    for name in ["origin/main", "origin/master"] {
        if repo.revparse_single(name).is_ok() {
            return Some(name.to_string());
        }
    }

    None
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
