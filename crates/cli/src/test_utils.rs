// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::change::{ChangeSet, ChangeSetProvider};
use crate::error::{Error, Result};
use crate::selection::TestSuiteRecord;

/// Creates a temp directory with a minimal retest.toml.
pub fn temp_project() -> TempDir {
    temp_project_with_config("version = 1\n")
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("retest.toml"), config).unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
///
/// # Example
///
/// ```ignore
/// let tmp = temp_project();
/// create_tree(tmp.path(), &[
///     ("core/pom.xml", "<project/>"),
///     ("core/src/test/java/FooTest.java", "class FooTest {}"),
/// ]);
/// ```
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Report record from string slices.
pub fn suite(id: &str, opened: &[&str], covered: &[&str]) -> TestSuiteRecord {
    TestSuiteRecord {
        test_id: id.to_string(),
        opened_files: opened.iter().map(|s| s.to_string()).collect(),
        covered_entities: covered.iter().map(|s| s.to_string()).collect(),
    }
}

/// In-memory change-set provider.
///
/// Historical content is keyed by `(revision, path)`; a missing entry fails
/// like `git show` would.
pub struct FakeProvider {
    pub root: PathBuf,
    pub changes: ChangeSet,
    pub history: HashMap<(String, PathBuf), String>,
}

impl FakeProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            changes: ChangeSet::new(),
            history: HashMap::new(),
        }
    }

    pub fn with_history(mut self, revision: &str, path: &str, content: &str) -> Self {
        self.history
            .insert((revision.to_string(), PathBuf::from(path)), content.to_string());
        self
    }
}

impl ChangeSetProvider for FakeProvider {
    fn root(&self) -> &Path {
        &self.root
    }

    fn diff(&self, _from: &str, _to: &str) -> Result<ChangeSet> {
        Ok(self.changes.clone())
    }

    fn content_at(&self, path: &Path, revision: &str) -> Result<String> {
        self.history
            .get(&(revision.to_string(), path.to_path_buf()))
            .cloned()
            .ok_or_else(|| Error::Vcs {
                command: format!("show {}:{}", revision, path.display()),
                message: "path does not exist".to_string(),
            })
    }

    fn working_tree_status(&self) -> Result<ChangeSet> {
        Ok(self.changes.clone())
    }
}
