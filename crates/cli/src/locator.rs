// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-suite to backing-file lookup.
//!
//! One walk finds every test file. By default suites are keyed by short
//! name (the file stem), which needs no parsing. When two files share a
//! short name, both move to a fully-qualified map, which requires reading
//! them. In full-identifier mode every file is parsed up front, in
//! parallel, and only the fully-qualified map is used.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analyzer::{SourceAnalyzer, file_stem};
use crate::error::{Error, Result};
use crate::paths;
use crate::walker::FileWalker;

/// Read-only map from test identifiers to files, built once per invocation.
#[derive(Debug, Default)]
pub struct TestLocator {
    by_name: HashMap<String, PathBuf>,
    by_identifier: HashMap<String, PathBuf>,
    full_identifiers: bool,
}

impl TestLocator {
    /// Walk `root` and map every test file found.
    pub fn scan(root: &Path, analyzer: &SourceAnalyzer, full_identifiers: bool) -> Result<Self> {
        let root = std::path::absolute(root).map_err(|e| Error::io(root, e))?;
        let (files, _) = FileWalker::default().walk_filtered(&root, |p| analyzer.is_test_file(p))?;
        let files: Vec<PathBuf> = files.iter().map(|f| paths::normalize(f)).collect();

        let locator = if full_identifiers {
            Self::with_full_identifiers(files, analyzer)?
        } else {
            Self::with_short_names(files, analyzer)?
        };
        tracing::info!(
            "located {} test files under {}",
            locator.len(),
            root.display()
        );
        Ok(locator)
    }

    fn with_full_identifiers(files: Vec<PathBuf>, analyzer: &SourceAnalyzer) -> Result<Self> {
        let parsed: Vec<Result<Option<(String, PathBuf)>>> = files
            .into_par_iter()
            .map(|file| -> Result<Option<(String, PathBuf)>> {
                Ok(identify(analyzer, &file)?.map(|id| (id, file)))
            })
            .collect();

        let mut by_identifier = HashMap::new();
        for entry in parsed {
            if let Some((id, file)) = entry? {
                insert_identifier(&mut by_identifier, id, file);
            }
        }
        Ok(Self {
            by_name: HashMap::new(),
            by_identifier,
            full_identifiers: true,
        })
    }

    fn with_short_names(mut files: Vec<PathBuf>, analyzer: &SourceAnalyzer) -> Result<Self> {
        // Walk order is not guaranteed; sorting keeps collisions deterministic.
        files.sort();

        let mut by_name: HashMap<String, PathBuf> = HashMap::new();
        let mut by_identifier = HashMap::new();
        let mut demoted: BTreeSet<String> = BTreeSet::new();

        for file in files {
            let name = file_stem(&file);
            if demoted.contains(&name) {
                if let Some(id) = identify(analyzer, &file)? {
                    insert_identifier(&mut by_identifier, id, file);
                }
                continue;
            }
            if let Some(existing) = by_name.remove(&name) {
                tracing::debug!("short name {} is ambiguous, using qualified names", name);
                demoted.insert(name);
                for path in [existing, file] {
                    if let Some(id) = identify(analyzer, &path)? {
                        insert_identifier(&mut by_identifier, id, path);
                    }
                }
                continue;
            }
            by_name.insert(name, file);
        }

        Ok(Self {
            by_name,
            by_identifier,
            full_identifiers: false,
        })
    }

    /// Build a locator from explicit entries (short-name mode).
    pub fn from_entries(
        by_name: impl IntoIterator<Item = (String, PathBuf)>,
        by_identifier: impl IntoIterator<Item = (String, PathBuf)>,
    ) -> Self {
        Self {
            by_name: by_name.into_iter().collect(),
            by_identifier: by_identifier.into_iter().collect(),
            full_identifiers: false,
        }
    }

    /// Backing file of a test identifier.
    ///
    /// Looks up the short name (text after the last `.`) first, then the full
    /// identifier.
    pub fn lookup(&self, identifier: &str) -> Option<&Path> {
        if !self.full_identifiers {
            let short = identifier.rsplit('.').next().unwrap_or(identifier);
            if let Some(path) = self.by_name.get(short) {
                return Some(path);
            }
        }
        self.by_identifier.get(identifier).map(PathBuf::as_path)
    }

    /// Every identifier whose backing file lies under `dir`.
    pub fn tests_under(&self, dir: &Path) -> BTreeSet<String> {
        let dir = paths::normalize(dir);
        self.entries()
            .filter(|(_, path)| path.starts_with(&dir))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// All mapped identifiers with their files.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
        self.by_name.iter().chain(self.by_identifier.iter())
    }

    pub fn len(&self) -> usize {
        self.by_name.len() + self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fully-qualified identifier of a test file.
///
/// Files without any declaration are skipped with a warning; read failures
/// abort the scan.
fn identify(analyzer: &SourceAnalyzer, file: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
    match analyzer.primary_type(file, &content) {
        Ok(id) => Ok(Some(id)),
        Err(err) => {
            tracing::warn!("skipping test file: {}", err);
            Ok(None)
        }
    }
}

fn insert_identifier(map: &mut HashMap<String, PathBuf>, id: String, file: PathBuf) {
    if let Some(previous) = map.get(&id) {
        tracing::warn!(
            "test {} declared in both {} and {}",
            id,
            previous.display(),
            file.display()
        );
        return;
    }
    map.insert(id, file);
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
