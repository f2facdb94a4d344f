// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lightweight source classification and type-name extraction.
//!
//! Every path falls into one [`SourceKind`]:
//!
//! - `Compiled`: handled by a registered [`CompilationUnitAnalyzer`]
//!   (Java by default); declared type names are extracted from content.
//! - `Native`: C/C++-family sources; no content analysis, callers map them
//!   to artifact names instead.
//! - `Asset`: everything else, matched by bare file name.
//!
//! Extraction is a heuristic text scan, not a parser. It may pick up
//! declaration-like text inside comments or strings, and it can miss types
//! hidden behind unusual syntax. Callers treat the result as best effort.

pub mod java;
pub mod native;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Error, Result};

pub use java::JavaAnalyzer;

/// File-stem patterns that mark a compilation unit as a test suite.
pub const TEST_FILE_PATTERNS: &[&str] = &["Test*", "*Test", "TestCase*", "*TestCase", "*Tests"];

#[allow(clippy::expect_used)]
static TEST_STEMS: LazyLock<GlobSet> = LazyLock::new(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in TEST_FILE_PATTERNS {
        builder.add(Glob::new(pattern).expect("valid glob"));
    }
    builder.build().expect("valid glob set")
});

/// Broad classification of a changed or discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Compiled,
    Native,
    Asset,
}

/// Result of scanning one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Package or namespace qualifier; empty when none was declared.
    pub package: String,
    /// Declared type names in source order, unqualified.
    pub type_names: Vec<String>,
}

impl CompilationUnit {
    /// `package.name`, or bare `name` without a package.
    pub fn qualify(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }

    /// All declared types, fully qualified.
    pub fn qualified_type_names(&self) -> BTreeSet<String> {
        self.type_names.iter().map(|name| self.qualify(name)).collect()
    }
}

/// Per-language extraction of package and declared type names.
pub trait CompilationUnitAnalyzer: Send + Sync {
    /// Whether this analyzer understands the file at `path`.
    fn handles(&self, path: &Path) -> bool;

    /// Scan `content` for its package qualifier and type declarations.
    fn analyze(&self, content: &str) -> CompilationUnit;
}

/// Registry of compilation-unit analyzers plus the native/asset fallback.
pub struct SourceAnalyzer {
    analyzers: Vec<Box<dyn CompilationUnitAnalyzer>>,
}

impl Default for SourceAnalyzer {
    fn default() -> Self {
        Self::new(vec![Box::new(JavaAnalyzer)])
    }
}

impl SourceAnalyzer {
    pub fn new(analyzers: Vec<Box<dyn CompilationUnitAnalyzer>>) -> Self {
        Self { analyzers }
    }

    fn analyzer_for(&self, path: &Path) -> Option<&dyn CompilationUnitAnalyzer> {
        self.analyzers
            .iter()
            .find(|a| a.handles(path))
            .map(|a| a.as_ref())
    }

    /// Classify a path by extension family.
    pub fn classify(&self, path: &Path) -> SourceKind {
        if self.analyzer_for(path).is_some() {
            SourceKind::Compiled
        } else if native::is_native_file(path) {
            SourceKind::Native
        } else {
            SourceKind::Asset
        }
    }

    /// Scan a compilation unit, or `None` when no analyzer handles `path`.
    pub fn analyze(&self, path: &Path, content: &str) -> Option<CompilationUnit> {
        self.analyzer_for(path).map(|a| a.analyze(content))
    }

    /// Fully-qualified names of every type declared in `content`.
    ///
    /// Never fails: a unit with no recognizable declaration yields an empty
    /// set and a warning.
    pub fn type_names(&self, path: &Path, content: &str) -> BTreeSet<String> {
        let names = self
            .analyze(path, content)
            .map(|unit| unit.qualified_type_names())
            .unwrap_or_default();
        if names.is_empty() {
            tracing::warn!("no type declarations found in {}", path.display());
        }
        names
    }

    /// Fully-qualified primary type of a compilation unit.
    ///
    /// The primary type is named after the file stem when the unit declares
    /// it, otherwise it is the first declaration found. A unit without any
    /// declaration is a parse error.
    pub fn primary_type(&self, path: &Path, content: &str) -> Result<String> {
        let unit = self.analyze(path, content).unwrap_or_default();
        let stem = file_stem(path);

        if unit.type_names.iter().any(|name| *name == stem) {
            return Ok(unit.qualify(&stem));
        }
        match unit.type_names.first() {
            Some(first) => Ok(unit.qualify(first)),
            None => Err(Error::Parse {
                path: path.to_path_buf(),
                message: "no type declaration found".to_string(),
            }),
        }
    }

    /// Suite name of a changed test file.
    ///
    /// Falls back to the package-qualified file stem when no declaration is
    /// found, so the file still counts as a changed suite.
    pub fn suite_name(&self, path: &Path, content: &str) -> String {
        self.primary_type(path, content).unwrap_or_else(|err| {
            tracing::warn!("{}; using the file name", err);
            self.analyze(path, content)
                .unwrap_or_default()
                .qualify(&file_stem(path))
        })
    }

    /// Whether `path` is a compilation unit whose stem names a test suite.
    pub fn is_test_file(&self, path: &Path) -> bool {
        self.analyzer_for(path).is_some() && is_test_stem(&file_stem(path))
    }
}

/// File name without its final extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Case-sensitive match of a file stem against [`TEST_FILE_PATTERNS`].
pub fn is_test_stem(stem: &str) -> bool {
    TEST_STEMS.is_match(stem)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
