// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Files consumed by the build: `included.txt` and `modules.txt` under
//! `<dir>/<label>/`.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Test ids (or patterns) to run, one per line.
pub const INCLUDED_TESTS_FILE: &str = "included.txt";

/// Module manifest paths to build, one per line.
pub const MODULES_FILE: &str = "modules.txt";

/// Output directory of one run.
#[derive(Debug, Clone)]
pub struct OutputFiles {
    dir: PathBuf,
}

impl OutputFiles {
    /// `<root>/<dir>/<label>`; a relative `dir` resolves against `root`.
    pub fn new(root: &Path, dir: &Path, label: &str) -> Self {
        Self {
            dir: crate::paths::absolutize(dir, root).join(label),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, name: &str, lines: &[String]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        let path = self.dir.join(name);
        std::fs::write(&path, lines.join("\n")).map_err(|e| Error::io(&path, e))?;
        tracing::debug!("wrote {} lines to {}", lines.len(), path.display());
        Ok(path)
    }

    /// Write the selected test ids. `extra_patterns` follow them, but only
    /// when at least one test was selected.
    pub fn write_included_tests(&self, test_ids: &[&str], extra_patterns: &[String]) -> Result<PathBuf> {
        let mut lines: Vec<String> = test_ids.iter().map(|id| id.to_string()).collect();
        if !lines.is_empty() {
            lines.extend(extra_patterns.iter().cloned());
        }
        self.write(INCLUDED_TESTS_FILE, &lines)
    }

    /// Write module list lines.
    pub fn write_modules(&self, lines: &[String]) -> Result<PathBuf> {
        self.write(MODULES_FILE, lines)
    }
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
