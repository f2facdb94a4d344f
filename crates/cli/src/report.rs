// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Readers for the collaborator-supplied inputs of a selection run.
//!
//! - Test reports: JSON `{ "testSuites": [ { "testId", "openedFiles",
//!   "coveredEntities" } ] }` from the instrumented previous run.
//! - Artifact mappings: `artifact;source` lines relating native sources to
//!   the artifacts built from them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::selection::{ArtifactMapping, TestSuiteRecord};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportFile {
    #[serde(default)]
    test_suites: Vec<TestSuiteRecord>,
}

/// Parse a JSON test report. `source` is only used in error messages.
pub fn parse_report(content: &str, source: &Path) -> Result<Vec<TestSuiteRecord>> {
    let file: ReportFile = serde_json::from_str(content).map_err(|e| Error::Report {
        path: source.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(file.test_suites)
}

/// Read a JSON test report from disk.
pub fn load_report(path: &Path) -> Result<Vec<TestSuiteRecord>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let suites = parse_report(&content, path)?;
    tracing::info!("loaded {} suites from {}", suites.len(), path.display());
    Ok(suites)
}

/// Add the `artifact;source` lines of `content` to `mapping`.
///
/// Lines without a `;` are skipped. Surrounding whitespace is trimmed.
pub fn parse_mapping_into(content: &str, mapping: &mut ArtifactMapping) {
    for line in content.lines() {
        let Some((artifact, source)) = line.split_once(';') else {
            continue;
        };
        let (artifact, source) = (artifact.trim(), source.trim());
        if artifact.is_empty() || source.is_empty() {
            continue;
        }
        mapping
            .entry(source.to_string())
            .or_default()
            .insert(artifact.to_string());
    }
}

/// Read and merge artifact mapping files.
pub fn load_mappings(paths: &[PathBuf]) -> Result<ArtifactMapping> {
    let mut mapping = ArtifactMapping::new();
    for path in paths {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_mapping_into(&content, &mut mapping);
    }
    tracing::debug!("artifact mapping covers {} sources", mapping.len());
    Ok(mapping)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
