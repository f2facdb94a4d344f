// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output of selection runs: console formatters and the files handed to
//! the build.

pub mod files;
pub mod json;
pub mod text;

use serde::Serialize;

use crate::selection::{CauseKind, SelectedTestSuite, TestSelectionResult};

pub use files::OutputFiles;

/// One selected suite for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteOutput {
    pub test_id: String,
    pub cause: CauseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&SelectedTestSuite> for SuiteOutput {
    fn from(selected: &SelectedTestSuite) -> Self {
        Self {
            test_id: selected.suite.test_id.clone(),
            cause: selected.cause.kind,
            reason: selected.cause.reason.clone(),
        }
    }
}

/// Everything a test selection run reports.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOutput {
    pub timestamp: String,
    pub strategy: String,
    pub changes: usize,
    pub selected: Vec<SuiteOutput>,
    /// Selected suites the test report does not know about.
    pub unreported: Vec<SuiteOutput>,
    pub excluded: Vec<String>,
    /// Module list lines for the selected suites.
    pub modules: Vec<String>,
}

impl SelectionOutput {
    pub fn new(
        strategy: &str,
        changes: usize,
        result: &TestSelectionResult,
        modules: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            timestamp: json::timestamp(),
            strategy: strategy.to_string(),
            changes,
            selected: result.selected.iter().map(Into::into).collect(),
            unreported: result.unreported.iter().map(Into::into).collect(),
            excluded: result.excluded.iter().map(|s| s.test_id.clone()).collect(),
            modules: modules.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
