// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test selection: result types, strategies and the build-aware mediator.
//!
//! A [`SelectionStrategy`] turns a change set plus a pre-selection into a
//! [`TestSelectionResult`]. Every suite of the input report lands in exactly
//! one of `selected` or `excluded`. Pre-selected or changed suites that the
//! report does not know about are listed separately in `unreported`.

pub mod affected;
pub mod file_level;
pub mod mediator;
pub mod noop;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::change::ChangeSet;
use crate::error::Result;

pub use affected::{AffectedInfo, ArtifactMapping};
pub use file_level::FileLevelSelection;
pub use mediator::{MediatorSettings, SelectionMediator};
pub use noop::NoopSelection;

/// Why a suite was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CauseKind {
    RetestAll,
    Affected,
    AddedChanged,
    BuildChange,
}

impl fmt::Display for CauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CauseKind::RetestAll => "RETEST_ALL",
            CauseKind::Affected => "AFFECTED",
            CauseKind::AddedChanged => "ADDED_CHANGED",
            CauseKind::BuildChange => "BUILD_CHANGE",
        };
        f.write_str(label)
    }
}

/// Selection cause with an optional free-text reason (e.g. the matched token).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SelectionCause {
    pub kind: CauseKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SelectionCause {
    pub fn new(kind: CauseKind) -> Self {
        Self { kind, reason: None }
    }

    pub fn with_reason(kind: CauseKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: Some(reason.into()),
        }
    }
}

impl fmt::Display for SelectionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{} ({})", self.kind, reason),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// One suite of a test-execution report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuiteRecord {
    pub test_id: String,
    /// File tokens the suite opened during its last run.
    #[serde(default)]
    pub opened_files: BTreeSet<String>,
    /// Fully-qualified entities the suite exercised.
    #[serde(default)]
    pub covered_entities: BTreeSet<String>,
}

impl TestSuiteRecord {
    /// Record with no trace data.
    pub fn new(test_id: impl Into<String>) -> Self {
        Self {
            test_id: test_id.into(),
            ..Default::default()
        }
    }
}

/// A selected suite and the reason it was chosen.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedTestSuite {
    pub cause: SelectionCause,
    pub suite: TestSuiteRecord,
}

impl PartialEq for SelectedTestSuite {
    fn eq(&self, other: &Self) -> bool {
        self.suite.test_id == other.suite.test_id && self.cause == other.cause
    }
}

impl Eq for SelectedTestSuite {}

impl std::hash::Hash for SelectedTestSuite {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.suite.test_id.hash(state);
        self.cause.hash(state);
    }
}

/// Outcome of one selection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestSelectionResult {
    pub selected: Vec<SelectedTestSuite>,
    pub excluded: Vec<TestSuiteRecord>,
    /// Pre-selected or changed suites absent from the report.
    pub unreported: Vec<SelectedTestSuite>,
}

impl TestSelectionResult {
    /// Ids of every suite to run: selected first, then unreported.
    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected
            .iter()
            .chain(self.unreported.iter())
            .map(|s| s.suite.test_id.as_str())
            .collect()
    }
}

/// Suites chosen before the strategy runs, keyed by test id or short name.
pub type PreSelection = BTreeMap<String, SelectionCause>;

/// Policy turning a change set into a selection.
pub trait SelectionStrategy: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Decide every report suite. Pre-selected suites keep their cause.
    fn execute(&self, changes: &ChangeSet, pre_selected: &PreSelection) -> Result<TestSelectionResult>;
}

/// Split a report into selected and excluded suites.
///
/// Pre-selection always wins; `decide` only sees the remaining suites. A
/// pre-selection key matches a suite by full id or by short name. A
/// test id repeated in the report is decided once, by its first record.
/// `extra` names suites that must run even when the report lacks them.
pub(crate) fn partition(
    report: &[TestSuiteRecord],
    pre_selected: &PreSelection,
    extra: impl IntoIterator<Item = (String, SelectionCause)>,
    mut decide: impl FnMut(&TestSuiteRecord) -> Option<SelectionCause>,
) -> TestSelectionResult {
    let mut result = TestSelectionResult::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    for suite in report {
        if !seen.insert(suite.test_id.as_str()) {
            tracing::warn!("duplicate test id {} in report", suite.test_id);
            continue;
        }
        let cause = match pre_selected_entry(pre_selected, &suite.test_id) {
            Some((key, cause)) => {
                claimed.insert(key);
                Some(cause.clone())
            }
            None => decide(suite),
        };
        match cause {
            Some(cause) => {
                tracing::debug!("select {}: {}", suite.test_id, cause);
                result.selected.push(SelectedTestSuite {
                    cause,
                    suite: suite.clone(),
                });
            }
            None => result.excluded.push(suite.clone()),
        }
    }

    let candidates = pre_selected
        .iter()
        .map(|(id, cause)| (id.clone(), cause.clone()))
        .chain(extra);
    let mut unreported: BTreeMap<String, SelectionCause> = BTreeMap::new();
    for (id, cause) in candidates {
        if !seen.contains(id.as_str()) && !claimed.contains(id.as_str()) {
            unreported.entry(id).or_insert(cause);
        }
    }
    result.unreported = unreported
        .into_iter()
        .map(|(id, cause)| SelectedTestSuite {
            cause,
            suite: TestSuiteRecord::new(id),
        })
        .collect();

    result
}

/// Pre-selection entry for `test_id`, probing the full id then the short name.
fn pre_selected_entry<'a>(
    pre_selected: &'a PreSelection,
    test_id: &str,
) -> Option<(&'a str, &'a SelectionCause)> {
    pre_selected
        .get_key_value(test_id)
        .or_else(|| {
            let short = test_id.rsplit('.').next()?;
            pre_selected.get_key_value(short)
        })
        .map(|(key, cause)| (key.as_str(), cause))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
