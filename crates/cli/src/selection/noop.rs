// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Retest-all strategy.

use super::{
    CauseKind, PreSelection, SelectionCause, SelectionStrategy, TestSelectionResult,
    TestSuiteRecord, partition,
};
use crate::change::ChangeSet;
use crate::error::Result;

/// Selects every report suite, whatever changed.
pub struct NoopSelection {
    report: Vec<TestSuiteRecord>,
}

impl NoopSelection {
    pub fn new(report: Vec<TestSuiteRecord>) -> Self {
        Self { report }
    }
}

impl SelectionStrategy for NoopSelection {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn execute(&self, _changes: &ChangeSet, pre_selected: &PreSelection) -> Result<TestSelectionResult> {
        let cause = SelectionCause::with_reason(CauseKind::RetestAll, "noop");
        Ok(partition(&self.report, pre_selected, std::iter::empty(), |_| Some(cause.clone())))
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
