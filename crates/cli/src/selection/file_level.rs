// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File-level impact analysis against recorded test traces.
//!
//! Each change-set item contributes evidence to one [`AffectedInfo`]:
//!
//! - Compiled units add every type declared before the change (unless the
//!   file was added) and after it (unless deleted). A changed test file
//!   also names its own suite.
//! - Native units add the artifacts they map to, or their file name.
//! - Assets add their file name.
//!
//! Suites are then decided in tiers: pre-selected, changed suite, affected,
//! excluded. The first tier that applies wins.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use super::{
    AffectedInfo, ArtifactMapping, CauseKind, PreSelection, SelectionCause, SelectionStrategy,
    TestSelectionResult, TestSuiteRecord, partition,
};
use crate::analyzer::{SourceAnalyzer, SourceKind};
use crate::change::{ChangeSet, ChangeSetItem, ChangeSetProvider, ChangeType};
use crate::error::{Error, Result};
use crate::paths;

/// Impact-analysis strategy over a test report.
pub struct FileLevelSelection {
    report: Vec<TestSuiteRecord>,
    provider: Arc<dyn ChangeSetProvider>,
    analyzer: Arc<SourceAnalyzer>,
    /// Revision holding the content before the change.
    comparison_revision: String,
    /// Revision holding the content after the change; `None` reads the
    /// working tree.
    current_revision: Option<String>,
    mapping: ArtifactMapping,
}

impl FileLevelSelection {
    pub fn new(
        report: Vec<TestSuiteRecord>,
        provider: Arc<dyn ChangeSetProvider>,
        analyzer: Arc<SourceAnalyzer>,
        comparison_revision: impl Into<String>,
    ) -> Self {
        Self {
            report,
            provider,
            analyzer,
            comparison_revision: comparison_revision.into(),
            current_revision: None,
            mapping: ArtifactMapping::new(),
        }
    }

    /// Read post-change content from `revision` instead of the working tree.
    pub fn with_current_revision(mut self, revision: impl Into<String>) -> Self {
        self.current_revision = Some(revision.into());
        self
    }

    pub fn with_mapping(mut self, mapping: ArtifactMapping) -> Self {
        self.mapping = mapping;
        self
    }

    fn current_content(&self, path: &Path) -> Result<String> {
        match &self.current_revision {
            Some(revision) => self.provider.content_at(path, revision),
            None => {
                let full = self.provider.root().join(path);
                std::fs::read_to_string(&full).map_err(|e| Error::io(full, e))
            }
        }
    }

    /// Artifacts mapped to `path`, by repository-relative or absolute key.
    fn mapped_artifacts(&self, path: &Path) -> Option<&BTreeSet<String>> {
        let relative = paths::to_slash(path);
        self.mapping.get(&relative).or_else(|| {
            let absolute = paths::to_slash(&paths::absolutize(path, self.provider.root()));
            self.mapping.get(&absolute)
        })
    }

    /// Evidence contributed by one change-set item.
    pub fn analyze_item(&self, item: &ChangeSetItem) -> Result<AffectedInfo> {
        let mut info = AffectedInfo::default();
        let path = item.path.as_path();

        match self.analyzer.classify(path) {
            SourceKind::Compiled => {
                if item.change_type != ChangeType::Added {
                    let old = self.provider.content_at(path, &self.comparison_revision)?;
                    info.entities.extend(self.analyzer.type_names(path, &old));
                }
                if item.change_type != ChangeType::Deleted {
                    let current = self.current_content(path)?;
                    info.entities.extend(self.analyzer.type_names(path, &current));
                    if self.analyzer.is_test_file(path) {
                        info.changed_suites.insert(self.analyzer.suite_name(path, &current));
                    }
                }
            }
            SourceKind::Native => match self.mapped_artifacts(path) {
                Some(artifacts) => info.files.extend(artifacts.iter().cloned()),
                None => {
                    info.files.insert(paths::file_name(path));
                }
            },
            SourceKind::Asset => {
                info.files.insert(paths::file_name(path));
            }
        }

        tracing::debug!(
            "{} {}: {} files, {} entities",
            item.change_type,
            path.display(),
            info.files.len(),
            info.entities.len()
        );
        Ok(info)
    }

    /// Union of the evidence of every item.
    pub fn analyze(&self, changes: &ChangeSet) -> Result<AffectedInfo> {
        let mut info = AffectedInfo::default();
        for item in changes {
            info.merge(self.analyze_item(item)?);
        }
        Ok(info)
    }
}

impl SelectionStrategy for FileLevelSelection {
    fn name(&self) -> &'static str {
        "file-level"
    }

    fn execute(&self, changes: &ChangeSet, pre_selected: &PreSelection) -> Result<TestSelectionResult> {
        let info = self.analyze(changes)?;

        let changed = info
            .changed_suites
            .iter()
            .map(|id| (id.clone(), SelectionCause::new(CauseKind::AddedChanged)));

        let result = partition(&self.report, pre_selected, changed, |suite| {
            if info.changed_suites.contains(&suite.test_id) {
                return Some(SelectionCause::new(CauseKind::AddedChanged));
            }
            info.match_suite(suite)
                .map(|reason| SelectionCause::with_reason(CauseKind::Affected, reason))
        });

        tracing::info!(
            "{} selection: {} selected, {} excluded, {} unreported",
            self.name(),
            result.selected.len(),
            result.excluded.len(),
            result.unreported.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "file_level_tests.rs"]
mod tests;
