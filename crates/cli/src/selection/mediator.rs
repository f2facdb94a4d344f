// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build-aware orchestration of test selection.
//!
//! 1. Manifest changes mark their own directory as a changed module;
//!    compile-time files (schemas, interface definitions) mark the nearest
//!    module above them. Deleted items are ignored here.
//! 2. Each changed module is expanded to its transitive downstream closure
//!    and every test under those modules is pre-selected as `BUILD_CHANGE`.
//! 3. The configured strategy decides the rest of the report.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;

use super::{
    CauseKind, PreSelection, SelectedTestSuite, SelectionCause, SelectionStrategy,
    TestSelectionResult,
};
use crate::change::{ChangeSet, ChangeType};
use crate::error::Result;
use crate::locator::TestLocator;
use crate::modules::{ManifestLocator, ModuleGraphProvider, ModuleGraphSelector};
use crate::paths;

/// Project conventions the mediator needs.
#[derive(Debug, Clone)]
pub struct MediatorSettings {
    /// Repository root that change-set paths are relative to.
    pub root: PathBuf,
    /// Module manifest file name, e.g. `pom.xml`.
    pub manifest_name: String,
    /// Extensions of files that generate code at build time.
    pub compile_time_extensions: Vec<String>,
}

/// Runs module escalation, then a selection strategy.
pub struct SelectionMediator {
    settings: MediatorSettings,
    graph: Arc<dyn ModuleGraphProvider>,
    locator: Arc<TestLocator>,
    manifests: ManifestLocator,
    strategy: Box<dyn SelectionStrategy>,
}

impl SelectionMediator {
    pub fn new(
        settings: MediatorSettings,
        graph: Arc<dyn ModuleGraphProvider>,
        locator: Arc<TestLocator>,
        strategy: Box<dyn SelectionStrategy>,
    ) -> Self {
        let manifests = ManifestLocator::new(settings.manifest_name.clone());
        Self {
            settings,
            graph,
            locator,
            manifests,
            strategy,
        }
    }

    /// Module directories whose build definition changed, each with the
    /// first change-set path that marked it.
    pub fn changed_build_modules(&self, changes: &ChangeSet) -> BTreeMap<PathBuf, String> {
        let mut roots = BTreeMap::new();

        for item in changes {
            if item.change_type == ChangeType::Deleted {
                continue;
            }
            let full = paths::absolutize(&item.path, &self.settings.root);
            let module = if paths::has_file_name(&item.path, &self.settings.manifest_name) {
                full.parent().map(|p| p.to_path_buf())
            } else if paths::has_any_extension(&item.path, &self.settings.compile_time_extensions) {
                let module = self.manifests.module_for_file(&full);
                if module.is_none() {
                    tracing::warn!(
                        "no {} owns {}; ignoring it for build impact",
                        self.settings.manifest_name,
                        item.path.display()
                    );
                }
                module
            } else {
                None
            };

            if let Some(module) = module {
                tracing::debug!("build change in {} via {}", module.display(), item.path.display());
                roots
                    .entry(module)
                    .or_insert_with(|| paths::to_slash(&item.path));
            }
        }

        roots
    }

    /// Every test under the downstream closure of each build change.
    ///
    /// A changed module the graph does not know is its own closure.
    pub fn pre_select(&self, changes: &ChangeSet) -> PreSelection {
        let mut pre_selected = PreSelection::new();
        let selector = ModuleGraphSelector::new(self.graph.as_ref());

        for (root, trigger) in self.changed_build_modules(changes) {
            let mut dirs: BTreeSet<PathBuf> = selector
                .select_downstream(std::slice::from_ref(&root), true)
                .into_iter()
                .map(|module| module.root)
                .collect();
            dirs.insert(paths::normalize(&root));
            for dir in &dirs {
                for test_id in self.locator.tests_under(dir) {
                    pre_selected
                        .entry(test_id)
                        .or_insert_with(|| SelectionCause::with_reason(CauseKind::BuildChange, &trigger));
                }
            }
        }

        if !pre_selected.is_empty() {
            tracing::info!("pre-selected {} tests for build changes", pre_selected.len());
        }
        pre_selected
    }

    /// Select tests for `changes`.
    pub fn execute(&self, changes: &ChangeSet) -> Result<TestSelectionResult> {
        let pre_selected = self.pre_select(changes);
        self.strategy.execute(changes, &pre_selected)
    }

    /// Module directories owning the given suites.
    ///
    /// Suites without a backing file are left out.
    pub fn modules_for_tests<'a>(
        &self,
        suites: impl IntoIterator<Item = &'a SelectedTestSuite>,
    ) -> BTreeSet<PathBuf> {
        let mut modules = BTreeSet::new();
        for selected in suites {
            let id = &selected.suite.test_id;
            let Some(file) = self.locator.lookup(id) else {
                tracing::debug!("no backing file for {}", id);
                continue;
            };
            if let Some(module) = self.manifests.module_for_file(file) {
                modules.insert(module);
            }
        }
        modules
    }

    /// Module directories owning any changed path, deletions included.
    pub fn modules_for_changes(&self, changes: &ChangeSet) -> BTreeSet<PathBuf> {
        changes
            .iter()
            .filter_map(|item| {
                let full = paths::absolutize(&item.path, &self.settings.root);
                self.manifests.module_for_file(&full)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "mediator_tests.rs"]
mod tests;
