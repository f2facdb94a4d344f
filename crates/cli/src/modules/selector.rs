// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Upstream, downstream and transitive module closures.

use std::collections::BTreeSet;
use std::path::PathBuf;

use super::{ModuleGraphProvider, ModuleNode};

/// Which closure to compute from a set of changed modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// Changed modules plus everything they need to build.
    Upstream,
    /// Changed modules plus everything depending on them, transitively.
    Downstream,
    /// Full change impact; see [`ModuleGraphSelector::select_transitive`].
    Transitive,
}

/// Computes module closures over a [`ModuleGraphProvider`].
pub struct ModuleGraphSelector<'a> {
    graph: &'a dyn ModuleGraphProvider,
}

impl<'a> ModuleGraphSelector<'a> {
    pub fn new(graph: &'a dyn ModuleGraphProvider) -> Self {
        Self { graph }
    }

    /// Resolve directories to modules; unknown directories are skipped.
    fn resolve_all(&self, dirs: &[PathBuf]) -> Vec<ModuleNode> {
        dirs.iter()
            .filter_map(|dir| {
                let node = self.graph.resolve(dir);
                if node.is_none() {
                    tracing::warn!("{} is not a module in the graph", dir.display());
                }
                node
            })
            .collect()
    }

    fn upstream_of(&self, nodes: &[ModuleNode], transitive: bool) -> Vec<ModuleNode> {
        nodes
            .iter()
            .flat_map(|n| self.graph.upstream(n, transitive))
            .collect()
    }

    fn downstream_of(&self, nodes: &[ModuleNode], transitive: bool) -> Vec<ModuleNode> {
        nodes
            .iter()
            .flat_map(|n| self.graph.downstream(n, transitive))
            .collect()
    }

    /// Changed modules and their transitive prerequisites.
    pub fn select_upstream(&self, dirs: &[PathBuf]) -> BTreeSet<ModuleNode> {
        let modules = self.resolve_all(dirs);
        let mut selected: BTreeSet<ModuleNode> = modules.iter().cloned().collect();
        selected.extend(self.upstream_of(&modules, true));
        selected
    }

    /// Changed modules and their direct or transitive dependents.
    pub fn select_downstream(&self, dirs: &[PathBuf], transitive: bool) -> BTreeSet<ModuleNode> {
        let modules = self.resolve_all(dirs);
        let mut selected: BTreeSet<ModuleNode> = modules.iter().cloned().collect();
        selected.extend(self.downstream_of(&modules, transitive));
        selected
    }

    /// Changed modules, their transitive prerequisites, their direct
    /// dependents, and the transitive prerequisites of those dependents.
    ///
    /// Only direct dependents are expanded: a module two hops downstream
    /// is reached only if it is also a prerequisite of a direct dependent.
    pub fn select_transitive(&self, dirs: &[PathBuf]) -> BTreeSet<ModuleNode> {
        let modules = self.resolve_all(dirs);
        let mut selected: BTreeSet<ModuleNode> = modules.iter().cloned().collect();
        selected.extend(self.upstream_of(&modules, true));
        let dependents = self.downstream_of(&modules, false);
        selected.extend(self.upstream_of(&dependents, true));
        selected.extend(dependents);
        selected
    }

    /// Dispatch on a [`Closure`] mode.
    pub fn select(&self, closure: Closure, dirs: &[PathBuf]) -> BTreeSet<ModuleNode> {
        match closure {
            Closure::Upstream => self.select_upstream(dirs),
            Closure::Downstream => self.select_downstream(dirs, true),
            Closure::Transitive => self.select_transitive(dirs),
        }
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
