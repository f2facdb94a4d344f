// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build-module graph access and closure selection.
//!
//! The engine never builds the module graph itself. It queries a
//! [`ModuleGraphProvider`] supplied by the build-system integration;
//! [`StaticModuleGraph`] is the provider backed by a TOML description.

pub mod changed;
pub mod list;
pub mod manifest;
pub mod selector;
pub mod static_graph;

use std::path::{Path, PathBuf};

pub use changed::ChangedModules;
pub use list::{ModuleList, strip_module_dir};
pub use manifest::ManifestLocator;
pub use selector::{Closure, ModuleGraphSelector};
pub use static_graph::StaticModuleGraph;

/// One build module and its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleNode {
    pub id: String,
    /// Normalized absolute module directory.
    pub root: PathBuf,
    /// Ids of the modules this one depends on directly.
    pub dependencies: Vec<String>,
}

/// Read-only view of a module dependency graph.
///
/// "Upstream" of a module is what it needs in order to build; "downstream"
/// is everything that depends on it.
pub trait ModuleGraphProvider: Send + Sync {
    /// Module whose root directory is `dir`, if any.
    fn resolve(&self, dir: &Path) -> Option<ModuleNode>;

    /// Modules `node` depends on, directly or transitively. Excludes `node`.
    fn upstream(&self, node: &ModuleNode, transitive: bool) -> Vec<ModuleNode>;

    /// Modules depending on `node`, directly or transitively. Excludes `node`.
    fn downstream(&self, node: &ModuleNode, transitive: bool) -> Vec<ModuleNode>;

    /// Every module in the graph.
    fn all(&self) -> Vec<ModuleNode>;
}
