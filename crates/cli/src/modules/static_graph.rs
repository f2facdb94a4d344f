// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Module graph loaded from a TOML description.
//!
//! ```toml
//! [[module]]
//! id = "app"
//! path = "app"
//! depends_on = ["core"]
//! ```
//!
//! Edge A→B means "A depends on B". Cycles and dependencies on unknown ids
//! are rejected when the graph is built.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{Bfs, Reversed};
use serde::Deserialize;

use super::{ModuleGraphProvider, ModuleNode};
use crate::error::{Error, Result};
use crate::paths;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphFile {
    #[serde(default)]
    module: Vec<ModuleEntry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleEntry {
    id: String,
    path: PathBuf,
    #[serde(default)]
    depends_on: Vec<String>,
}

/// Module graph with fixed nodes and edges.
pub struct StaticModuleGraph {
    graph: StableDiGraph<ModuleNode, ()>,
    by_root: HashMap<PathBuf, NodeIndex>,
}

impl StaticModuleGraph {
    /// Build a graph from nodes, validating ids, roots and edges.
    pub fn from_nodes(nodes: Vec<ModuleNode>) -> Result<Self> {
        let mut graph = StableDiGraph::new();
        let mut by_id: HashMap<String, NodeIndex> = HashMap::new();
        let mut by_root: HashMap<PathBuf, NodeIndex> = HashMap::new();

        for mut node in nodes {
            node.root = paths::normalize(&node.root);
            if by_id.contains_key(&node.id) {
                return Err(Error::Graph(format!("duplicate module id '{}'", node.id)));
            }
            if by_root.contains_key(&node.root) {
                return Err(Error::Graph(format!(
                    "module '{}' shares its directory {} with another module",
                    node.id,
                    node.root.display()
                )));
            }
            let id = node.id.clone();
            let root = node.root.clone();
            let idx = graph.add_node(node);
            by_id.insert(id, idx);
            by_root.insert(root, idx);
        }

        let indices: Vec<NodeIndex> = graph.node_indices().collect();
        for idx in indices {
            let (id, dependencies) = match graph.node_weight(idx) {
                Some(node) => (node.id.clone(), node.dependencies.clone()),
                None => continue,
            };
            for dep in dependencies {
                let Some(&dep_idx) = by_id.get(&dep) else {
                    return Err(Error::Graph(format!(
                        "module '{id}' depends on unknown module '{dep}'"
                    )));
                };
                graph.update_edge(idx, dep_idx, ());
            }
        }

        if let Err(cycle) = toposort(&graph, None) {
            let id = graph
                .node_weight(cycle.node_id())
                .map(|n| n.id.clone())
                .unwrap_or_default();
            return Err(Error::Graph(format!(
                "dependency cycle through module '{id}'"
            )));
        }

        tracing::debug!(
            "module graph: {} modules, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(Self { graph, by_root })
    }

    /// Parse a TOML description; module paths are relative to `root`.
    pub fn parse(content: &str, root: &Path, source: &Path) -> Result<Self> {
        let file: GraphFile = toml::from_str(content).map_err(|e| Error::Config {
            message: e.to_string(),
            path: Some(source.to_path_buf()),
        })?;

        let nodes = file
            .module
            .into_iter()
            .map(|entry| ModuleNode {
                id: entry.id,
                root: paths::absolutize(&entry.path, root),
                dependencies: entry.depends_on,
            })
            .collect();
        Self::from_nodes(nodes)
    }

    /// Load a TOML description from disk.
    pub fn load(path: &Path, root: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, root, path)
    }

    fn collect(&self, indices: impl Iterator<Item = NodeIndex>) -> Vec<ModuleNode> {
        let mut nodes: Vec<ModuleNode> = indices
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }

    fn index_of(&self, node: &ModuleNode) -> Option<NodeIndex> {
        self.by_root.get(&paths::normalize(&node.root)).copied()
    }
}

impl ModuleGraphProvider for StaticModuleGraph {
    fn resolve(&self, dir: &Path) -> Option<ModuleNode> {
        let idx = self.by_root.get(&paths::normalize(dir))?;
        self.graph.node_weight(*idx).cloned()
    }

    fn upstream(&self, node: &ModuleNode, transitive: bool) -> Vec<ModuleNode> {
        let Some(start) = self.index_of(node) else {
            return Vec::new();
        };
        if !transitive {
            return self.collect(self.graph.neighbors_directed(start, Direction::Outgoing));
        }
        let mut bfs = Bfs::new(&self.graph, start);
        let mut reached = Vec::new();
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != start {
                reached.push(idx);
            }
        }
        self.collect(reached.into_iter())
    }

    fn downstream(&self, node: &ModuleNode, transitive: bool) -> Vec<ModuleNode> {
        let Some(start) = self.index_of(node) else {
            return Vec::new();
        };
        if !transitive {
            return self.collect(self.graph.neighbors_directed(start, Direction::Incoming));
        }
        let reversed = Reversed(&self.graph);
        let mut bfs = Bfs::new(reversed, start);
        let mut reached = Vec::new();
        while let Some(idx) = bfs.next(reversed) {
            if idx != start {
                reached.push(idx);
            }
        }
        self.collect(reached.into_iter())
    }

    fn all(&self) -> Vec<ModuleNode> {
        self.collect(self.graph.node_indices())
    }
}

#[cfg(test)]
#[path = "static_graph_tests.rs"]
mod tests;
