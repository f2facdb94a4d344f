// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Evidence accumulated from a change set, and suite matching against it.
//!
//! Matching is substring based. Affected file tokens match opened-file
//! tokens in either direction, so partial paths and partial file names
//! both hit. Affected entities match only when contained in a covered
//! entity, which catches synthesized nested types such as `ns.Foo$1`.
//! Short or common tokens can over-select; that trade is accepted.

use std::collections::{BTreeMap, BTreeSet};

use super::TestSuiteRecord;

/// Source path to the artifact names it is compiled into.
pub type ArtifactMapping = BTreeMap<String, BTreeSet<String>>;

/// Union of everything a change set touches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedInfo {
    /// File-name or artifact tokens.
    pub files: BTreeSet<String>,
    /// Fully-qualified type names.
    pub entities: BTreeSet<String>,
    /// Fully-qualified names of added or modified test suites.
    pub changed_suites: BTreeSet<String>,
}

impl AffectedInfo {
    pub fn merge(&mut self, other: AffectedInfo) {
        self.files.extend(other.files);
        self.entities.extend(other.entities);
        self.changed_suites.extend(other.changed_suites);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.entities.is_empty() && self.changed_suites.is_empty()
    }

    /// First affected token explaining why `suite` is affected, if any.
    ///
    /// File tokens are tried before entities, each in sorted order.
    pub fn match_suite(&self, suite: &TestSuiteRecord) -> Option<String> {
        for token in self.files.iter().filter(|t| !t.is_empty()) {
            let hit = suite.opened_files.iter().any(|opened| {
                opened.contains(token.as_str())
                    || (!opened.is_empty() && token.contains(opened.as_str()))
            });
            if hit {
                return Some(token.clone());
            }
        }
        for entity in self.entities.iter().filter(|e| !e.is_empty()) {
            if suite
                .covered_entities
                .iter()
                .any(|covered| covered.contains(entity.as_str()))
            {
                return Some(entity.clone());
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "affected_tests.rs"]
mod tests;
