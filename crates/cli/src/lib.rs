// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Regression test selection and incremental module selection for
//! multi-module repositories.

pub mod analyzer;
pub mod change;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod git;
pub mod locator;
pub mod modules;
pub mod output;
pub mod paths;
pub mod report;
pub mod selection;
pub mod walker;

pub use change::{ChangeSet, ChangeSetItem, ChangeSetProvider, ChangeType};
pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use git::GitClient;
pub use locator::TestLocator;
pub use modules::{ModuleGraphProvider, ModuleNode, StaticModuleGraph};
pub use selection::{
    CauseKind, FileLevelSelection, NoopSelection, SelectionCause, SelectionMediator,
    SelectionStrategy, TestSelectionResult, TestSuiteRecord,
};
pub use walker::{FileWalker, WalkStats, WalkerConfig};

#[cfg(test)]
pub mod test_utils;
