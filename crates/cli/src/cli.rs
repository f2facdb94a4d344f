// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::modules::Closure;

/// Regression test selection and incremental module selection
#[derive(Parser)]
#[command(name = "retest")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "RETEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Select the test suites affected by a change
    SelectTests(SelectTestsArgs),
    /// Select the modules a change touches
    SelectModules(SelectModulesArgs),
    /// Expand module list files over the module graph
    ExpandModules(ExpandModulesArgs),
    /// Print the change set
    Changes(ChangesArgs),
}

/// Where the change comes from.
#[derive(clap::Args, Debug, Clone)]
pub struct RevisionArgs {
    /// Directory to scan for tests and discover config from (default:
    /// current directory). Changed paths and graph paths stay relative to
    /// the repository top level.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Target revision the change is integrated into (default: main or master)
    #[arg(long, value_name = "REF")]
    pub from: Option<String>,

    /// Source revision holding the change
    #[arg(long, value_name = "REF", default_value = "HEAD")]
    pub to: String,

    /// Use uncommitted working tree changes instead of a revision range
    #[arg(long, conflicts_with = "from")]
    pub working_tree: bool,

    /// Regex a changed path must fully match (overrides config)
    #[arg(long, value_name = "REGEX")]
    pub file_filter: Option<String>,
}

#[derive(clap::Args)]
pub struct SelectTestsArgs {
    #[command(flatten)]
    pub revisions: RevisionArgs,

    /// Test report (JSON) from the previous instrumented run
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,

    /// Artifact mapping files (`artifact;source` lines)
    #[arg(long = "mapping", value_name = "FILE")]
    pub mappings: Vec<PathBuf>,

    /// Module graph (TOML); without it build changes are not escalated
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Selection strategy
    #[arg(long, default_value = "file-level")]
    pub strategy: StrategyKind,

    /// Output subdirectory label (default: config `output.label`, then "tests")
    #[arg(long)]
    pub label: Option<String>,

    /// Print the selection without writing output files
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct SelectModulesArgs {
    #[command(flatten)]
    pub revisions: RevisionArgs,

    /// Output subdirectory label (default: config `output.label`, then "modules")
    #[arg(long)]
    pub label: Option<String>,

    /// Print the selection without writing output files
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ExpandModulesArgs {
    /// Module list files (one module directory or manifest per line)
    #[arg(value_name = "FILE", required = true)]
    pub lists: Vec<PathBuf>,

    /// Module graph (TOML)
    #[arg(long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Project root that list entries and graph paths are relative to
    /// (default: repository top level, else current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Closure applied to the listed modules
    #[arg(long, default_value = "downstream")]
    pub closure: ClosureMode,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ChangesArgs {
    #[command(flatten)]
    pub revisions: RevisionArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyKind {
    /// Impact analysis against the test report
    #[default]
    FileLevel,
    /// Select every test
    Noop,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ClosureMode {
    /// Listed modules and what they need to build
    Upstream,
    /// Listed modules and everything depending on them
    #[default]
    Downstream,
    /// Upstream plus direct dependents and their prerequisites
    Transitive,
}

impl From<ClosureMode> for Closure {
    fn from(mode: ClosureMode) -> Self {
        match mode {
            ClosureMode::Upstream => Closure::Upstream,
            ClosureMode::Downstream => Closure::Downstream,
            ClosureMode::Transitive => Closure::Transitive,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
