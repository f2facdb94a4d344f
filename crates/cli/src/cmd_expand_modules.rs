// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Expand-modules command implementation.

use retest::cli::{Cli, ExpandModulesArgs};
use retest::discovery;
use retest::error::ExitCode;
use retest::modules::{ModuleList, StaticModuleGraph};
use retest::paths;

use crate::context::{load_config, print_modules, resolve_root};

pub fn run(cli: &Cli, args: &ExpandModulesArgs) -> anyhow::Result<ExitCode> {
    let root = match args.root.as_deref() {
        Some(root) => resolve_root(Some(root))?,
        None => {
            let cwd = resolve_root(None)?;
            discovery::find_repo_root(&cwd).unwrap_or(cwd)
        }
    };
    let config = load_config(cli, &root)?;
    let manifest = &config.selection.manifest;

    let graph = StaticModuleGraph::load(&args.graph, &root)?;
    let list = ModuleList::read(&args.lists, manifest, &root)?;
    let dirs = list.select(&graph, args.closure.into());
    tracing::info!("{} modules selected", dirs.len());

    let lines: Vec<String> = dirs.iter().map(|dir| paths::to_slash(dir)).collect();
    print_modules(args.output, &lines)?;
    Ok(ExitCode::Success)
}
