// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Select-modules command implementation.

use retest::cli::{Cli, SelectModulesArgs};
use retest::error::ExitCode;
use retest::modules::{ChangedModules, ManifestLocator};
use retest::output::OutputFiles;

use crate::context::{RunContext, print_modules};

pub fn run(cli: &Cli, args: &SelectModulesArgs) -> anyhow::Result<ExitCode> {
    let ctx = RunContext::load(cli, &args.revisions)?;
    let change = ctx.change(&args.revisions)?;
    let settings = &ctx.config.selection;

    let selection = ChangedModules::new(
        &ctx.repo_root,
        ManifestLocator::new(settings.manifest.clone()),
        settings.full_build_paths.clone(),
    );
    let lines = selection
        .select(&change.items)
        .to_lines(&settings.manifest, &ctx.repo_root, &settings.strip_dirs);

    if !args.dry_run {
        let label = args
            .label
            .as_deref()
            .or(ctx.config.output.label.as_deref())
            .unwrap_or("modules");
        let path = OutputFiles::new(&ctx.root, &ctx.config.output.dir, label).write_modules(&lines)?;
        tracing::info!("wrote {} modules to {}", lines.len(), path.display());
    }

    print_modules(args.output, &lines)?;
    Ok(ExitCode::Success)
}
