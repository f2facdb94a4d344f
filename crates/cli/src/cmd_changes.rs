// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Changes command implementation.

use retest::cli::{ChangesArgs, Cli, OutputFormat};
use retest::color::resolve_color;
use retest::error::ExitCode;
use retest::output::json::JsonFormatter;
use retest::output::text::TextFormatter;

use crate::context::RunContext;

pub fn run(cli: &Cli, args: &ChangesArgs) -> anyhow::Result<ExitCode> {
    let ctx = RunContext::load(cli, &args.revisions)?;
    let change = ctx.change(&args.revisions)?;

    match args.output {
        OutputFormat::Text => TextFormatter::stdout(resolve_color()).write_changes(&change.items)?,
        OutputFormat::Json => JsonFormatter::new(std::io::stdout()).write_changes(&change.items)?,
    }
    Ok(ExitCode::Success)
}
