// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Retest CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use retest::cli::{Cli, Command};
use retest::error::ExitCode;

mod cmd_changes;
mod cmd_expand_modules;
mod cmd_select_modules;
mod context;

fn init_logging() {
    let filter = EnvFilter::try_from_env("RETEST_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("retest: {}", e);
            match e.downcast_ref::<retest::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::SelectTests(args)) => cmd_select_tests::run(&cli, args),
        Some(Command::SelectModules(args)) => cmd_select_modules::run(&cli, args),
        Some(Command::ExpandModules(args)) => cmd_expand_modules::run(&cli, args),
        Some(Command::Changes(args)) => cmd_changes::run(&cli, args),
    }
}
