// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! selected:
//!   ns.FooTest  AFFECTED (ns.Foo)
//!   ns.NewTest  ADDED_CHANGED [not in report]
//! modules:
//!   core/pom.xml
//! 2 selected, 5 excluded, 3 changes
//! ```

use std::io::Write;

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::{SelectionOutput, SuiteOutput};
use crate::change::ChangeSet;
use crate::color::scheme;
use crate::paths;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_title(&mut self, title: &str) -> std::io::Result<()> {
        self.out.set_color(&scheme::title())?;
        write!(self.out, "{}", title)?;
        self.out.reset()?;
        writeln!(self.out, ":")
    }

    fn write_suite(&mut self, suite: &SuiteOutput, unreported: bool) -> std::io::Result<()> {
        write!(self.out, "  {}  ", suite.test_id)?;
        self.out.set_color(&scheme::cause(suite.cause))?;
        write!(self.out, "{}", suite.cause)?;
        self.out.reset()?;

        if let Some(reason) = &suite.reason {
            write!(self.out, " ")?;
            self.out.set_color(&scheme::reason())?;
            write!(self.out, "({})", reason)?;
            self.out.reset()?;
        }
        if unreported {
            write!(self.out, " [not in report]")?;
        }
        writeln!(self.out)
    }

    /// Write a test selection followed by the summary line.
    pub fn write_selection(&mut self, output: &SelectionOutput) -> std::io::Result<()> {
        if !output.selected.is_empty() || !output.unreported.is_empty() {
            self.write_title("selected")?;
            for suite in &output.selected {
                self.write_suite(suite, false)?;
            }
            for suite in &output.unreported {
                self.write_suite(suite, true)?;
            }
        }

        if !output.modules.is_empty() {
            self.write_title("modules")?;
            for module in &output.modules {
                write!(self.out, "  ")?;
                self.out.set_color(&scheme::path())?;
                write!(self.out, "{}", module)?;
                self.out.reset()?;
                writeln!(self.out)?;
            }
        }

        let selected = output.selected.len() + output.unreported.len();
        writeln!(
            self.out,
            "{} selected, {} excluded, {} change{}",
            selected,
            output.excluded.len(),
            output.changes,
            if output.changes == 1 { "" } else { "s" }
        )
    }

    /// Write one `TYPE path` line per change.
    pub fn write_changes(&mut self, changes: &ChangeSet) -> std::io::Result<()> {
        for item in changes {
            write!(self.out, "{:<8} ", item.change_type)?;
            self.out.set_color(&scheme::path())?;
            write!(self.out, "{}", paths::to_slash(&item.path))?;
            self.out.reset()?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Write module list lines, one per line.
    pub fn write_modules(&mut self, lines: &[String]) -> std::io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
