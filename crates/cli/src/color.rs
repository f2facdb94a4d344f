// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color detection and the styles used for selection output.
//!
//! Resolution order:
//! 1. `NO_COLOR` set (any value) → no color
//! 2. `COLOR` set → color
//! 3. stdout is not a TTY, or `CI` is set → no color
//! 4. otherwise → auto

use std::io::IsTerminal;

use termcolor::ColorChoice;

use crate::selection::CauseKind;

/// Resolve color choice from the environment.
pub fn resolve_color() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || std::env::var_os("CI").is_some() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for selection output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    use super::CauseKind;

    /// Bold section title (e.g. "selected").
    pub fn title() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Cause label, colored by how targeted the selection was.
    pub fn cause(kind: CauseKind) -> ColorSpec {
        let mut spec = ColorSpec::new();
        let color = match kind {
            CauseKind::RetestAll => Color::Yellow,
            CauseKind::Affected => Color::Green,
            CauseKind::AddedChanged => Color::Cyan,
            CauseKind::BuildChange => Color::Magenta,
        };
        spec.set_fg(Some(color)).set_bold(true);
        spec
    }

    /// Cyan path or module directory.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Dimmed reason text.
    pub fn reason() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
