// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use super::SelectionOutput;
use crate::change::ChangeSet;
use crate::paths;

/// Current time as an RFC 3339 timestamp with second precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeOutput {
    change_type: String,
    path: String,
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_value(&mut self, value: &impl Serialize) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }

    /// Write a test selection.
    pub fn write_selection(&mut self, output: &SelectionOutput) -> std::io::Result<()> {
        self.write_value(output)
    }

    /// Write a change set as an array of `{changeType, path}`.
    pub fn write_changes(&mut self, changes: &ChangeSet) -> std::io::Result<()> {
        let items: Vec<ChangeOutput> = changes
            .iter()
            .map(|item| ChangeOutput {
                change_type: item.change_type.to_string(),
                path: paths::to_slash(&item.path),
            })
            .collect();
        self.write_value(&items)
    }

    /// Write module list lines as a JSON array.
    pub fn write_modules(&mut self, lines: &[String]) -> std::io::Result<()> {
        self.write_value(&lines)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
