// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Change-set model and `git diff` output parsing.
//!
//! A changed file is announced by a header line `diff --git a/<path> b/<path>`.
//! The change type is `Modified` unless the very next line carries a
//! `new file mode` (added) or `deleted file mode` (deleted) marker.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{Error, Result};

const DIFF_HEADER: &str = "diff --git a/";
const QUOTED_DIFF_HEADER: &str = "diff --git \"a/";
const ANY_DIFF_HEADER: &str = "diff --git ";
const NEW_FILE_MARKER: &str = "new file mode";
const DELETED_FILE_MARKER: &str = "deleted file mode";

/// Type of change a file underwent within a revision range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeType::Added => "ADDED",
            ChangeType::Modified => "MODIFIED",
            ChangeType::Deleted => "DELETED",
        };
        f.pad(label)
    }
}

/// A file path tagged with its change type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangeSetItem {
    /// Path relative to the repository root.
    pub path: PathBuf,
    pub change_type: ChangeType,
}

impl ChangeSetItem {
    pub fn new(change_type: ChangeType, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            change_type,
        }
    }

    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeType::Added, path)
    }

    pub fn modified(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeType::Modified, path)
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self::new(ChangeType::Deleted, path)
    }
}

/// Ordered set of changes; ordering keeps every downstream pass deterministic.
pub type ChangeSet = BTreeSet<ChangeSetItem>;

/// Source of change sets and historical file content.
///
/// Implementations cache `diff` and `content_at` per instance and never
/// cache a failed call.
pub trait ChangeSetProvider: Send + Sync {
    /// Repository root that change-set paths are relative to.
    fn root(&self) -> &Path;

    /// Changes reachable from `to` since its common ancestor with `from`.
    fn diff(&self, from: &str, to: &str) -> Result<ChangeSet>;

    /// File content as of `revision`.
    fn content_at(&self, path: &Path, revision: &str) -> Result<String>;

    /// Working tree changes as if everything were staged.
    fn working_tree_status(&self) -> Result<ChangeSet>;
}

/// Parse `git diff` output into change-set items.
pub fn parse_diff_output(output: &str) -> ChangeSet {
    let lines: Vec<&str> = output.lines().collect();
    let mut items = ChangeSet::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(path) = parse_header_path(line) else {
            if line.starts_with(ANY_DIFF_HEADER) {
                tracing::warn!("unrecognized diff header: {}", line);
            }
            continue;
        };
        let change_type = match lines.get(idx + 1) {
            Some(next) if next.contains(NEW_FILE_MARKER) => ChangeType::Added,
            Some(next) if next.contains(DELETED_FILE_MARKER) => ChangeType::Deleted,
            _ => ChangeType::Modified,
        };
        items.insert(ChangeSetItem::new(change_type, path));
    }

    items
}

/// Extract the path from a `diff --git a/<path> b/<path>` header.
///
/// Renames are disabled upstream, so both sides name the same path and the
/// line splits evenly, which keeps paths containing spaces intact.
fn parse_header_path(line: &str) -> Option<PathBuf> {
    if let Some(quoted) = line.strip_prefix(QUOTED_DIFF_HEADER) {
        return unquote_c_style(quoted)
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty());
    }
    let rest = line.strip_prefix(DIFF_HEADER)?;
    if rest.len() >= 3 && (rest.len() - 3) % 2 == 0 {
        let half = (rest.len() - 3) / 2;
        if rest.is_char_boundary(half) && rest.is_char_boundary(half + 3) {
            let (left, right) = (&rest[..half], &rest[half + 3..]);
            if left == right && &rest[half..half + 3] == " b/" {
                return Some(PathBuf::from(left));
            }
        }
    }
    // Asymmetric header: fall back to the b-side after the last separator.
    rest.rfind(" b/")
        .map(|pos| PathBuf::from(&rest[pos + 3..]))
        .filter(|p| !p.as_os_str().is_empty())
}

/// Decode a C-quoted path up to its closing quote.
///
/// Git quotes paths holding control characters, quotes or backslashes, and
/// non-ASCII paths unless `core.quotePath` is off. Non-ASCII bytes appear as
/// octal escapes of their UTF-8 encoding.
fn unquote_c_style(quoted: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(quoted.len());
    let mut chars = quoted.chars();

    loop {
        match chars.next()? {
            '"' => return String::from_utf8(bytes).ok(),
            '\\' => {
                let escaped = chars.next()?;
                let byte = match escaped {
                    'a' => 0x07,
                    'b' => 0x08,
                    't' => b'\t',
                    'n' => b'\n',
                    'v' => 0x0b,
                    'f' => 0x0c,
                    'r' => b'\r',
                    '"' => b'"',
                    '\\' => b'\\',
                    '0'..='3' => {
                        let mut value = escaped.to_digit(8)?;
                        for _ in 0..2 {
                            value = value * 8 + chars.next()?.to_digit(8)?;
                        }
                        u8::try_from(value).ok()?
                    }
                    _ => return None,
                };
                bytes.push(byte);
            }
            c => {
                let mut buf = [0; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
}

/// Compile a path filter that must match the whole slash-separated path.
pub fn compile_file_filter(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| Error::Argument(format!("invalid file filter '{pattern}': {e}")))
}

/// Keep only items whose path matches `filter` (see [`compile_file_filter`]).
pub fn filter_change_set(changes: &ChangeSet, filter: &Regex) -> ChangeSet {
    changes
        .iter()
        .filter(|item| filter.is_match(&crate::paths::to_slash(&item.path)))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
