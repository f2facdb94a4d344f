// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles retest.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

const KNOWN_KEYS: &[&str] = &["version", "selection", "output"];

const SELECTION_KEYS: &[&str] = &[
    "manifest",
    "compile_time_extensions",
    "file_filter",
    "full_identifiers",
    "included_tests",
    "strip_dirs",
    "full_build_paths",
];

const OUTPUT_KEYS: &[&str] = &["dir", "label"];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    selection: Option<toml::Value>,

    #[serde(default)]
    output: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    pub selection: SelectionConfig,

    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            selection: SelectionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// `[selection]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Module manifest file name.
    pub manifest: String,

    /// Extensions of files that generate code at build time.
    pub compile_time_extensions: Vec<String>,

    /// Regex a change-set path must fully match to be considered.
    pub file_filter: String,

    /// Always map tests by fully-qualified name.
    pub full_identifiers: bool,

    /// Patterns appended to the included-tests list when anything is selected.
    pub included_tests: Vec<String>,

    /// Module directory names replaced by their parent in module output.
    pub strip_dirs: Vec<String>,

    /// Path fragments that force every module into the build.
    pub full_build_paths: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            manifest: "pom.xml".to_string(),
            compile_time_extensions: vec![".wsdl".to_string(), ".xsd".to_string()],
            file_filter: ".*".to_string(),
            full_identifiers: false,
            included_tests: vec!["**/PackageDependencyTest*".to_string()],
            strip_dirs: vec!["p2".to_string(), "feature".to_string()],
            full_build_paths: vec!["/base/".to_string()],
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving output files, relative to the repository root.
    pub dir: PathBuf,

    /// Subdirectory of `dir` for this run.
    pub label: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("target/.retest"),
            label: None,
        }
    }
}

/// Load config from file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&content, path)
}

/// Parse config, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = flexible.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade retest to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    Ok(Config {
        version,
        selection: parse_section(flexible.selection, "selection", SELECTION_KEYS, path)?,
        output: parse_section(flexible.output, "output", OUTPUT_KEYS, path)?,
    })
}

/// Deserialize one section, warning on keys it does not know.
fn parse_section<T: DeserializeOwned + Default>(
    value: Option<toml::Value>,
    section: &str,
    known: &[&str],
    path: &Path,
) -> Result<T> {
    let Some(value) = value else {
        return Ok(T::default());
    };
    if let toml::Value::Table(table) = &value {
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                warn_unknown_key(path, &format!("{section}.{key}"));
            }
        }
    }
    value.try_into().map_err(|e: toml::de::Error| Error::Config {
        message: format!("invalid [{section}] section: {e}"),
        path: Some(path.to_path_buf()),
    })
}

/// Warn about unknown configuration key.
fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "retest: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
