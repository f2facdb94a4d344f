// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Retest error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A version-control command failed (nonzero exit or spawn failure).
    #[error("vcs error: `{command}`: {message}")]
    Vcs { command: String, message: String },

    /// No type declaration could be derived from a compilation unit.
    #[error("parse error: {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Test discovery walk failed.
    #[error("walk error: {message}")]
    Walk { message: String },

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// Module graph rejected at load time (cycle or dangling dependency).
    #[error("module graph error: {0}")]
    Graph(String),

    /// Test report or artifact mapping could not be read.
    #[error("report error: {}: {message}", .path.display())]
    Report { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type using retest Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Selection completed
    Success = 0,
    /// Configuration or argument error
    ConfigError = 2,
    /// Selection aborted (VCS, walk, I/O)
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::Graph(_) | Error::Report { .. } => {
                ExitCode::ConfigError
            }
            Error::Vcs { .. } | Error::Parse { .. } | Error::Walk { .. } | Error::Io { .. } => {
                ExitCode::InternalError
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
