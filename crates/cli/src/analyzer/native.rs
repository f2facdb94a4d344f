// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! C/C++-family source detection.

use std::path::Path;

/// Extensions of natively compiled sources and headers.
pub const NATIVE_EXTENSIONS: &[&str] = &[
    ".c", ".cc", ".cxx", ".c++", ".cpp", ".ipp", ".tpp", ".tcc", ".inl", ".inc", ".h", ".hh",
    ".hpp", ".hxx", ".h++",
];

/// Whether the file's last extension is a native one (case-insensitive).
pub fn is_native_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    match name.rfind('.') {
        Some(dot) => NATIVE_EXTENSIONS.contains(&&name[dot..]),
        None => false,
    }
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
