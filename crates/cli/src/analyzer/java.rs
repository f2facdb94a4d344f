// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Regex-based Java compilation-unit scanning.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{CompilationUnit, CompilationUnitAnalyzer};

#[allow(clippy::expect_used)]
static PACKAGE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*package\s+([A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*)*)\s*;")
        .expect("valid regex")
});

// `@interface` is caught through the non-word character before `interface`;
// `Foo.class` is excluded by rejecting a preceding dot.
#[allow(clippy::expect_used)]
static TYPE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w$.])(?:class|interface|enum|record)\s+([A-Za-z_$][\w$]*)")
        .expect("valid regex")
});

/// Java analyzer for `.java` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaAnalyzer;

impl CompilationUnitAnalyzer for JavaAnalyzer {
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("java"))
    }

    fn analyze(&self, content: &str) -> CompilationUnit {
        let package = PACKAGE_DECL
            .captures(content)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().split_whitespace().collect::<String>())
            .unwrap_or_default();

        let mut type_names: Vec<String> = Vec::new();
        for caps in TYPE_DECL.captures_iter(content) {
            if let Some(name) = caps.get(1) {
                let name = name.as_str().to_string();
                if !type_names.contains(&name) {
                    type_names.push(name);
                }
            }
        }

        CompilationUnit {
            package,
            type_names,
        }
    }
}

#[cfg(test)]
#[path = "java_tests.rs"]
mod tests;
