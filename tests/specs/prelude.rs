//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the retest binary against temporary
//! git repositories.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::Path;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the retest binary
pub fn retest_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("retest"));
    cmd.env_remove("RETEST_CONFIG");
    cmd.env_remove("RETEST_LOG");
    cmd
}

/// Run `retest <args>` inside `project`.
pub fn retest(project: &Project, args: &[&str]) -> RunBuilder {
    let mut cmd = retest_cmd();
    cmd.args(args).current_dir(project.path());
    RunBuilder { cmd }
}

/// Command wrapper with pass/fail expectations.
pub struct RunBuilder {
    cmd: Command,
}

#[allow(dead_code)]
impl RunBuilder {
    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run from a directory relative to the project root
    pub fn in_dir(mut self, project: &Project, dir: &str) -> Self {
        self.cmd.current_dir(project.path().join(dir));
        self
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected success, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    pub fn exits(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().expect("command should run");
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
            code,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("valid JSON")
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary project directory with helper methods.
///
/// Parent directories are created automatically and errors panic.
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A two-module Maven-style project committed on `main`.
    ///
    /// - `core` holds `core.Foo` and its test `core.FooTest`
    /// - `app` depends on `core` and holds `app.AppTest`
    /// - `report.json` records which entities and files each suite touched
    pub fn reactor() -> Self {
        let temp = Self::empty();
        temp.file("pom.xml", "<project/>");
        temp.file("core/pom.xml", "<project/>");
        temp.file(
            "core/src/main/java/core/Foo.java",
            "package core;\n\npublic class Foo {}\n",
        );
        temp.file(
            "core/src/main/resources/core.xsd",
            "<schema/>\n",
        );
        temp.file(
            "core/src/test/java/core/FooTest.java",
            "package core;\n\npublic class FooTest {}\n",
        );
        temp.file("app/pom.xml", "<project/>");
        temp.file(
            "app/src/main/java/app/App.java",
            "package app;\n\npublic class App {}\n",
        );
        temp.file(
            "app/src/test/resources/greeting.txt",
            "hello\n",
        );
        temp.file(
            "app/src/test/java/app/AppTest.java",
            "package app;\n\npublic class AppTest {}\n",
        );
        temp.file(
            "report.json",
            r#"{
  "testSuites": [
    {"testId": "core.FooTest", "coveredEntities": ["core.Foo"]},
    {"testId": "app.AppTest", "coveredEntities": ["app.App"], "openedFiles": ["greeting.txt"]}
  ]
}
"#,
        );
        temp.file(
            "modules.toml",
            r#"[[module]]
id = "core"
path = "core"

[[module]]
id = "app"
path = "app"
depends_on = ["core"]
"#,
        );
        git_init(&temp);
        git_initial_commit(&temp);
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write retest.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("retest.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Read a file relative to the project root
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path.as_ref())).unwrap()
    }

    /// Remove a file relative to the project root
    pub fn remove(&self, path: impl AsRef<Path>) {
        std::fs::remove_file(self.dir.path().join(path.as_ref())).unwrap();
    }
}

// =============================================================================
// GIT TEST HELPERS
// =============================================================================

fn git(project: &Project, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(project.path())
        .output()
        .expect("git should run");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initialize a git repo with minimal config
pub fn git_init(project: &Project) {
    git(project, &["init", "-b", "main"]);
    git(project, &["config", "user.email", "test@example.com"]);
    git(project, &["config", "user.name", "Test User"]);
}

/// Commit every file as the initial commit
pub fn git_initial_commit(project: &Project) {
    git_commit(project, "feat: initial commit");
}

/// Create and switch to a branch
pub fn git_branch(project: &Project, name: &str) {
    git(project, &["checkout", "-b", name]);
}

/// Stage everything and commit
pub fn git_commit(project: &Project, message: &str) {
    git(project, &["add", "-A"]);
    git(project, &["commit", "-m", message]);
}
