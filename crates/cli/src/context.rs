// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Setup shared by the commands: project root, config and change set.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use retest::change::{self, ChangeSet, ChangeSetProvider};
use retest::cli::{Cli, OutputFormat, RevisionArgs};
use retest::color::resolve_color;
use retest::config::{self, Config};
use retest::discovery;
use retest::error::Error;
use retest::git::{self, GitClient};
use retest::output::json::JsonFormatter;
use retest::output::text::TextFormatter;
use retest::paths;

/// `root` made absolute, or the current directory.
pub fn resolve_root(root: Option<&Path>) -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match root {
        Some(root) => paths::absolutize(root, &cwd),
        None => cwd,
    })
}

/// Config from `-C`, discovery above `root`, or defaults.
pub fn load_config(cli: &Cli, root: &Path) -> anyhow::Result<Config> {
    match discovery::resolve_config(cli.config.as_deref(), root)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            Ok(config::load(&path)?)
        }
        None => Ok(Config::default()),
    }
}

/// A change set and the revisions around it.
pub struct Change {
    pub items: ChangeSet,
    /// Revision holding the content before the change.
    pub comparison: String,
    /// Revision holding the content after it; `None` is the working tree.
    pub current: Option<String>,
}

/// Root, config and git access for one invocation.
pub struct RunContext {
    /// Directory the run is scoped to: config discovery, test lookup and
    /// output files start here.
    pub root: PathBuf,
    /// Repository top level. Change-set paths, module graph paths and module
    /// list lines are relative to it.
    pub repo_root: PathBuf,
    pub config: Config,
    pub git: Arc<GitClient>,
}

impl RunContext {
    pub fn load(cli: &Cli, revisions: &RevisionArgs) -> anyhow::Result<Self> {
        let root = resolve_root(revisions.root.as_deref())?;
        let repo_root = discovery::find_repo_root(&root)
            .filter(|_| git::is_git_repo(&root))
            .ok_or_else(|| Error::Argument(format!("{} is not in a git repository", root.display())))?;
        if repo_root != root {
            tracing::debug!("repository top level is {}", repo_root.display());
        }
        let config = load_config(cli, &root)?;
        let git = Arc::new(GitClient::new(&repo_root));
        Ok(Self {
            root,
            repo_root,
            config,
            git,
        })
    }

    /// The filtered change set described by `revisions`.
    pub fn change(&self, revisions: &RevisionArgs) -> anyhow::Result<Change> {
        let pattern = revisions
            .file_filter
            .as_deref()
            .unwrap_or(&self.config.selection.file_filter);
        let filter = change::compile_file_filter(pattern)?;

        let (items, comparison, current) = if revisions.working_tree {
            (self.git.working_tree_status()?, "HEAD".to_string(), None)
        } else {
            let from = match &revisions.from {
                Some(from) => from.clone(),
                None => git::detect_base_branch(&self.root).ok_or_else(|| {
                    Error::Argument("no main or master branch found; pass --from".to_string())
                })?,
            };
            let items = self.git.diff(&from, &revisions.to)?;
            (items, from, Some(revisions.to.clone()))
        };

        let filtered = change::filter_change_set(&items, &filter);
        tracing::info!(
            "{} changed files ({} before filtering) against {}",
            filtered.len(),
            items.len(),
            comparison
        );
        Ok(Change {
            items: filtered,
            comparison,
            current,
        })
    }
}

/// Print module list lines in the requested format.
pub fn print_modules(format: OutputFormat, lines: &[String]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => TextFormatter::stdout(resolve_color()).write_modules(lines)?,
        OutputFormat::Json => JsonFormatter::new(std::io::stdout()).write_modules(lines)?,
    }
    Ok(())
}
