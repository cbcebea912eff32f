//! Project root discovery and bootstrap.
//!
//! A CCWAI project root is the nearest directory, walking upward from a start
//! directory, that holds both `ccwai.config.json` and a `commands/` directory.

use crate::config::CcwaiConfig;
use crate::config::constants::project;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error(
        "Could not locate CCWAI project root from {start}: no ancestor contains both {config} and {commands}/",
        config = project::CONFIG_FILE_NAME,
        commands = project::COMMANDS_DIR
    )]
    RootNotFound { start: PathBuf },
}

/// Resolved paths of a project, fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub commands_dir: PathBuf,
    pub agents_dir: PathBuf,
}

impl ProjectLayout {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_path: root.join(project::CONFIG_FILE_NAME),
            commands_dir: root.join(project::COMMANDS_DIR),
            agents_dir: root.join(project::AGENTS_DIR),
            root,
        }
    }

    /// Locate the project root above `start` and derive the layout from it
    pub fn discover(start: &Path) -> Result<Self, ProjectError> {
        find_project_root(start).map(Self::from_root)
    }

    pub fn thoughts_dir(&self) -> PathBuf {
        crate::thoughts::thoughts_dir(&self.root)
    }
}

fn is_project_root(dir: &Path) -> bool {
    dir.join(project::CONFIG_FILE_NAME).is_file() && dir.join(project::COMMANDS_DIR).is_dir()
}

/// Walk upward from `start` (inclusive) to the first directory that is a project root
///
/// Relative paths are resolved against the current directory. The walk stops
/// at the filesystem root, where a directory has no parent.
pub fn find_project_root(start: &Path) -> Result<PathBuf, ProjectError> {
    let mut dir = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(start))
            .unwrap_or_else(|_| start.to_path_buf())
    };
    if let Ok(canonical) = dir.canonicalize() {
        dir = canonical;
    }

    let mut cursor = Some(dir.as_path());
    while let Some(candidate) = cursor {
        if is_project_root(candidate) {
            debug!("Project root found at {}", candidate.display());
            return Ok(candidate.to_path_buf());
        }
        cursor = candidate.parent();
    }

    Err(ProjectError::RootNotFound {
        start: start.to_path_buf(),
    })
}

const SAMPLE_COMMAND: &str = r#"---
name: hello
---
Greet the user warmly and answer in one short paragraph.
"#;

/// Create the config file and directories of a new project in `dir`
///
/// Existing entries are left untouched, so running it twice is harmless.
/// Returns the entries that were created, relative to `dir`.
pub fn bootstrap_project(dir: &Path) -> Result<Vec<String>> {
    let layout = ProjectLayout::from_root(dir);
    let mut created = Vec::new();

    if !layout.config_path.exists() {
        let content = CcwaiConfig::default()
            .to_pretty_json()
            .context("Failed to serialize default configuration")?;
        fs::write(&layout.config_path, content + "\n").with_context(|| {
            format!(
                "Failed to write config file: {}",
                layout.config_path.display()
            )
        })?;
        created.push(project::CONFIG_FILE_NAME.to_string());
    }

    for (path, label) in [
        (&layout.commands_dir, project::COMMANDS_DIR),
        (&layout.agents_dir, project::AGENTS_DIR),
    ] {
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            created.push(format!("{}/", label));
        }
    }

    let sample = layout
        .commands_dir
        .join(format!("hello.{}", project::TEMPLATE_EXTENSION));
    if created.iter().any(|entry| entry.starts_with(project::COMMANDS_DIR)) && !sample.exists() {
        fs::write(&sample, SAMPLE_COMMAND)
            .with_context(|| format!("Failed to write sample command: {}", sample.display()))?;
        created.push(format!(
            "{}/hello.{}",
            project::COMMANDS_DIR,
            project::TEMPLATE_EXTENSION
        ));
    }

    Ok(created)
}
