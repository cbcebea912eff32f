//! Thought journal: Markdown notes of a command's input and result, written
//! under `<root>/thoughts/shared/extension/`.

use crate::config::constants::project;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MAX_SLUG_LEN: usize = 48;
const DEFAULT_SLUG_SOURCE: &str = "context";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtRecord {
    pub title: String,
    pub context: String,
    pub result: String,
}

/// A journal entry on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThoughtEntry {
    pub label: String,
    pub path: PathBuf,
}

pub fn thoughts_dir(root: &Path) -> PathBuf {
    project::THOUGHTS_DIR
        .iter()
        .fold(root.to_path_buf(), |dir, part| dir.join(part))
}

/// Lowercase `input`, collapse every run of characters outside `[a-z0-9]`
/// into a single `-`, trim dashes at both ends and cap the length
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

fn render_thought(record: &ThoughtRecord, timestamp: &str) -> String {
    [
        "---".to_string(),
        format!("title: {}", record.title),
        format!("timestamp: {timestamp}"),
        "---".to_string(),
        String::new(),
        "## Context".to_string(),
        "```".to_string(),
        record.context.clone(),
        "```".to_string(),
        String::new(),
        "## Result".to_string(),
        record.result.clone(),
    ]
    .join("\n")
}

/// Write `record` to a new journal file and return its path
pub fn save_thought(root: &Path, record: &ThoughtRecord) -> Result<PathBuf> {
    let dir = thoughts_dir(root);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create thoughts directory {}", dir.display()))?;

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let title = if record.title.trim().is_empty() {
        DEFAULT_SLUG_SOURCE
    } else {
        record.title.as_str()
    };
    let mut slug = slugify(title);
    if slug.is_empty() {
        slug = DEFAULT_SLUG_SOURCE.to_string();
    }

    let file_name = format!("{}-{}.md", timestamp.replace(':', "-"), slug);
    let path = dir.join(file_name);
    fs::write(&path, render_thought(record, &timestamp))
        .with_context(|| format!("Failed to write thought {}", path.display()))?;

    debug!("Saved thought to {}", path.display());
    Ok(path)
}

/// List journal entries, oldest first; an absent directory is an empty journal
pub fn list_thoughts(root: &Path) -> Result<Vec<ThoughtEntry>> {
    let dir = thoughts_dir(root);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read thoughts directory {}", dir.display()));
        }
    };

    let mut thoughts = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(project::TEMPLATE_EXTENSION) {
            continue;
        }
        if let Some(label) = path.file_stem().and_then(|stem| stem.to_str()) {
            thoughts.push(ThoughtEntry {
                label: label.to_string(),
                path: path.clone(),
            });
        }
    }

    thoughts.sort_by(|a, b| a.label.cmp(&b.label));
    Ok(thoughts)
}
