use super::{CommandError, CommandFile, split_frontmatter};
use crate::config::constants::project::TEMPLATE_EXTENSION;
use crate::project::ProjectLayout;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Unparsed contents of a command file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl RawCommand {
    /// Split the raw text into metadata and template body
    pub fn parse(self) -> Result<CommandFile, CommandError> {
        let (meta, body) =
            split_frontmatter(&self.content).map_err(|source| CommandError::MalformedFrontmatter {
                name: self.name.clone(),
                source,
            })?;
        Ok(CommandFile {
            name: self.name,
            meta,
            body,
        })
    }
}

/// Read-only access to the `commands/` and `agents/` directories
///
/// Nothing is cached: every load reads the file again so edits show up on the
/// next invocation.
#[derive(Debug, Clone)]
pub struct CommandStore {
    commands_dir: PathBuf,
    agents_dir: PathBuf,
}

/// Names map directly to file names, so anything that could leave the
/// directory is rejected.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

fn template_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
}

impl CommandStore {
    pub fn new(layout: &ProjectLayout) -> Self {
        Self {
            commands_dir: layout.commands_dir.clone(),
            agents_dir: layout.agents_dir.clone(),
        }
    }

    pub fn commands_dir(&self) -> &Path {
        &self.commands_dir
    }

    pub fn agents_dir(&self) -> &Path {
        &self.agents_dir
    }

    /// Names of all command files, without extension, sorted
    pub fn list(&self) -> Result<Vec<String>, CommandError> {
        let entries = fs::read_dir(&self.commands_dir).map_err(|source| CommandError::Io {
            path: self.commands_dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == TEMPLATE_EXTENSION)
            })
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// Read a command file without parsing it
    pub fn load(&self, name: &str) -> Result<RawCommand, CommandError> {
        if !is_valid_name(name) {
            return Err(CommandError::NotFound {
                name: name.to_string(),
            });
        }

        let path = template_path(&self.commands_dir, name);
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loaded command '{}' from {}", name, path.display());
                Ok(RawCommand {
                    name: name.to_string(),
                    path,
                    content,
                })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(CommandError::NotFound {
                name: name.to_string(),
            }),
            Err(source) => Err(CommandError::Io { path, source }),
        }
    }

    /// Read and parse a command file
    pub fn load_command(&self, name: &str) -> Result<CommandFile, CommandError> {
        self.load(name)?.parse()
    }

    /// Persona text for `name`, or an empty string when there is no such agent file
    pub fn load_persona(&self, name: &str) -> Result<String, CommandError> {
        if !is_valid_name(name) {
            warn!("Ignoring invalid agent name '{}'", name);
            return Ok(String::new());
        }

        let path = template_path(&self.agents_dir, name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Agent '{}' has no persona file; continuing without", name);
                Ok(String::new())
            }
            Err(source) => Err(CommandError::Io { path, source }),
        }
    }
}
