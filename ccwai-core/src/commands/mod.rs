//! Command templates and their metadata.
//!
//! A command is a Markdown file under `<root>/commands/` whose optional YAML
//! frontmatter configures how it is dispatched (persona, provider, model,
//! sampling) and whose body is the prompt template.

pub mod frontmatter;
pub mod store;

pub use frontmatter::{FrontmatterError, split_frontmatter};
pub use store::{CommandStore, RawCommand};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Metadata declared in a command's frontmatter
///
/// Every field is optional. Keys outside the recognised set are kept in
/// `extra` so they survive into the rendered prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandMeta {
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// Persona loaded from `<root>/agents/<agent>.md`
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent: Option<String>,

    /// Overrides the provider's configured model for this command
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub model: Option<String>,

    /// Switches the engine to this provider before dispatch
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Read a YAML scalar as text, so `name: 2024` or `model: 4.1` are accepted
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(text)) => Ok(Some(text)),
        Some(serde_yaml::Value::Number(number)) => Ok(Some(number.to_string())),
        Some(serde_yaml::Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar, found {other:?}"
        ))),
    }
}

impl CommandMeta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A parsed command file
#[derive(Debug, Clone, PartialEq)]
pub struct CommandFile {
    pub name: String,
    pub meta: CommandMeta,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Command not found: {name}")]
    NotFound { name: String },

    #[error("Malformed frontmatter in command '{name}': {source}")]
    MalformedFrontmatter {
        name: String,
        #[source]
        source: FrontmatterError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
