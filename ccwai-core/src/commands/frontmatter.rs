//! Splits a command file into frontmatter metadata and template body.
//!
//! The file opens with a `---` line (trailing whitespace ignored); the next
//! such line closes the block. Everything between the two is YAML, and
//! everything after the closing line is the body. A file whose first line is
//! not the delimiter has no frontmatter and is returned unchanged as the body.
//!
//! An opening delimiter without a closing one is an error rather than a best
//! effort split, so a truncated header can never leak into the prompt.

use super::CommandMeta;
use crate::config::constants::frontmatter::DELIMITER;

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("opening '---' has no closing '---' line")]
    MissingClosingDelimiter,

    #[error("frontmatter must be a key-value mapping")]
    NotAMapping,

    #[error("invalid frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
}

fn is_delimiter_line(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Separate `raw` into its metadata and body
pub fn split_frontmatter(raw: &str) -> Result<(CommandMeta, String), FrontmatterError> {
    let Some(first_line) = raw.split_inclusive('\n').next() else {
        return Ok((CommandMeta::default(), raw.to_string()));
    };
    if !is_delimiter_line(first_line) {
        return Ok((CommandMeta::default(), raw.to_string()));
    }

    let rest = &raw[first_line.len()..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if is_delimiter_line(line) {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_meta(block)?, body.to_string()));
        }
        offset += line.len();
    }

    Err(FrontmatterError::MissingClosingDelimiter)
}

fn parse_meta(block: &str) -> Result<CommandMeta, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(CommandMeta::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(block)?;
    match value {
        serde_yaml::Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
        serde_yaml::Value::Null => Ok(CommandMeta::default()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}
