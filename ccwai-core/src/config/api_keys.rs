//! API key retrieval for provider adapters.
//!
//! Keys are never stored in `ccwai.config.json`; each provider entry names the
//! environment variable that holds its key. The variable is read when a call
//! is dispatched, not at startup, so a missing key only fails the provider
//! that needs it. A `.env` file in the working directory can populate the
//! environment before the engine starts.

use crate::llm::provider::LLMError;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load environment variables from a `.env` file
///
/// Looks in `dir` when given, otherwise walks up from the current directory the
/// way `dotenvy` does by default. A missing file is not an error; a file that
/// exists but cannot be parsed is logged and ignored.
pub fn load_dotenv(dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let outcome = match dir {
        Some(dir) => {
            let path = dir.join(".env");
            dotenvy::from_path(&path).map(|_| path)
        }
        None => dotenvy::dotenv(),
    };

    match outcome {
        Ok(path) => {
            debug!("Loaded environment variables from {}", path.display());
            Ok(Some(path))
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(dotenvy::Error::Io(e)) => Err(e).context("Failed to read .env file"),
        Err(e) => {
            warn!("Failed to load .env file: {}", e);
            Ok(None)
        }
    }
}

/// Read the API key stored in `env_var`
///
/// Unset and blank values are both reported as a missing credential.
pub fn resolve_api_key(env_var: &str) -> Result<String, LLMError> {
    match env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(LLMError::MissingCredential {
            env_var: env_var.to_string(),
        }),
    }
}
