//! The provider capability shared by every adapter.
//!
//! An adapter turns one composed prompt into one completion. Concrete
//! adapters differ only in endpoint construction, request body shape and the
//! path used to pull the text out of the response.
//!
//! ## Soft parsing
//!
//! A successful HTTP exchange whose body lacks the expected text field is not
//! an error: the adapter returns [`NO_RESPONSE`] instead, so a provider API
//! change degrades output rather than breaking every command. Transport
//! failures, non-success statuses and bodies that are not JSON at all are
//! hard failures and trigger failover.

use crate::commands::CommandMeta;
use async_trait::async_trait;

pub use crate::config::constants::responses::NO_RESPONSE;

/// Uniform chat capability implemented by every provider adapter
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name as configured (e.g. "openai", "gemini")
    fn name(&self) -> &str;

    /// Send `prompt` and return the first completion's text
    async fn chat(&self, prompt: &str, meta: &CommandMeta) -> Result<String, LLMError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LLMError {
    #[error("Missing API key: environment variable {env_var} is not set")]
    MissingCredential { env_var: String },

    #[error("{provider} returned HTTP {status}: {body}")]
    Http {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned a malformed response: {message}")]
    InvalidResponse { provider: String, message: String },

    #[error("Network error talking to {provider}: {message}")]
    Network { provider: String, message: String },

    #[error("{provider} did not respond within {timeout_secs}s")]
    Timeout { provider: String, timeout_secs: u64 },
}

impl LLMError {
    /// Short category label used in logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential { .. } => "missing credential",
            Self::Http { .. } | Self::InvalidResponse { .. } => "provider http error",
            Self::Network { .. } => "network error",
            Self::Timeout { .. } => "provider timeout",
        }
    }
}
