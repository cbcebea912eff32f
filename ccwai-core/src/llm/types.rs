use crate::config::constants::{models, providers, urls};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire dialect spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "deepseek")]
    DeepSeek,
}

impl BackendKind {
    /// Dialect for a provider registered under `name`
    ///
    /// Names that are not built in speak the OpenAI-compatible dialect, which
    /// most self-hosted and third-party gateways implement.
    pub fn infer(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            providers::GEMINI | "google" => Self::Gemini,
            providers::DEEPSEEK => Self::DeepSeek,
            _ => Self::OpenAI,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => providers::OPENAI,
            Self::Gemini => providers::GEMINI,
            Self::DeepSeek => providers::DEEPSEEK,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => urls::OPENAI_API_BASE,
            Self::Gemini => urls::GEMINI_API_BASE,
            Self::DeepSeek => urls::DEEPSEEK_API_BASE,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => models::openai::DEFAULT_MODEL,
            Self::Gemini => models::google::DEFAULT_MODEL,
            Self::DeepSeek => models::deepseek::DEFAULT_MODEL,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
