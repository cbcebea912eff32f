use crate::config::constants::{env_vars, project, providers, timeouts};
use crate::llm::types::BackendKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors raised while reading `ccwai.config.json`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for one named provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    /// API base URL; the dialect default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model identifier; the dialect default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Wire dialect; inferred from the provider name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<BackendKind>,
}

impl ProviderSettings {
    /// Dialect spoken by the provider registered under `name`
    pub fn backend_kind(&self, name: &str) -> BackendKind {
        self.kind.unwrap_or_else(|| BackendKind::infer(name))
    }

    pub fn resolved_base_url(&self, name: &str) -> String {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.backend_kind(name).default_base_url().to_string())
    }

    pub fn resolved_model(&self, name: &str) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.backend_kind(name).default_model().to_string())
    }
}

/// Contents of `ccwai.config.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CcwaiConfig {
    /// Provider used when a command does not name one
    pub default_provider: String,

    /// Provider every failed dispatch falls back to; defaults to `default_provider`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_provider: Option<String>,

    /// Upper bound for a single provider call, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub providers: BTreeMap<String, ProviderSettings>,
}

impl Default for CcwaiConfig {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        table.insert(
            providers::OPENAI.to_string(),
            ProviderSettings {
                base_url: Some(BackendKind::OpenAI.default_base_url().to_string()),
                model: Some(BackendKind::OpenAI.default_model().to_string()),
                api_key_env: env_vars::OPENAI_API_KEY.to_string(),
                kind: None,
            },
        );
        table.insert(
            providers::GEMINI.to_string(),
            ProviderSettings {
                base_url: Some(BackendKind::Gemini.default_base_url().to_string()),
                model: Some(BackendKind::Gemini.default_model().to_string()),
                api_key_env: env_vars::GEMINI_API_KEY.to_string(),
                kind: None,
            },
        );
        table.insert(
            providers::DEEPSEEK.to_string(),
            ProviderSettings {
                base_url: Some(BackendKind::DeepSeek.default_base_url().to_string()),
                model: Some(BackendKind::DeepSeek.default_model().to_string()),
                api_key_env: env_vars::DEEPSEEK_API_KEY.to_string(),
                kind: None,
            },
        );

        Self {
            default_provider: providers::OPENAI.to_string(),
            fallback_provider: None,
            request_timeout_secs: None,
            providers: table,
        }
    }
}

impl CcwaiConfig {
    /// Load and validate the config file under a project root
    pub fn load_from_root(root: &Path) -> Result<Self, ConfigError> {
        Self::load_from_file(root.join(project::CONFIG_FILE_NAME))
    }

    /// Load and validate configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one provider must be configured".to_string(),
            ));
        }

        if !self.providers.contains_key(&self.default_provider) {
            return Err(ConfigError::Invalid(format!(
                "defaultProvider '{}' is not listed under providers",
                self.default_provider
            )));
        }

        if let Some(fallback) = &self.fallback_provider {
            if !self.providers.contains_key(fallback) {
                return Err(ConfigError::Invalid(format!(
                    "fallbackProvider '{}' is not listed under providers",
                    fallback
                )));
            }
        }

        for (name, settings) in &self.providers {
            if settings.api_key_env.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "provider '{}' has an empty apiKeyEnv",
                    name
                )));
            }
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "requestTimeoutSecs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Name of the provider failover lands on
    pub fn fallback_provider_name(&self) -> &str {
        self.fallback_provider
            .as_deref()
            .unwrap_or(&self.default_provider)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderSettings> {
        self.providers.get(name)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(timeouts::DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
