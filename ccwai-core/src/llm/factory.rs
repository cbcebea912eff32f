use super::provider::LLMProvider;
use super::providers::{DeepSeekProvider, GeminiProvider, OpenAIProvider};
use super::types::BackendKind;
use crate::config::{CcwaiConfig, ProviderSettings};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Everything a constructor needs to build one adapter
#[derive(Debug, Clone)]
pub struct ProviderSpec<'a> {
    pub name: &'a str,
    pub settings: &'a ProviderSettings,
    pub timeout: Duration,
}

type ProviderConstructor = Box<dyn Fn(&ProviderSpec<'_>) -> Arc<dyn LLMProvider> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[error("Provider '{name}' is not configured in ccwai.config.json")]
pub struct UnknownProviderError {
    pub name: String,
}

/// Builds adapters for the providers named in the config
///
/// Built-in dialects are chosen by an exhaustive match on [`BackendKind`].
/// A constructor registered under a provider name takes precedence, which is
/// how embedders plug in extra providers and how tests inject scripted ones.
pub struct ProviderRegistry {
    config: CcwaiConfig,
    constructors: HashMap<String, ProviderConstructor>,
}

impl ProviderRegistry {
    pub fn new(config: CcwaiConfig) -> Self {
        Self {
            config,
            constructors: HashMap::new(),
        }
    }

    /// Register a constructor for the provider configured under `name`
    pub fn register_provider<F>(&mut self, name: &str, factory_fn: F)
    where
        F: Fn(&ProviderSpec<'_>) -> Arc<dyn LLMProvider> + Send + Sync + 'static,
    {
        self.constructors
            .insert(name.to_string(), Box::new(factory_fn));
    }

    pub fn config(&self) -> &CcwaiConfig {
        &self.config
    }

    /// Create the adapter for a configured provider
    pub fn create_provider(&self, name: &str) -> Result<Arc<dyn LLMProvider>, UnknownProviderError> {
        let settings = self
            .config
            .provider(name)
            .ok_or_else(|| UnknownProviderError {
                name: name.to_string(),
            })?;
        let spec = ProviderSpec {
            name,
            settings,
            timeout: self.config.request_timeout(),
        };

        if let Some(factory_fn) = self.constructors.get(name) {
            return Ok(factory_fn(&spec));
        }

        Ok(builtin_provider(&spec))
    }

    /// Configured provider names, sorted
    pub fn list_providers(&self) -> Vec<String> {
        self.config.providers.keys().cloned().collect()
    }
}

fn builtin_provider(spec: &ProviderSpec<'_>) -> Arc<dyn LLMProvider> {
    match spec.settings.backend_kind(spec.name) {
        BackendKind::OpenAI => Arc::new(OpenAIProvider::from_settings(
            spec.name,
            spec.settings,
            spec.timeout,
        )),
        BackendKind::Gemini => Arc::new(GeminiProvider::from_settings(
            spec.name,
            spec.settings,
            spec.timeout,
        )),
        BackendKind::DeepSeek => Arc::new(DeepSeekProvider::from_settings(
            spec.name,
            spec.settings,
            spec.timeout,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandMeta;
    use crate::llm::provider::LLMError;
    use async_trait::async_trait;

    struct Echo(String);

    #[async_trait]
    impl LLMProvider for Echo {
        fn name(&self) -> &str {
            &self.0
        }

        async fn chat(&self, prompt: &str, _meta: &CommandMeta) -> Result<String, LLMError> {
            Ok(prompt.to_string())
        }
    }

    fn config() -> CcwaiConfig {
        let mut config = CcwaiConfig::default();
        config.providers.insert(
            "local".to_string(),
            ProviderSettings {
                base_url: Some("http://localhost:11434/v1".to_string()),
                model: Some("llama3".to_string()),
                api_key_env: "LOCAL_KEY".to_string(),
                kind: None,
            },
        );
        config
    }

    #[test]
    fn builds_builtin_adapters_by_name() {
        let registry = ProviderRegistry::new(config());

        for name in ["openai", "gemini", "deepseek", "local"] {
            let provider = registry.create_provider(name).unwrap();
            assert_eq!(provider.name(), name);
        }
    }

    #[test]
    fn unconfigured_provider_is_rejected() {
        let registry = ProviderRegistry::new(config());
        let err = registry.create_provider("anthropic").err().unwrap();
        assert_eq!(err.name, "anthropic");
    }

    #[tokio::test]
    async fn registered_constructor_takes_precedence() {
        let mut registry = ProviderRegistry::new(config());
        registry.register_provider("gemini", |spec| {
            Arc::new(Echo(format!("{}-echo", spec.name))) as Arc<dyn LLMProvider>
        });

        let provider = registry.create_provider("gemini").unwrap();
        assert_eq!(provider.name(), "gemini-echo");
        let reply = provider.chat("ping", &CommandMeta::default()).await.unwrap();
        assert_eq!(reply, "ping");
    }

    #[test]
    fn lists_configured_providers() {
        let registry = ProviderRegistry::new(config());
        assert_eq!(
            registry.list_providers(),
            vec!["deepseek", "gemini", "local", "openai"]
        );
    }
}
