//! DeepSeek speaks the chat-completions dialect; only its defaults and name differ.

use super::openai::{COMPLETION_TEXT_POINTER, chat_completions_body};
use super::{send_json, text_at};
use crate::commands::CommandMeta;
use crate::config::ProviderSettings;
use crate::config::api_keys::resolve_api_key;
use crate::llm::provider::{LLMError, LLMProvider};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;

pub struct DeepSeekProvider {
    name: String,
    api_key_env: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl DeepSeekProvider {
    pub fn from_settings(name: &str, settings: &ProviderSettings, timeout: Duration) -> Self {
        Self {
            name: name.to_string(),
            api_key_env: settings.api_key_env.clone(),
            http_client: HttpClient::new(),
            base_url: settings.resolved_base_url(name),
            model: settings.resolved_model(name),
            timeout,
        }
    }

    pub fn extract_text(response: &Value) -> String {
        text_at(response, COMPLETION_TEXT_POINTER)
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, prompt: &str, meta: &CommandMeta) -> Result<String, LLMError> {
        let api_key = resolve_api_key(&self.api_key_env)?;
        let body = chat_completions_body(&self.model, prompt, meta);

        let request = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body);

        let response = send_json(&self.name, request, self.timeout).await?;
        Ok(Self::extract_text(&response))
    }
}
