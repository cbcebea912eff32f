use super::{send_json, text_at};
use crate::commands::CommandMeta;
use crate::config::ProviderSettings;
use crate::config::api_keys::resolve_api_key;
use crate::config::constants::message_roles;
use crate::llm::provider::{LLMError, LLMProvider};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};
use std::time::Duration;

const CANDIDATE_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

pub struct GeminiProvider {
    name: String,
    api_key_env: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiProvider {
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

    fn endpoint(&self, meta: &CommandMeta) -> String {
        let model = meta.model.as_deref().unwrap_or(&self.model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn convert_to_gemini_format(prompt: &str, meta: &CommandMeta) -> Value {
        let mut request = json!({
            "contents": [
                {
                    "role": message_roles::USER,
                    "parts": [{ "text": prompt }]
                }
            ]
        });

        if let Some(temperature) = meta.temperature {
            request["generationConfig"] = json!({ "temperature": temperature });
        }

        request
    }

    /// Text of the first candidate's first part, or the no-response sentinel
    pub fn extract_text(response: &Value) -> String {
        text_at(response, CANDIDATE_TEXT_POINTER)
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, prompt: &str, meta: &CommandMeta) -> Result<String, LLMError> {
        let api_key = resolve_api_key(&self.api_key_env)?;
        let body = Self::convert_to_gemini_format(prompt, meta);

        let request = self
            .http_client
            .post(self.endpoint(meta))
            .query(&[("key", api_key.as_str())])
            .json(&body);

        let response = send_json(&self.name, request, self.timeout).await?;
        Ok(Self::extract_text(&response))
    }
}
