pub mod deepseek;
pub mod gemini;
pub mod openai;

pub use deepseek::DeepSeekProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;

use crate::config::constants::responses::NO_RESPONSE;
use crate::llm::provider::LLMError;
use reqwest::RequestBuilder;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Send a prepared request and decode the JSON body
///
/// Timeouts, transport errors, non-success statuses and non-JSON bodies are
/// hard failures.
pub(crate) async fn send_json(
    provider: &str,
    request: RequestBuilder,
    timeout: Duration,
) -> Result<Value, LLMError> {
    let response = request.timeout(timeout).send().await.map_err(|e| {
        if e.is_timeout() {
            LLMError::Timeout {
                provider: provider.to_string(),
                timeout_secs: timeout.as_secs(),
            }
        } else {
            LLMError::Network {
                provider: provider.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    debug!("{} answered with HTTP {}", provider, status);
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LLMError::Http {
            provider: provider.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    response.json::<Value>().await.map_err(|e| {
        if e.is_timeout() {
            LLMError::Timeout {
                provider: provider.to_string(),
                timeout_secs: timeout.as_secs(),
            }
        } else {
            LLMError::InvalidResponse {
                provider: provider.to_string(),
                message: e.to_string(),
            }
        }
    })
}

/// Text at `pointer`, or the no-response sentinel when the shape does not match
pub(crate) fn text_at(response: &Value, pointer: &str) -> String {
    response
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| NO_RESPONSE.to_string())
}
