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

/// Path of the completion text in a chat-completions response
pub(crate) const COMPLETION_TEXT_POINTER: &str = "/choices/0/message/content";

/// Chat-completions request body shared by OpenAI-compatible dialects
///
/// The request is always non-streaming; `meta.stream` does not change it.
pub(crate) fn chat_completions_body(model: &str, prompt: &str, meta: &CommandMeta) -> Value {
    let mut body = json!({
        "model": meta.model.as_deref().unwrap_or(model),
        "messages": [
            { "role": message_roles::USER, "content": prompt }
        ],
        "stream": false
    });

    if let Some(temperature) = meta.temperature {
        body["temperature"] = json!(temperature);
    }

    body
}

pub struct OpenAIProvider {
    name: String,
    api_key_env: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAIProvider {
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

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Text of the first choice, or the no-response sentinel
    pub fn extract_text(response: &Value) -> String {
        text_at(response, COMPLETION_TEXT_POINTER)
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, prompt: &str, meta: &CommandMeta) -> Result<String, LLMError> {
        let api_key = resolve_api_key(&self.api_key_env)?;
        let body = chat_completions_body(&self.model, prompt, meta);

        let request = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body);

        let response = send_json(&self.name, request, self.timeout).await?;
        Ok(Self::extract_text(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::NO_RESPONSE;

    fn settings(env: &str) -> ProviderSettings {
        ProviderSettings {
            base_url: Some("https://api.openai.com/v1".to_string()),
            model: Some("gpt-4o-mini".to_string()),
            api_key_env: env.to_string(),
            kind: None,
        }
    }

    #[test]
    fn builds_chat_completions_body() {
        let body = chat_completions_body("gpt-4o-mini", "Say hi", &CommandMeta::default());

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Say hi");
        assert_eq!(body["stream"], false);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn meta_overrides_model_and_sets_temperature() {
        let meta = CommandMeta {
            model: Some("gpt-4o".to_string()),
            temperature: Some(0.5),
            stream: Some(true),
            ..Default::default()
        };
        let body = chat_completions_body("gpt-4o-mini", "x", &meta);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn extracts_first_choice_text() {
        let response = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Hello!" } },
                { "message": { "role": "assistant", "content": "Ignored" } }
            ]
        });
        assert_eq!(OpenAIProvider::extract_text(&response), "Hello!");
    }

    #[test]
    fn unexpected_shape_yields_placeholder() {
        assert_eq!(OpenAIProvider::extract_text(&json!({})), NO_RESPONSE);
        assert_eq!(
            OpenAIProvider::extract_text(&json!({ "choices": [] })),
            NO_RESPONSE
        );
        assert_eq!(
            OpenAIProvider::extract_text(&json!({ "choices": [{ "message": { "content": null } }] })),
            NO_RESPONSE
        );
    }

    #[test]
    fn endpoint_appends_chat_completions() {
        let provider =
            OpenAIProvider::from_settings("openai", &settings("OPENAI_API_KEY"), Duration::from_secs(5));
        assert_eq!(provider.endpoint(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(provider.name(), "openai");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let provider = OpenAIProvider::from_settings(
            "openai",
            &settings("CCWAI_TEST_OPENAI_KEY_NEVER_SET"),
            Duration::from_secs(5),
        );

        let err = provider
            .chat("Say hi", &CommandMeta::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LLMError::MissingCredential {
                env_var: "CCWAI_TEST_OPENAI_KEY_NEVER_SET".to_string()
            }
        );
    }

    mod http {
        use super::*;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};

        /// Read one HTTP request: headers, then `Content-Length` bytes of body
        async fn read_request(socket: &mut TcpStream) {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap_or(0);
                if n == 0 {
                    return;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf);
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (key, value) = line.split_once(':')?;
                            key.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + content_length {
                        return;
                    }
                }
            }
        }

        /// Answer a single request on a loopback port and return the base URL
        async fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            let addr = listener.local_addr().expect("local addr");
            tokio::spawn(async move {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                read_request(&mut socket).await;
                tokio::time::sleep(delay).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
            format!("http://{addr}/v1")
        }

        fn local_provider(base_url: String, timeout: Duration) -> OpenAIProvider {
            let settings = ProviderSettings {
                base_url: Some(base_url),
                model: Some("gpt-4o-mini".to_string()),
                api_key_env: "PATH".to_string(),
                kind: None,
            };
            let mut provider = OpenAIProvider::from_settings("openai", &settings, timeout);
            provider.http_client = HttpClient::builder().no_proxy().build().expect("client");
            provider
        }

        async fn chat_against(
            status: &'static str,
            body: &'static str,
            delay: Duration,
            timeout: Duration,
        ) -> Result<String, LLMError> {
            let base_url = serve_once(status, body, delay).await;
            local_provider(base_url, timeout)
                .chat("Say hi", &CommandMeta::default())
                .await
        }

        #[tokio::test]
        async fn returns_first_choice_from_server() {
            let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#;
            let result = chat_against("200 OK", body, Duration::ZERO, Duration::from_secs(5)).await;
            assert_eq!(result, Ok("Hello!".to_string()));
        }

        #[tokio::test]
        async fn error_status_is_http_error() {
            let result = chat_against(
                "500 Internal Server Error",
                "boom",
                Duration::ZERO,
                Duration::from_secs(5),
            )
            .await;
            assert_eq!(
                result,
                Err(LLMError::Http {
                    provider: "openai".to_string(),
                    status: 500,
                    body: "boom".to_string(),
                })
            );
        }

        #[tokio::test]
        async fn non_json_body_is_invalid_response() {
            let result =
                chat_against("200 OK", "not json", Duration::ZERO, Duration::from_secs(5)).await;
            assert!(matches!(result, Err(LLMError::InvalidResponse { .. })), "{result:?}");
        }

        #[tokio::test]
        async fn unexpected_shape_is_no_response() {
            let result = chat_against("200 OK", "{}", Duration::ZERO, Duration::from_secs(5)).await;
            assert_eq!(result, Ok(NO_RESPONSE.to_string()));
        }

        #[tokio::test]
        async fn slow_server_times_out() {
            let result = chat_against(
                "200 OK",
                "{}",
                Duration::from_millis(1500),
                Duration::from_millis(200),
            )
            .await;
            assert!(matches!(result, Err(LLMError::Timeout { .. })), "{result:?}");
        }
    }
}
