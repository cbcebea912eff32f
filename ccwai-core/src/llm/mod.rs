//! # LLM Integration Layer
//!
//! One capability, [`LLMProvider::chat`], implemented by an adapter per wire
//! dialect:
//!
//! | Dialect | Endpoint | Text path |
//! |---------|----------|-----------|
//! | OpenAI | `{baseUrl}/chat/completions` | `choices[0].message.content` |
//! | Gemini | `{baseUrl}/models/{model}:generateContent` | `candidates[0].content.parts[0].text` |
//! | DeepSeek | `{baseUrl}/chat/completions` | `choices[0].message.content` |
//!
//! Adapters are built from `ccwai.config.json` by the [`ProviderRegistry`],
//! which is the only place a provider name is turned into a concrete type.

pub mod factory;
pub mod provider;
pub mod providers;
pub mod types;

pub use factory::{ProviderRegistry, ProviderSpec, UnknownProviderError};
pub use provider::{LLMError, LLMProvider, NO_RESPONSE};
pub use providers::{DeepSeekProvider, GeminiProvider, OpenAIProvider};
pub use types::BackendKind;
