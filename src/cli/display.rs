//! Terminal styling for handler output and errors
//!
//! Provider names get a stable color per dialect so failover messages are easy
//! to follow. Colors are dropped when `--no-color` is set or the stream is not
//! a terminal.

use ccwai_core::EngineError;
use ccwai_core::llm::LLMError;
use console::style;

pub fn style_error(message: &str) -> String {
    style(message).red().to_string()
}

pub fn style_success(message: &str) -> String {
    style(message).green().to_string()
}

pub fn heading(title: &str) -> String {
    style(title).blue().bold().to_string()
}

pub fn style_provider_name(provider: &str) -> String {
    let styled = match provider.to_lowercase().as_str() {
        "gemini" | "google" => style(provider).blue(),
        "openai" => style(provider).yellow(),
        "deepseek" => style(provider).magenta(),
        _ => style(provider).cyan(),
    };
    styled.to_string()
}

fn provider_of(error: &LLMError) -> Option<&str> {
    match error {
        LLMError::MissingCredential { .. } => None,
        LLMError::Http { provider, .. }
        | LLMError::InvalidResponse { provider, .. }
        | LLMError::Network { provider, .. }
        | LLMError::Timeout { provider, .. } => Some(provider.as_str()),
    }
}

pub fn format_llm_error(error: &LLMError) -> String {
    let message = style_error(&error.to_string());
    match provider_of(error) {
        Some(provider) => format!("{} [{}] {}", style_provider_name(provider), error.kind(), message),
        None => format!("[{}] {}", error.kind(), message),
    }
}

/// Render an error for stderr, with the full cause chain
pub fn format_error(error: &anyhow::Error) -> String {
    let prefix = style("error:").red().bold();

    if let Some(llm) = error
        .downcast_ref::<EngineError>()
        .and_then(|e| match e {
            EngineError::Provider(llm) => Some(llm),
            _ => None,
        })
        .or_else(|| error.downcast_ref::<LLMError>())
    {
        return format!("{} {}", prefix, format_llm_error(llm));
    }

    let mut rendered = format!("{} {}", prefix, style_error(&error.to_string()));
    for cause in error.chain().skip(1) {
        rendered.push_str(&format!("\n  {} {}", style("caused by:").dim(), cause));
    }
    rendered
}
