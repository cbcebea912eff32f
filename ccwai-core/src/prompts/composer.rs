//! Builds the single prompt string sent to a provider.
//!
//! The layout is fixed: persona, metadata, template, user input, each under
//! its own heading and trimmed. The function is pure so identical inputs
//! always produce byte-identical prompts.

use crate::commands::CommandMeta;
use crate::config::constants::prompt_sections;

/// Render command metadata as a readable key/value dump
///
/// Pretty JSON is preferred; metadata that JSON cannot represent (for example
/// YAML mappings with non-string keys in `extra`) falls back to YAML.
pub fn render_meta(meta: &CommandMeta) -> String {
    serde_json::to_string_pretty(meta)
        .or_else(|_| serde_yaml::to_string(meta))
        .unwrap_or_else(|_| "{}".to_string())
}

/// Assemble persona, metadata, template body and user input into one prompt
pub fn compose(persona: &str, meta: &CommandMeta, template: &str, input: &str) -> String {
    let metadata = render_meta(meta);
    let sections = [
        (prompt_sections::PERSONA, persona),
        (prompt_sections::METADATA, metadata.as_str()),
        (prompt_sections::TEMPLATE, template),
        (prompt_sections::USER_INPUT, input),
    ];

    sections
        .iter()
        .map(|(heading, content)| format!("{}\n{}", heading, content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_appear_in_fixed_order() {
        let meta = CommandMeta {
            agent: Some("reviewer".to_string()),
            ..Default::default()
        };
        let prompt = compose("You are strict.", &meta, "Review the code.", "fn main() {}");

        let persona = prompt.find("# Agent Persona").unwrap();
        let metadata = prompt.find("# Command Metadata").unwrap();
        let template = prompt.find("# Template").unwrap();
        let input = prompt.find("# User Input").unwrap();
        assert!(persona < metadata && metadata < template && template < input);

        assert!(prompt.starts_with("# Agent Persona\nYou are strict."));
        assert!(prompt.contains("\"agent\": \"reviewer\""));
        assert!(prompt.ends_with("# User Input\nfn main() {}"));
    }

    #[test]
    fn content_is_trimmed() {
        let prompt = compose("\n  persona  \n", &CommandMeta::default(), "\n\nSay hi\n\n", "  world ");

        assert!(prompt.contains("# Agent Persona\npersona\n\n# Command Metadata"));
        assert!(prompt.contains("# Template\nSay hi\n\n# User Input\nworld"));
    }

    #[test]
    fn empty_meta_renders_as_empty_object() {
        let prompt = compose("", &CommandMeta::default(), "Say hi", "world");
        assert!(prompt.contains("# Command Metadata\n{}\n\n# Template"));
        assert!(prompt.starts_with("# Agent Persona\n\n\n# Command Metadata"));
    }

    #[test]
    fn template_precedes_input() {
        let prompt = compose("", &CommandMeta::default(), "Say hi", "world");
        let hi = prompt.find("Say hi").unwrap();
        let world = prompt.find("world").unwrap();
        assert!(hi < world);
    }

    #[test]
    fn composition_is_deterministic() {
        let mut meta = CommandMeta {
            provider: Some("gemini".to_string()),
            temperature: Some(0.5),
            ..Default::default()
        };
        meta.extra
            .insert("zeta".to_string(), serde_yaml::Value::Bool(true));
        meta.extra
            .insert("alpha".to_string(), serde_yaml::Value::String("first".to_string()));

        let first = compose("p", &meta, "t", "i");
        let second = compose("p", &meta.clone(), "t", "i");
        assert_eq!(first, second);
        assert!(first.find("\"alpha\"").unwrap() < first.find("\"zeta\"").unwrap());
    }
}
