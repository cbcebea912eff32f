#![allow(dead_code)]

use async_trait::async_trait;
use ccwai_core::llm::{LLMError, LLMProvider, ProviderRegistry};
use ccwai_core::{CcwaiConfig, CommandMeta, DispatchEngine, ProjectLayout};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const OPENAI_KEY_ENV: &str = "CCWAI_TEST_OPENAI_KEY_NEVER_SET";
pub const GEMINI_KEY_ENV: &str = "CCWAI_TEST_GEMINI_KEY_NEVER_SET";

/// Temporary project tree with config, commands and agents
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self::with_config(&default_config_json())
    }

    pub fn with_config(config_json: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("ccwai.config.json"), config_json)
            .expect("Failed to write config");
        fs::create_dir_all(temp_dir.path().join("commands")).expect("Failed to create commands");
        fs::create_dir_all(temp_dir.path().join("agents")).expect("Failed to create agents");
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn add_command(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join("commands").join(format!("{name}.md"));
        fs::write(&path, content).expect("Failed to write command");
        path
    }

    pub fn add_agent(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join("agents").join(format!("{name}.md"));
        fs::write(&path, content).expect("Failed to write agent");
        path
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::discover(self.root()).expect("project root")
    }

    pub fn config(&self) -> CcwaiConfig {
        CcwaiConfig::load_from_root(self.root()).expect("config")
    }
}

pub fn default_config_json() -> String {
    format!(
        r#"{{
  "defaultProvider": "openai",
  "providers": {{
    "openai": {{ "apiKeyEnv": "{OPENAI_KEY_ENV}", "baseUrl": "https://api.openai.com/v1", "model": "gpt-4o-mini" }},
    "gemini": {{ "apiKeyEnv": "{GEMINI_KEY_ENV}" }}
  }}
}}"#
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub provider: String,
    pub prompt: String,
    pub meta: CommandMeta,
}

/// Queued replies per provider, shared by every adapter built from it
///
/// A provider with an empty queue answers `"<name> ok"`.
#[derive(Default)]
pub struct Script {
    replies: Mutex<HashMap<String, VecDeque<Result<String, LLMError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Script {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, provider: &str, reply: Result<String, LLMError>) {
        self.replies
            .lock()
            .expect("replies lock")
            .entry(provider.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn fail(&self, provider: &str, status: u16) {
        self.push(
            provider,
            Err(LLMError::Http {
                provider: provider.to_string(),
                status,
                body: "scripted failure".to_string(),
            }),
        );
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn providers_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.provider).collect()
    }

    fn next(&self, provider: &str) -> Result<String, LLMError> {
        self.replies
            .lock()
            .expect("replies lock")
            .get_mut(provider)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(format!("{provider} ok")))
    }
}

pub struct ScriptedProvider {
    name: String,
    script: Arc<Script>,
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, prompt: &str, meta: &CommandMeta) -> Result<String, LLMError> {
        self.script
            .calls
            .lock()
            .expect("calls lock")
            .push(RecordedCall {
                provider: self.name.clone(),
                prompt: prompt.to_string(),
                meta: meta.clone(),
            });
        self.script.next(&self.name)
    }
}

/// Engine whose configured providers are all served by `script`
pub fn scripted_engine(project: &TestProject, script: &Arc<Script>) -> DispatchEngine {
    let config = project.config();
    let mut registry = ProviderRegistry::new(config.clone());
    for name in config.providers.keys() {
        let script = Arc::clone(script);
        registry.register_provider(name, move |spec| {
            Arc::new(ScriptedProvider {
                name: spec.name.to_string(),
                script: Arc::clone(&script),
            }) as Arc<dyn LLMProvider>
        });
    }
    DispatchEngine::with_registry(project.layout(), registry).expect("engine")
}
