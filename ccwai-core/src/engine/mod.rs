//! Command resolution and provider dispatch.
//!
//! A call to [`DispatchEngine::run_command`] moves through
//! `Resolving -> Composing -> Dispatching -> (Succeeded | FailedOver -> Dispatching | Failed)`:
//!
//! 1. load and parse `commands/<name>.md`, then the persona it names;
//! 2. compose the prompt;
//! 3. if the command names a provider, make that provider current;
//! 4. call the current adapter; on failure make the fallback provider current
//!    and call it exactly once more.
//!
//! Provider changes made in steps 3 and 4 are sticky: they stay current for
//! every later call on the same engine. The current adapter lives in a
//! [`DispatchContext`] behind an async mutex that a call holds from provider
//! selection to its final answer, so concurrent calls are serialised and never
//! observe each other's half-finished selection.

mod error;

pub use error::EngineError;

use crate::commands::{CommandFile, CommandStore};
use crate::config::CcwaiConfig;
use crate::config::api_keys::resolve_api_key;
use crate::llm::{LLMProvider, ProviderRegistry};
use crate::project::ProjectLayout;
use crate::prompts::compose;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The adapter currently used for dispatch
pub struct DispatchContext {
    adapter: Arc<dyn LLMProvider>,
}

impl DispatchContext {
    fn new(adapter: Arc<dyn LLMProvider>) -> Self {
        Self { adapter }
    }

    pub fn provider_name(&self) -> &str {
        self.adapter.name()
    }

    fn replace(&mut self, adapter: Arc<dyn LLMProvider>) {
        self.adapter = adapter;
    }
}

/// A command resolved and composed, ready to dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCommand {
    pub command: CommandFile,
    pub persona: String,
    pub prompt: String,
}

/// Per-provider line of the doctor report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub name: String,
    pub kind: String,
    pub model: String,
    pub api_key_env: String,
    pub credential_present: bool,
}

/// Snapshot of the engine's resolved environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub commands_dir: PathBuf,
    pub agents_dir: PathBuf,
    pub default_provider: String,
    pub fallback_provider: String,
    pub current_provider: String,
    pub providers: Vec<ProviderStatus>,
}

pub struct DispatchEngine {
    layout: ProjectLayout,
    store: CommandStore,
    registry: ProviderRegistry,
    context: Mutex<DispatchContext>,
}

impl DispatchEngine {
    /// Discover the project above `start_dir`, load its config and select the default provider
    pub fn new(start_dir: &Path) -> Result<Self, EngineError> {
        let layout = ProjectLayout::discover(start_dir)?;
        Self::from_layout(layout)
    }

    pub fn from_layout(layout: ProjectLayout) -> Result<Self, EngineError> {
        let config = CcwaiConfig::load_from_file(&layout.config_path)?;
        Self::with_registry(layout, ProviderRegistry::new(config))
    }

    /// Build an engine around an existing registry
    pub fn with_registry(
        layout: ProjectLayout,
        registry: ProviderRegistry,
    ) -> Result<Self, EngineError> {
        registry.config().validate()?;
        let default = registry.create_provider(&registry.config().default_provider)?;
        debug!(
            "Engine ready at {} with provider '{}'",
            layout.root.display(),
            default.name()
        );

        Ok(Self {
            store: CommandStore::new(&layout),
            layout,
            registry,
            context: Mutex::new(DispatchContext::new(default)),
        })
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn config(&self) -> &CcwaiConfig {
        self.registry.config()
    }

    pub fn store(&self) -> &CommandStore {
        &self.store
    }

    pub fn list_commands(&self) -> Result<Vec<String>, EngineError> {
        Ok(self.store.list()?)
    }

    /// Name of the provider the next dispatch will use unless a command overrides it
    pub async fn current_provider(&self) -> String {
        self.context.lock().await.provider_name().to_string()
    }

    pub async fn doctor(&self) -> DoctorReport {
        let config = self.config();
        let providers = config
            .providers
            .iter()
            .map(|(name, settings)| ProviderStatus {
                name: name.clone(),
                kind: settings.backend_kind(name).to_string(),
                model: settings.resolved_model(name),
                api_key_env: settings.api_key_env.clone(),
                credential_present: resolve_api_key(&settings.api_key_env).is_ok(),
            })
            .collect();

        DoctorReport {
            root: self.layout.root.clone(),
            config_path: self.layout.config_path.clone(),
            commands_dir: self.layout.commands_dir.clone(),
            agents_dir: self.layout.agents_dir.clone(),
            default_provider: config.default_provider.clone(),
            fallback_provider: config.fallback_provider_name().to_string(),
            current_provider: self.current_provider().await,
            providers,
        }
    }

    /// Resolve a command and compose its prompt without dispatching it
    pub fn prepare(&self, name: &str, input: &str) -> Result<PreparedCommand, EngineError> {
        let command = self.store.load_command(name)?;
        let persona = match command.meta.agent.as_deref() {
            Some(agent) => self.store.load_persona(agent)?,
            None => String::new(),
        };
        let prompt = compose(&persona, &command.meta, &command.body, input);

        Ok(PreparedCommand {
            command,
            persona,
            prompt,
        })
    }

    /// Run a command against the current provider, failing over once on error
    pub async fn run_command(&self, name: &str, input: &str) -> Result<String, EngineError> {
        let prepared = self.prepare(name, input)?;
        let meta = &prepared.command.meta;

        let mut context = self.context.lock().await;

        if let Some(provider) = meta.provider.as_deref() {
            let adapter = self.registry.create_provider(provider)?;
            if adapter.name() != context.provider_name() {
                info!(
                    "Command '{}' switches provider from '{}' to '{}'",
                    name,
                    context.provider_name(),
                    adapter.name()
                );
            }
            context.replace(adapter);
        }

        let primary = Arc::clone(&context.adapter);
        debug!("Dispatching '{}' via '{}'", name, primary.name());
        let primary_error = match primary.chat(&prepared.prompt, meta).await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        let fallback_name = self.config().fallback_provider_name();
        warn!(
            "Provider '{}' failed ({}): {}. Falling back to '{}'",
            primary.name(),
            primary_error.kind(),
            primary_error,
            fallback_name
        );
        let fallback = self.registry.create_provider(fallback_name)?;
        context.replace(Arc::clone(&fallback));

        fallback
            .chat(&prepared.prompt, meta)
            .await
            .map_err(EngineError::from)
    }
}
