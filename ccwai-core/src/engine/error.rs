use crate::commands::CommandError;
use crate::config::ConfigError;
use crate::llm::{LLMError, UnknownProviderError};
use crate::project::ProjectError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    UnknownProvider(#[from] UnknownProviderError),

    #[error(transparent)]
    Provider(#[from] LLMError),
}

impl EngineError {
    /// Errors that stop the engine from being built at all
    pub fn is_setup_error(&self) -> bool {
        matches!(self, Self::Project(_) | Self::Config(_))
    }
}
