//! # ccwai-core
//!
//! Command resolution and provider dispatch for CCWAI projects.
//!
//! A project is a directory holding `ccwai.config.json` and a `commands/`
//! directory of Markdown prompt templates. [`DispatchEngine`] discovers the
//! project, loads a command, wraps it in its persona, composes the final
//! prompt and sends it to the selected LLM provider, failing over to the
//! configured fallback provider when the first attempt fails.
//!
//! ```no_run
//! use ccwai_core::DispatchEngine;
//! use std::path::Path;
//!
//! # async fn demo() -> Result<(), ccwai_core::EngineError> {
//! let engine = DispatchEngine::new(Path::new("."))?;
//! let answer = engine.run_command("summarize", "fn main() {}").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod engine;
pub mod llm;
pub mod project;
pub mod prompts;
pub mod thoughts;
pub mod utils;

pub use commands::{CommandError, CommandFile, CommandMeta, CommandStore};
pub use config::{CcwaiConfig, ConfigError, ProviderSettings};
pub use engine::{DispatchEngine, DoctorReport, EngineError, PreparedCommand, ProviderStatus};
pub use llm::{LLMError, LLMProvider, ProviderRegistry, ProviderSpec, UnknownProviderError};
pub use project::{ProjectError, ProjectLayout, bootstrap_project, find_project_root};
pub use prompts::compose;
pub use thoughts::{ThoughtEntry, ThoughtRecord, list_thoughts, save_thought};
