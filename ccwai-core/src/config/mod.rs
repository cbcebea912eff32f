//! CCWAI Configuration Module
//!
//! Loads `ccwai.config.json` from the project root and exposes the provider
//! table, the default provider and the failover target. Constants shared by
//! the rest of the crate live in [`constants`].

pub mod api_keys;
pub mod constants;
pub mod loader;

pub use api_keys::{load_dotenv, resolve_api_key};
pub use loader::{CcwaiConfig, ConfigError, ProviderSettings};
