//! # ccwai
//!
//! Command-line front end for [`ccwai_core`]. Runs Markdown prompt templates
//! from a project's `commands/` directory against the configured LLM
//! providers.
//!
//! ```bash
//! # Scaffold a project in the current directory
//! ccwai init
//!
//! # Run commands/hello.md with some input
//! ccwai hello "world"
//!
//! # Inspect the resolved configuration
//! ccwai doctor
//! ```

pub mod cli;
