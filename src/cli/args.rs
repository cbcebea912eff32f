//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for ccwai
#[derive(Parser, Debug)]
#[command(
    name = "ccwai",
    version,
    about = "Run Markdown prompt templates against interchangeable LLM providers",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory to start project discovery from; defaults to the current directory
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Disable color output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List the commands of the current project, one per line
    List,

    /// Show the resolved project, provider configuration and git status
    Doctor,

    /// Scaffold a project in the start directory
    Init,

    /// List saved thought journal entries
    Thoughts,

    /// Show a short git status of the project
    Status,

    /// Run a command with options; also reaches commands named like a subcommand
    Run(RunArgs),

    /// Run a command: `ccwai <command> [input...]`
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Arguments for running a single command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Command name, the file stem under commands/
    pub name: String,

    /// Free-form input appended to the prompt; words are joined by spaces
    pub input: Vec<String>,

    /// Save the input and response to the thought journal under this title
    #[arg(long, value_name = "TITLE")]
    pub save_thought: Option<String>,

    /// Print the composed prompt instead of sending it
    #[arg(long)]
    pub print_prompt: bool,
}

impl RunArgs {
    pub fn input_text(&self) -> String {
        self.input.join(" ")
    }
}

impl Commands {
    /// Normalize the bare `<command> [input...]` form into [`RunArgs`]
    pub fn as_run(&self) -> Option<RunArgs> {
        match self {
            Self::Run(args) => Some(args.clone()),
            Self::External(words) => {
                let (name, input) = words.split_first()?;
                Some(RunArgs {
                    name: name.clone(),
                    input: input.to_vec(),
                    ..RunArgs::default()
                })
            }
            _ => None,
        }
    }
}

impl Cli {
    /// Directory project discovery starts from
    pub fn start_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}
