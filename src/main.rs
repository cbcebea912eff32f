use anyhow::{Context, Result, anyhow};
use ccwai::cli::{self, Cli, Commands, display};
use ccwai_core::config::load_dotenv;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only command output
fn init_tracing(level: &str, no_color: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {level}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

async fn run(args: Cli) -> Result<()> {
    init_tracing(&args.log_level, args.no_color)?;
    load_dotenv(args.cwd.as_deref())?;

    let start = args
        .start_dir()
        .context("Failed to determine current directory")?;
    debug!("Starting from {}", start.display());

    if let Some(run_args) = args.command.as_run() {
        return cli::handle_run_command(&start, &run_args).await;
    }

    match args.command {
        Commands::List => cli::handle_list_command(&start),
        Commands::Doctor => cli::handle_doctor_command(&start).await,
        Commands::Init => cli::handle_init_command(&start),
        Commands::Thoughts => cli::handle_thoughts_command(&start),
        Commands::Status => cli::handle_status_command(&start).await,
        Commands::Run(_) | Commands::External(_) => {
            Err(anyhow!("Usage: ccwai <command> [input...]"))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", display::format_error(&err));
            ExitCode::FAILURE
        }
    }
}
