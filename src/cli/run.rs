use super::args::RunArgs;
use anyhow::{Context, Result};
use ccwai_core::{DispatchEngine, ThoughtRecord, save_thought};
use console::style;
use std::path::Path;

/// Handle running a single command
///
/// The response goes to stdout unchanged so it can be piped; everything else
/// goes to stderr.
pub async fn handle_run_command(start: &Path, args: &RunArgs) -> Result<()> {
    let engine = DispatchEngine::new(start)?;
    let input = args.input_text();

    if args.print_prompt {
        let prepared = engine.prepare(&args.name, &input)?;
        println!("{}", prepared.prompt);
        return Ok(());
    }

    let response = engine.run_command(&args.name, &input).await?;
    println!("{response}");

    if let Some(title) = &args.save_thought {
        let record = ThoughtRecord {
            title: title.clone(),
            context: input,
            result: response,
        };
        let path = save_thought(&engine.layout().root, &record)
            .context("Failed to save thought")?;
        eprintln!("{} {}", style("Saved thought:").dim(), path.display());
    }

    Ok(())
}
