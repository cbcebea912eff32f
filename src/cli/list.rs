use anyhow::{Context, Result};
use ccwai_core::DispatchEngine;
use console::style;
use std::path::Path;

/// Handle the list command
pub fn handle_list_command(start: &Path) -> Result<()> {
    let engine = DispatchEngine::new(start)?;
    let names = engine
        .list_commands()
        .context("Failed to list commands")?;

    if names.is_empty() {
        eprintln!(
            "{} {}",
            style("No commands found in").dim(),
            engine.layout().commands_dir.display()
        );
        return Ok(());
    }

    println!("{}", names.join("\n"));
    Ok(())
}
