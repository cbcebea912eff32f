use super::display::heading;
use anyhow::Result;
use ccwai_core::{ProjectLayout, list_thoughts};
use console::style;
use std::path::Path;

/// Handle the thoughts command
pub fn handle_thoughts_command(start: &Path) -> Result<()> {
    let layout = ProjectLayout::discover(start)?;
    let entries = list_thoughts(&layout.root)?;

    if entries.is_empty() {
        println!(
            "{} {}",
            style("No thoughts saved in").dim(),
            layout.thoughts_dir().display()
        );
        return Ok(());
    }

    println!("{}", heading("Thoughts"));
    for entry in entries {
        println!("  {}  {}", entry.label, style(entry.path.display()).dim());
    }
    Ok(())
}
