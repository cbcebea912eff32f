use super::display::{heading, style_success};
use anyhow::{Context, Result};
use ccwai_core::{bootstrap_project, find_project_root};
use std::path::Path;

/// Handle the init command
pub fn handle_init_command(start: &Path) -> Result<()> {
    if let Ok(root) = find_project_root(start) {
        println!(
            "{} {}",
            style_success("✅ CCWAI already initialized at"),
            root.display()
        );
        return Ok(());
    }

    println!("{}", heading("Initialize CCWAI project"));
    println!("Directory: {}", start.display());

    let created = bootstrap_project(start)
        .with_context(|| format!("Failed to initialize project in {}", start.display()))?;
    for entry in &created {
        println!("  {} {}", style_success("created"), entry);
    }
    println!(
        "{}",
        style_success("✅ Project ready. Try `ccwai hello world`.")
    );

    Ok(())
}
