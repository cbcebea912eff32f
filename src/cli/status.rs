use super::display::heading;
use anyhow::Result;
use ccwai_core::find_project_root;
use ccwai_core::utils::diff_summary;
use std::path::Path;

/// Handle the status command
///
/// Uses the project root when one is found, otherwise the start directory.
pub async fn handle_status_command(start: &Path) -> Result<()> {
    let root = find_project_root(start).unwrap_or_else(|_| start.to_path_buf());
    println!("{} {}", heading("Git status"), root.display());
    println!("{}", diff_summary(&root).await);
    Ok(())
}
