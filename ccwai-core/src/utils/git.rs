use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

pub const NO_PENDING_CHANGES: &str = "No pending git changes.";
pub const SUMMARY_UNAVAILABLE: &str = "Git summary unavailable.";

/// Run `git -C <root> <args>` and return stdout when it exits successfully
async fn run_git(root: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(root)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            debug!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            None
        }
        Err(e) => {
            debug!("Failed to spawn git: {}", e);
            None
        }
    }
}

/// Pick the summary from the `git status` output, falling back to `git diff --stat`
fn summarize(status: Option<&str>, diff_stat: Option<&str>) -> String {
    if let Some(status) = status {
        let trimmed = status.trim();
        return if trimmed.is_empty() {
            NO_PENDING_CHANGES.to_string()
        } else {
            trimmed.to_string()
        };
    }

    match diff_stat.map(str::trim) {
        Some(stat) if !stat.is_empty() => stat.to_string(),
        _ => SUMMARY_UNAVAILABLE.to_string(),
    }
}

/// Short branch and working-tree summary of the repository at `root`
///
/// Never fails: when neither `git status` nor `git diff --stat HEAD` can run,
/// the summary is [`SUMMARY_UNAVAILABLE`].
pub async fn diff_summary(root: &Path) -> String {
    let status = run_git(root, &["status", "--short", "--branch"]).await;
    let diff_stat = match status {
        Some(_) => None,
        None => run_git(root, &["diff", "--stat", "HEAD"]).await,
    };
    summarize(status.as_deref(), diff_stat.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn status_output_wins() {
        assert_eq!(summarize(Some("\n  \n"), None), NO_PENDING_CHANGES);
        assert_eq!(
            summarize(Some("## main\n M src/lib.rs\n"), Some("ignored")),
            "## main\n M src/lib.rs"
        );
    }

    #[test]
    fn failed_status_falls_back_to_diff_stat() {
        assert_eq!(summarize(None, Some(" a.rs | 2 +-\n")), "a.rs | 2 +-");
        assert_eq!(summarize(None, Some("  ")), SUMMARY_UNAVAILABLE);
        assert_eq!(summarize(None, None), SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn missing_directory_is_unavailable() {
        let temp = TempDir::new().expect("temp dir");
        let missing = temp.path().join("not-here");
        assert_eq!(diff_summary(&missing).await, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn initialized_repository_reports_untracked_files() {
        let temp = TempDir::new().expect("temp dir");
        if run_git(temp.path(), &["init", "--quiet"]).await.is_none() {
            // git is not installed
            return;
        }

        assert!(diff_summary(temp.path()).await.starts_with("## "));

        fs::write(temp.path().join("notes.md"), "draft").expect("write file");
        let summary = diff_summary(temp.path()).await;
        assert!(summary.starts_with("## "), "{summary}");
        assert!(summary.contains("?? notes.md"), "{summary}");
    }
}
