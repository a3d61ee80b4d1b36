//! Publishes generated JSON files into the downstream data repository.
//!
//! The data repository is a normal git checkout living next to the scraper;
//! publishing is `git add` + `git commit` + `git push`, nothing fancier.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

const PUSH_TIMEOUT: Duration = Duration::from_secs(30);

/// Stages `files` (paths relative to `repo`), commits them with
/// `"Add data for <YYYY-MM-DD>"` and pushes.
///
/// A clean work tree after staging is success, not an error. Already-written
/// JSON files are never rolled back on failure.
pub async fn commit_and_push(repo: &Path, files: &[PathBuf], end_date: NaiveDate) -> Result<()> {
    if !repo.exists() {
        bail!("repository path does not exist: {}", repo.display());
    }
    if !repo.join(".git").exists() {
        bail!("not a git repository: {}", repo.display());
    }

    info!(repo = %repo.display(), count = files.len(), "Committing to data repository");

    for file in files {
        if repo.join(file).exists() {
            let file_arg = file.to_string_lossy();
            run_git(repo, &["add", file_arg.as_ref()]).await?;
            info!(file = %file.display(), "Staged");
        } else {
            warn!(file = %file.display(), "File does not exist, skipping");
        }
    }

    let status = run_git(repo, &["status", "--porcelain"]).await?;
    if status.trim().is_empty() {
        info!("No changes to commit");
        return Ok(());
    }

    let message = format!("Add data for {}", end_date.format("%Y-%m-%d"));
    run_git(repo, &["commit", "-m", &message]).await?;
    info!(%message, "Committed");

    match timeout(PUSH_TIMEOUT, run_git(repo, &["push"])).await {
        Ok(result) => {
            result?;
            info!("Pushed to remote");
            Ok(())
        }
        Err(_) => bail!("git push timed out"),
    }
}

async fn run_git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .await
        .with_context(|| format!("running git {}", args.join(" ")))?;

    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
