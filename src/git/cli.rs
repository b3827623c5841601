//! Git collaborator backed by libgit2 for reads and the `git` binary for writes

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, info, warn};

use super::branch::Manager;
use super::{
    BranchSource, CheckoutError, CheckoutIntent, Executor, NetworkError, RepoAccessError,
    StashError, classify_checkout_failure, open_repository,
};
use crate::config::Config;

/// Create a `git` command with a stable, non-interactive environment
fn git_command() -> Command {
    let mut cmd = Command::new("git");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

/// Run git in `dir` and capture its output
fn git_output(dir: &Path, args: &[String]) -> Result<Output> {
    git_command()
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Branch listing and checkout against a repository on disk
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
    remote: String,
    stash_message: String,
}

impl GitCli {
    /// Open the repository containing `path`
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not inside a git repository
    pub fn discover(path: &Path, config: &Config) -> Result<Self, RepoAccessError> {
        let repo = open_repository(path)?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| RepoAccessError("Repository has no working directory".to_string()))?;

        debug!(root = %root.display(), remote = %config.remote, "Opened repository");
        Ok(Self {
            root,
            remote: config.remote.clone(),
            stash_message: config.stash_message.clone(),
        })
    }

    fn with_manager<T>(
        &self,
        f: impl FnOnce(&Manager<'_>) -> Result<T>,
    ) -> Result<T, RepoAccessError> {
        let repo = open_repository(&self.root)?;
        let manager = Manager::new(&repo);
        Ok(f(&manager)?)
    }
}

impl BranchSource for GitCli {
    fn local_branch_names(&self) -> Result<Vec<String>, RepoAccessError> {
        self.with_manager(|manager| manager.list_local())
    }

    fn remote_branch_names(&self) -> Result<Vec<String>, RepoAccessError> {
        self.with_manager(|manager| manager.list_remote(&self.remote))
    }

    fn current_branch_name(&self) -> Result<Option<String>, RepoAccessError> {
        self.with_manager(|manager| manager.current())
    }
}

impl Executor for GitCli {
    fn checkout(&self, intent: &CheckoutIntent) -> Result<(), CheckoutError> {
        let args = intent.git_args(&self.remote);
        debug!(?args, "Running checkout");

        let output = git_output(&self.root, &args)
            .map_err(|e| CheckoutError::Failed(format!("{e:#}")))?;

        if output.status.success() {
            info!(branch = %intent.name, "Checked out branch");
            return Ok(());
        }

        let stderr = stderr_of(&output);
        let err = classify_checkout_failure(&intent.name, &stderr);
        warn!(branch = %intent.name, error = %err, "Checkout failed");
        Err(err)
    }

    fn stash(&self) -> Result<(), StashError> {
        let args = vec![
            "stash".to_string(),
            "push".to_string(),
            "-m".to_string(),
            self.stash_message.clone(),
        ];
        let output = git_output(&self.root, &args).map_err(|e| StashError(format!("{e:#}")))?;

        if output.status.success() {
            info!("Stashed local changes");
            Ok(())
        } else {
            Err(StashError(stderr_of(&output)))
        }
    }

    fn refresh_remotes(&self) -> Result<(), NetworkError> {
        let has_remote = open_repository(&self.root)
            .and_then(|repo| {
                let remotes = repo.remotes().context("Failed to list remotes")?;
                Ok(remotes.iter().flatten().any(|name| name == self.remote))
            })
            .map_err(|e| NetworkError(format!("{e:#}")))?;

        if !has_remote {
            debug!(remote = %self.remote, "Remote not configured, skipping fetch");
            return Ok(());
        }

        let args = vec![
            "fetch".to_string(),
            "--quiet".to_string(),
            self.remote.clone(),
        ];
        let output = git_output(&self.root, &args).map_err(|e| NetworkError(format!("{e:#}")))?;

        if output.status.success() {
            info!(remote = %self.remote, "Fetched remote branches");
            Ok(())
        } else {
            Err(NetworkError(stderr_of(&output)))
        }
    }
}
