//! Git collaborators: branch enumeration and checkout/stash/fetch execution
//!
//! The matching and selection code only sees the [`BranchSource`] and
//! [`Executor`] traits. [`GitCli`] is the real implementation.

mod branch;
mod cli;
mod error;

pub use branch::{BranchRef, load_branches, merge_branches};
pub use cli::GitCli;
pub use error::{
    CheckoutError, NetworkError, RepoAccessError, StashError, classify_checkout_failure,
};

use anyhow::{Context, Result};
use git2::Repository;
use std::path::Path;

/// Open a git repository at the given path
///
/// # Errors
///
/// Returns an error if the path is not a git repository
pub fn open_repository(path: &Path) -> Result<Repository> {
    Repository::discover(path).with_context(|| format!("not a git repository: {}", path.display()))
}

/// Source of branch names
pub trait BranchSource {
    /// Names of all local branches
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read
    fn local_branch_names(&self) -> Result<Vec<String>, RepoAccessError>;

    /// Names of remote branches, without the remote prefix or `HEAD`
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read
    fn remote_branch_names(&self) -> Result<Vec<String>, RepoAccessError>;

    /// The branch currently checked out; `None` when unborn or detached
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read
    fn current_branch_name(&self) -> Result<Option<String>, RepoAccessError>;
}

/// Performs the side effects the switcher asks for.
///
/// Every call blocks until git has finished.
pub trait Executor {
    /// Run a checkout
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WouldOverwrite`] when local changes are in the
    /// way, [`CheckoutError::Failed`] otherwise
    fn checkout(&self, intent: &CheckoutIntent) -> Result<(), CheckoutError>;

    /// Stash uncommitted changes
    ///
    /// # Errors
    ///
    /// Returns an error if git refuses to stash
    fn stash(&self) -> Result<(), StashError>;

    /// Fetch remote branches
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails
    fn refresh_remotes(&self) -> Result<(), NetworkError>;
}

/// How a checkout reaches its branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    /// Switch to an existing local branch
    Local,
    /// Create a local branch tracking the remote one
    Track,
    /// Create a brand-new branch from HEAD
    Create,
}

/// A checkout the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutIntent {
    /// How to check the branch out
    pub kind: IntentKind,
    /// Branch name
    pub name: String,
    /// Discard local changes that would block the checkout
    pub force: bool,
}

impl CheckoutIntent {
    /// The checkout that reaches `branch`: plain for local branches, tracking
    /// for remote-only ones
    #[must_use]
    pub fn for_branch(branch: &BranchRef, force: bool) -> Self {
        Self {
            kind: if branch.is_local {
                IntentKind::Local
            } else {
                IntentKind::Track
            },
            name: branch.name.clone(),
            force,
        }
    }

    /// Create and check out a new branch
    #[must_use]
    pub fn create(name: impl Into<String>, force: bool) -> Self {
        Self {
            kind: IntentKind::Create,
            name: name.into(),
            force,
        }
    }

    /// Arguments for `git` that carry out this checkout
    #[must_use]
    pub fn git_args(&self, remote: &str) -> Vec<String> {
        let mut args = vec!["checkout".to_string()];
        match self.kind {
            IntentKind::Local => args.push(self.name.clone()),
            IntentKind::Track => {
                args.push("-b".to_string());
                args.push(self.name.clone());
                args.push(format!("{remote}/{}", self.name));
            }
            IntentKind::Create => {
                args.push("-b".to_string());
                args.push(self.name.clone());
            }
        }
        if self.force {
            args.push("-f".to_string());
        }
        args
    }
}
