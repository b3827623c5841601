//! Terminal failures of a branch switch

use thiserror::Error;

use crate::git::{CheckoutError, NetworkError, RepoAccessError, StashError};

/// Why a switch could not be completed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwitchError {
    /// Not a repository, or branches could not be read
    #[error(transparent)]
    RepoAccess(#[from] RepoAccessError),

    /// The repository has no branches at all
    #[error("no branches found. Use -b to create a new branch")]
    NoBranches,

    /// A branch to create was given a blank name
    #[error("branch name cannot be empty")]
    EmptyBranchName,

    /// Nothing matched, even after refreshing remotes once
    #[error("no branches match '{pattern}'")]
    NoMatch {
        /// The pattern the user typed
        pattern: String,
    },

    /// The checkout failed
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Stashing local changes failed
    #[error(transparent)]
    Stash(#[from] StashError),

    /// Refreshing remotes failed
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The interactive picker could not drive the terminal
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl From<std::io::Error> for SwitchError {
    fn from(err: std::io::Error) -> Self {
        Self::Terminal(err.to_string())
    }
}
