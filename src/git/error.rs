//! Failures reported by the git collaborators

use thiserror::Error;

/// The repository could not be opened or its branches could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RepoAccessError(pub String);

impl From<anyhow::Error> for RepoAccessError {
    fn from(err: anyhow::Error) -> Self {
        Self(format!("{err:#}"))
    }
}

/// A checkout attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checking out would overwrite uncommitted local changes
    #[error("your local changes would be overwritten by checkout of '{0}'")]
    WouldOverwrite(String),
    /// Any other checkout failure, carrying git's message
    #[error("{0}")]
    Failed(String),
}

/// Stashing local changes failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to stash changes: {0}")]
pub struct StashError(pub String);

/// Refreshing remote branches failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch remote branches: {0}")]
pub struct NetworkError(pub String);

/// Messages git prints when a checkout would discard local modifications
const OVERWRITE_MARKERS: &[&str] = &[
    "Your local changes to the following files would be overwritten by checkout",
    "The following untracked working tree files would be overwritten by checkout",
];

/// Classify the stderr of a failed `git checkout`
#[must_use]
pub fn classify_checkout_failure(branch: &str, stderr: &str) -> CheckoutError {
    if OVERWRITE_MARKERS.iter().any(|marker| stderr.contains(marker)) {
        CheckoutError::WouldOverwrite(branch.to_string())
    } else {
        let message = stderr.trim();
        if message.is_empty() {
            CheckoutError::Failed(format!("Failed to checkout branch '{branch}'"))
        } else {
            CheckoutError::Failed(message.to_string())
        }
    }
}
