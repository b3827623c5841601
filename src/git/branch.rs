//! Git branch enumeration

use anyhow::{Context, Result};
use git2::{BranchType, ErrorCode, Repository};
use std::collections::HashSet;

use super::{BranchSource, RepoAccessError};

/// A branch the user can switch to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchRef {
    /// Branch name, without any remote prefix
    pub name: String,
    /// Whether the branch exists locally
    pub is_local: bool,
    /// Whether this is the branch currently checked out
    pub is_current: bool,
}

impl BranchRef {
    /// A local branch
    #[must_use]
    pub fn local(name: impl Into<String>, is_current: bool) -> Self {
        Self {
            name: name.into(),
            is_local: true,
            is_current,
        }
    }

    /// A branch only known from the remote
    #[must_use]
    pub fn remote(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_local: false,
            is_current: false,
        }
    }
}

/// Merge local and remote branch names into one list of [`BranchRef`]s.
///
/// Local entries always win a name clash and are the only ones that can be
/// current. Remote-only names are appended after the locals, keeping the
/// order they were given in. Duplicate names within either list collapse to
/// their first occurrence.
#[must_use]
pub fn merge_branches(local: &[String], remote: &[String], current: Option<&str>) -> Vec<BranchRef> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(local.len() + remote.len());

    for name in local {
        if seen.insert(name.as_str()) {
            merged.push(BranchRef::local(name.clone(), current == Some(name.as_str())));
        }
    }

    for name in remote {
        if seen.insert(name.as_str()) {
            merged.push(BranchRef::remote(name.clone()));
        }
    }

    merged
}

/// Read every branch from `source` and merge them
///
/// # Errors
///
/// Returns an error if any of the branch lists cannot be read
pub fn load_branches(source: &impl BranchSource) -> Result<Vec<BranchRef>, RepoAccessError> {
    let current = source.current_branch_name()?;
    let local = source.local_branch_names()?;
    let remote = source.remote_branch_names()?;
    Ok(merge_branches(&local, &remote, current.as_deref()))
}

/// Reads branch names out of a repository
pub struct Manager<'a> {
    repo: &'a Repository,
}

impl std::fmt::Debug for Manager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager").finish_non_exhaustive()
    }
}

impl<'a> Manager<'a> {
    /// Create a new branch manager for the given repository
    #[must_use]
    pub const fn new(repo: &'a Repository) -> Self {
        Self { repo }
    }

    /// Get the current branch name.
    ///
    /// Returns `None` in an unborn repository or with a detached HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be read
    pub fn current(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(None);
            }
            Err(e) => return Err(e).context("Failed to get HEAD"),
        };

        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_string))
    }

    /// List all local branches
    ///
    /// # Errors
    ///
    /// Returns an error if branches cannot be listed
    pub fn list_local(&self) -> Result<Vec<String>> {
        self.names(BranchType::Local)
    }

    /// List branches of `remote`, with the `remote/` prefix removed.
    ///
    /// The symbolic `remote/HEAD` entry and other remotes' branches are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if branches cannot be listed
    pub fn list_remote(&self, remote: &str) -> Result<Vec<String>> {
        let prefix = format!("{remote}/");
        Ok(self
            .names(BranchType::Remote)?
            .into_iter()
            .filter_map(|name| name.strip_prefix(&prefix).map(str::to_string))
            .filter(|name| name != "HEAD")
            .collect())
    }

    fn names(&self, kind: BranchType) -> Result<Vec<String>> {
        let branches = self
            .repo
            .branches(Some(kind))
            .context("Failed to list branches")?;

        let mut names = Vec::new();
        for branch_result in branches {
            let (branch, _) = branch_result.context("Failed to read branch")?;
            if let Some(name) = branch.name().context("Branch name is not valid UTF-8")? {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names)
    }
}
