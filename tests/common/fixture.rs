//! Test fixture for setting up temporary git repositories

use std::fs;
use std::path::{Path, PathBuf};

use git2::{BranchType, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A throwaway repository with one commit on `master`
pub struct TestRepo {
    /// Keeps the directory alive for the fixture's lifetime
    _temp_dir: TempDir,
    /// Path to the working tree
    pub path: PathBuf,
    /// Isolated config file location (never created unless a test writes it)
    pub config_path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        // Canonicalize to handle symlinked temp dirs.
        let root = temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| temp_dir.path().to_path_buf());
        let path = root.join("repo");
        fs::create_dir_all(&path)?;

        // Stable default branch name regardless of the user's git config
        let mut init_opts = RepositoryInitOptions::new();
        init_opts.initial_head("master");
        let repo = Repository::init_opts(&path, &init_opts)?;
        repo.set_head("refs/heads/master")?;
        set_identity(&repo)?;
        commit_file(&repo, "README.md", "# Test Repository\n", "Initial commit")?;

        Ok(Self {
            _temp_dir: temp_dir,
            config_path: root.join("config.json"),
            path,
        })
    }

    /// Initialize an empty repository with no commits
    pub fn empty() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| temp_dir.path().to_path_buf());
        let path = root.join("repo");
        fs::create_dir_all(&path)?;

        let mut init_opts = RepositoryInitOptions::new();
        init_opts.initial_head("master");
        Repository::init_opts(&path, &init_opts)?;

        Ok(Self {
            _temp_dir: temp_dir,
            config_path: root.join("config.json"),
            path,
        })
    }

    /// Clone `upstream` into a sibling directory; the clone has `origin` set
    pub fn clone_of(upstream: &Self) -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| temp_dir.path().to_path_buf());
        let path = root.join("clone");

        let url = upstream
            .path
            .to_str()
            .ok_or("temp path is not valid UTF-8")?;
        let repo = Repository::clone(url, &path)?;
        set_identity(&repo)?;

        Ok(Self {
            _temp_dir: temp_dir,
            config_path: root.join("config.json"),
            path,
        })
    }

    pub fn repo(&self) -> Result<Repository, git2::Error> {
        Repository::open(&self.path)
    }

    /// Create a branch at HEAD without checking it out
    pub fn branch(&self, name: &str) -> Result<(), Box<dyn std::error::Error>> {
        let repo = self.repo()?;
        let head = repo.head()?.peel_to_commit()?;
        repo.branch(name, &head, false)?;
        Ok(())
    }

    /// Create a branch whose README differs from `master`'s
    pub fn diverging_branch(&self, name: &str) -> Result<(), Box<dyn std::error::Error>> {
        let repo = self.repo()?;
        let head = repo.head()?.peel_to_commit()?;
        repo.branch(name, &head, false)?;
        repo.set_head(&format!("refs/heads/{name}"))?;
        repo.checkout_head(Some(git2::build::CheckoutBuilder::new().force()))?;
        commit_file(&repo, "README.md", &format!("# {name}\n"), "Diverge")?;

        repo.set_head("refs/heads/master")?;
        repo.checkout_head(Some(git2::build::CheckoutBuilder::new().force()))?;
        Ok(())
    }

    /// Modify a tracked file without committing
    pub fn dirty_readme(&self) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(self.path.join("README.md"), "uncommitted edit\n")?;
        Ok(())
    }

    /// Short name of the checked out branch
    pub fn current_branch(&self) -> Result<String, Box<dyn std::error::Error>> {
        let repo = self.repo()?;
        let head = repo.head()?;
        Ok(head.shorthand().ok_or("HEAD is not valid UTF-8")?.to_string())
    }

    pub fn has_local_branch(&self, name: &str) -> Result<bool, git2::Error> {
        Ok(self.repo()?.find_branch(name, BranchType::Local).is_ok())
    }

    pub fn stash_count(&self) -> Result<usize, git2::Error> {
        let mut repo = self.repo()?;
        let mut count = 0;
        repo.stash_foreach(|_, _, _| {
            count += 1;
            true
        })?;
        Ok(count)
    }
}

fn set_identity(repo: &Repository) -> Result<(), git2::Error> {
    let mut config = repo.config()?;
    config.set_str("user.name", "Test")?;
    config.set_str("user.email", "test@test.com")?;
    Ok(())
}

fn commit_file(
    repo: &Repository,
    file: &str,
    contents: &str,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let workdir = repo.workdir().ok_or("bare repository")?;
    fs::write(workdir.join(file), contents)?;

    let mut index = repo.index()?;
    index.add_path(Path::new(file))?;
    index.write()?;

    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let sig = Signature::now("Test", "test@test.com")?;
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
    Ok(())
}
