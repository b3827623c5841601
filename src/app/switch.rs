//! The branch switch entry point

use tracing::{debug, info, warn};

use super::decision::{Decision, decide};
use crate::config::Config;
use crate::error::SwitchError;
use crate::git::{
    BranchRef, BranchSource, CheckoutError, CheckoutIntent, Executor, IntentKind, load_branches,
};
use crate::matching::{ScoredCandidate, rank, score_all};
use crate::state::{Finish, Selector};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// No pattern: browse every branch
    Browse,
    /// Switch to the branch best matching a pattern
    Pattern(String),
    /// Create a new branch with this exact name
    Create(String),
}

impl Target {
    /// Build a target from the command line pieces. An empty pattern browses,
    /// but a create request always keeps its name, blank or not.
    #[must_use]
    pub fn from_args(pattern: Option<String>, create: bool) -> Self {
        match pattern {
            Some(name) if create => Self::Create(name),
            Some(pattern) if !pattern.trim().is_empty() => Self::Pattern(pattern),
            _ => Self::Browse,
        }
    }
}

/// A single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Where to go
    pub target: Target,
    /// Discard local changes on checkout
    pub force: bool,
    /// Stash local changes before doing anything else
    pub stash: bool,
    /// Print the ranked candidate table to stderr
    pub debug: bool,
}

impl Request {
    /// A plain request for `target` with every flag off
    #[must_use]
    pub const fn new(target: Target) -> Self {
        Self {
            target,
            force: false,
            stash: false,
            debug: false,
        }
    }
}

/// How a successful invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Switched to an existing branch
    Switched(String),
    /// Created and switched to a new branch
    Created(String),
    /// The user backed out of the picker
    Cancelled,
}

/// Drives a [`Selector`] until it is done. The terminal UI is one picker;
/// tests script their own.
pub trait Picker {
    /// Run `selector` to completion, performing its effects through `executor`
    ///
    /// # Errors
    ///
    /// Returns an error if the picker cannot talk to the user
    fn pick<E: Executor>(&mut self, selector: Selector, executor: &E) -> Result<Finish, SwitchError>;
}

/// Resolves a [`Request`] against a repository
#[derive(Debug)]
pub struct Switcher<'a, R> {
    repo: &'a R,
    fetch_before_browse: bool,
}

impl<'a, R: BranchSource + Executor> Switcher<'a, R> {
    /// Switch branches in `repo` using `config`
    #[must_use]
    pub const fn new(repo: &'a R, config: &Config) -> Self {
        Self {
            repo,
            fetch_before_browse: config.fetch_before_browse,
        }
    }

    /// Carry out `request`, asking `picker` when the choice is ambiguous
    ///
    /// # Errors
    ///
    /// Returns an error if branches cannot be read, nothing matches, or git
    /// refuses the stash or checkout
    pub fn run(&self, request: &Request, picker: &mut impl Picker) -> Result<Outcome, SwitchError> {
        if let Target::Create(name) = &request.target
            && name.trim().is_empty()
        {
            return Err(SwitchError::EmptyBranchName);
        }

        if request.stash {
            info!("Stashing local changes");
            self.repo.stash()?;
        }

        match &request.target {
            Target::Create(name) => {
                let intent = CheckoutIntent::create(name.clone(), request.force);
                self.checkout_directly(&intent)
            }
            Target::Browse => self.browse(request, picker),
            Target::Pattern(pattern) => self.switch_to_pattern(pattern, request, picker),
        }
    }

    fn browse(&self, request: &Request, picker: &mut impl Picker) -> Result<Outcome, SwitchError> {
        if self.fetch_before_browse
            && let Err(err) = self.repo.refresh_remotes()
        {
            warn!(error = %err, "Fetch before browsing failed, using cached remote branches");
        }

        let branches = load_branches(self.repo)?;
        if branches.is_empty() {
            return Err(SwitchError::NoBranches);
        }
        debug!(count = branches.len(), "Browsing all branches");
        self.select(branches, request.force, picker)
    }

    fn switch_to_pattern(
        &self,
        pattern: &str,
        request: &Request,
        picker: &mut impl Picker,
    ) -> Result<Outcome, SwitchError> {
        let mut branches = load_branches(self.repo)?;
        if branches.is_empty() {
            return Err(SwitchError::NoBranches);
        }

        let mut ranked = rank(score_all(&branches, pattern));
        if ranked.is_empty() {
            info!(pattern, "No branch matched, refreshing remotes");
            self.repo.refresh_remotes()?;
            branches = load_branches(self.repo)?;
            ranked = rank(score_all(&branches, pattern));
        }
        if ranked.is_empty() {
            return Err(SwitchError::NoMatch {
                pattern: pattern.to_string(),
            });
        }

        if request.debug {
            eprint!("{}", candidate_table(&branches, &ranked));
        }
        for (position, candidate) in ranked.iter().enumerate() {
            debug!(
                position = position + 1,
                branch = %candidate.branch.name,
                score = candidate.score,
                local = candidate.branch.is_local,
                "Ranked candidate"
            );
        }

        match decide(ranked) {
            Some(Decision::Checkout(branch)) => {
                info!(branch = %branch.name, "Single clear match");
                self.checkout_directly(&CheckoutIntent::for_branch(&branch, request.force))
            }
            Some(Decision::Select(candidates)) => self.select(candidates, request.force, picker),
            None => Err(SwitchError::NoMatch {
                pattern: pattern.to_string(),
            }),
        }
    }

    fn checkout_directly(&self, intent: &CheckoutIntent) -> Result<Outcome, SwitchError> {
        match self.repo.checkout(intent) {
            Ok(()) if intent.kind == IntentKind::Create => Ok(Outcome::Created(intent.name.clone())),
            Ok(()) => Ok(Outcome::Switched(intent.name.clone())),
            Err(CheckoutError::WouldOverwrite(name)) => Err(SwitchError::Checkout(
                CheckoutError::Failed(format!(
                    "your local changes would be overwritten by checkout of '{name}'. \
                     Use --stash to stash them or --force to discard them"
                )),
            )),
            Err(err) => Err(err.into()),
        }
    }

    fn select(
        &self,
        candidates: Vec<BranchRef>,
        force: bool,
        picker: &mut impl Picker,
    ) -> Result<Outcome, SwitchError> {
        match picker.pick(Selector::new(candidates, force), self.repo)? {
            Finish::Switched(name) => Ok(Outcome::Switched(name)),
            Finish::Cancelled => Ok(Outcome::Cancelled),
            Finish::Failed(err) => Err(err),
        }
    }
}

fn candidate_table(branches: &[BranchRef], ranked: &[ScoredCandidate]) -> String {
    let header = format!(
        "Found {} branches\nFound {} matches:\n",
        branches.len(),
        ranked.len()
    );
    let rows = ranked.iter().enumerate().map(|(position, candidate)| {
        format!(
            "{}. {} (score: {}, local: {})\n",
            position + 1,
            candidate.branch.name,
            candidate.score,
            candidate.branch.is_local
        )
    });
    std::iter::once(header).chain(rows).collect()
}
