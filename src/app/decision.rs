//! Decide between checking out the best match and asking the user

use crate::git::BranchRef;
use crate::matching::ScoredCandidate;

/// What to do with a ranked candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// One branch clearly wins; check it out without asking
    Checkout(BranchRef),
    /// Several branches are close; let the user pick from all of them
    Select(Vec<BranchRef>),
}

/// Decide what to do with `ranked` (best first, as returned by
/// [`crate::matching::rank`]).
///
/// The best candidate wins outright when it is the only one or scores more
/// than twice the runner-up. Returns `None` for an empty list.
#[must_use]
pub fn decide(ranked: Vec<ScoredCandidate>) -> Option<Decision> {
    let best = ranked.first()?;
    let clear_winner = ranked
        .get(1)
        .is_none_or(|second| best.score > second.score.saturating_mul(2));

    if clear_winner {
        return Some(Decision::Checkout(best.branch.clone()));
    }
    Some(Decision::Select(
        ranked.into_iter().map(|candidate| candidate.branch).collect(),
    ))
}
