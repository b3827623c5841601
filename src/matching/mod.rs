//! Branch matching: scoring branch names against a query and ranking them

mod rank;
mod score;

pub use rank::rank;
pub use score::{EXACT_MATCH_SCORE, score, score_all};

use crate::git::BranchRef;

/// A branch paired with its score against the current query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    /// The scored branch
    pub branch: BranchRef,
    /// Score from [`score`]; only positive scores are kept
    pub score: i64,
}
