//! Candidate ordering

use super::ScoredCandidate;

/// Order candidates best first.
///
/// Higher scores come first; equal scores put local branches ahead of
/// remote-only ones. Anything still tied keeps its input order. Candidates
/// with a non-positive score are dropped.
#[must_use]
pub fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.retain(|c| c.score > 0);
    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.branch.is_local.cmp(&a.branch.is_local))
    });
    candidates
}
