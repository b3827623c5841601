//! Weighted branch-name scoring

use super::ScoredCandidate;
use crate::git::BranchRef;

/// Score returned when the branch name equals the query (ignoring case)
pub const EXACT_MATCH_SCORE: i64 = 10_000;

const TICKET_BONUS: i64 = 600;
const NUMBER_BONUS: i64 = 400;
const SUFFIX_BONUS: i64 = 1000;
const PREFIX_BONUS: i64 = 500;
const SEGMENT_BONUS: i64 = 300;
const SUBSEQUENCE_BONUS: i64 = 250;
const SUBSTRING_BONUS: i64 = 100;
const LENGTH_PENALTY_DIVISOR: usize = 5;

/// Well-known branch names and the bonus they earn when matched
const COMMON_BRANCHES: &[(&str, i64)] = &[
    ("master", 50),
    ("main", 50),
    ("develop", 40),
    ("dev", 40),
    ("production", 40),
    ("prod", 40),
    ("staging", 30),
    ("stage", 30),
    ("test", 20),
];

/// Score how well `branch` matches `pattern`. Higher is better.
///
/// Matching ignores case, except for the numeric checks which look at the
/// branch name as written. A result of zero or less means "no match".
#[must_use]
pub fn score(branch: &str, pattern: &str) -> i64 {
    let branch_lower = branch.to_lowercase();
    let pattern_lower = pattern.to_lowercase();

    if branch_lower == pattern_lower {
        return EXACT_MATCH_SCORE;
    }

    let mut total = 0;

    if let Ok(number) = pattern.parse::<u64>() {
        if branch.contains(&format!("#{pattern}")) {
            total += TICKET_BONUS;
        }
        if branch.contains(&number.to_string()) {
            total += NUMBER_BONUS;
        }
    }

    if branch_lower.ends_with(&pattern_lower) {
        total += SUFFIX_BONUS;
    }

    if branch_lower.starts_with(&pattern_lower) {
        total += PREFIX_BONUS;
    }

    if is_path_segment(&branch_lower, &pattern_lower) {
        total += SEGMENT_BONUS;
    }

    if is_subsequence(&branch_lower, &pattern_lower) {
        total += SUBSEQUENCE_BONUS;
    }

    if branch_lower.contains(&pattern_lower) {
        total += SUBSTRING_BONUS;
    }

    total -= i64::try_from(branch.len() / LENGTH_PENALTY_DIVISOR).unwrap_or(i64::MAX);

    // Only fires when the branch *is* the common name
    total += COMMON_BRANCHES
        .iter()
        .filter(|(name, _)| branch_lower == *name && name.contains(pattern_lower.as_str()))
        .map(|(_, bonus)| bonus)
        .sum::<i64>();

    total
}

/// Score every branch against `pattern`, dropping the ones that don't match
#[must_use]
pub fn score_all(branches: &[BranchRef], pattern: &str) -> Vec<ScoredCandidate> {
    branches
        .iter()
        .filter_map(|branch| {
            let score = score(&branch.name, pattern);
            (score > 0).then(|| ScoredCandidate {
                branch: branch.clone(),
                score,
            })
        })
        .collect()
}

/// Whether `pattern` appears next to a `/` separator in `branch`
fn is_path_segment(branch: &str, pattern: &str) -> bool {
    branch.contains(&format!("/{pattern}")) || branch.contains(&format!("{pattern}/"))
}

/// Whether the characters of `pattern` appear in `branch` in order, gaps allowed
fn is_subsequence(branch: &str, pattern: &str) -> bool {
    let mut wanted = pattern.chars().peekable();
    for c in branch.chars() {
        if wanted.peek() == Some(&c) {
            wanted.next();
        }
    }
    wanted.peek().is_none()
}
