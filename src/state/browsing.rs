//! Browsing state: live filtering and cursor movement over the candidates

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::git::BranchRef;

/// The branch list the user is narrowing down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsingState {
    candidates: Vec<BranchRef>,
    filter: String,
    visible: Vec<usize>,
    cursor: usize,
    force: bool,
}

impl BrowsingState {
    /// Start browsing `candidates` with an empty filter
    #[must_use]
    pub fn new(candidates: Vec<BranchRef>, force: bool) -> Self {
        let visible = (0..candidates.len()).collect();
        Self {
            candidates,
            filter: String::new(),
            visible,
            cursor: 0,
            force,
        }
    }

    /// Every candidate, in seeded order
    #[must_use]
    pub fn candidates(&self) -> &[BranchRef] {
        &self.candidates
    }

    /// Current filter text
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Indices into [`Self::candidates`] that pass the filter, best first
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Candidates that pass the filter, best first
    pub fn visible(&self) -> impl Iterator<Item = &BranchRef> {
        self.visible.iter().filter_map(|&i| self.candidates.get(i))
    }

    /// Position of the highlight within the visible list
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether checkouts from this picker are forced
    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }

    /// The highlighted branch, if anything is visible
    #[must_use]
    pub fn highlighted(&self) -> Option<&BranchRef> {
        self.visible
            .get(self.cursor)
            .and_then(|&i| self.candidates.get(i))
    }

    /// Append a character to the filter
    pub fn push_char(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    /// Remove the last character of the filter
    pub fn pop_char(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
        }
    }

    /// Move the highlight up, stopping at the top
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the highlight down, stopping at the bottom
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    fn refilter(&mut self) {
        if self.filter.is_empty() {
            self.visible = (0..self.candidates.len()).collect();
        } else {
            let matcher = SkimMatcherV2::default().ignore_case();
            let mut scored: Vec<(usize, i64)> = self
                .candidates
                .iter()
                .enumerate()
                .filter_map(|(i, branch)| {
                    matcher
                        .fuzzy_match(&branch.name, &self.filter)
                        .map(|score| (i, score))
                })
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            self.visible = scored.into_iter().map(|(i, _)| i).collect();
        }

        if self.cursor >= self.visible.len() {
            self.cursor = 0;
        }
    }
}
