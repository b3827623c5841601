//! Conflict prompt state: stash-and-retry or abort

use crate::git::CheckoutIntent;

/// Choices offered when a checkout would overwrite local changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Stash local changes, then run the same checkout again
    StashAndRetry,
    /// Give up on the checkout
    Abort,
}

impl ConflictChoice {
    /// All choices, in display order
    pub const ALL: [Self; 2] = [Self::StashAndRetry, Self::Abort];

    /// Label shown in the prompt
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StashAndRetry => "Stash changes and retry",
            Self::Abort => "Abort checkout",
        }
    }
}

/// Prompt shown after a checkout was blocked by local changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPrompt {
    intent: CheckoutIntent,
    cursor: usize,
}

impl ConflictPrompt {
    /// Ask what to do about the blocked `intent`; "stash and retry" is highlighted
    #[must_use]
    pub const fn new(intent: CheckoutIntent) -> Self {
        Self { intent, cursor: 0 }
    }

    /// The checkout that was blocked
    #[must_use]
    pub const fn intent(&self) -> &CheckoutIntent {
        &self.intent
    }

    /// Index of the highlighted choice
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The highlighted choice
    #[must_use]
    pub const fn choice(&self) -> ConflictChoice {
        if self.cursor == 0 {
            ConflictChoice::StashAndRetry
        } else {
            ConflictChoice::Abort
        }
    }

    /// Highlight the previous choice
    pub const fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Highlight the next choice
    pub const fn move_down(&mut self) {
        if self.cursor + 1 < ConflictChoice::ALL.len() {
            self.cursor += 1;
        }
    }
}
