//! Interactive selector state machine.
//!
//! [`Selector`] is a plain value. [`Selector::handle`] turns an [`Input`] into
//! the next state plus, at most, one [`Effect`] for the caller to carry out.
//! The caller reports what happened through [`Selector::resolve`]. Nothing in
//! here touches git or the terminal, so every transition can be tested with a
//! fake [`Executor`].

mod browsing;
mod conflict;

pub use browsing::BrowsingState;
pub use conflict::{ConflictChoice, ConflictPrompt};

use tracing::debug;

use crate::error::SwitchError;
use crate::git::{BranchRef, CheckoutError, CheckoutIntent, Executor, StashError};

/// A discrete user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A character typed into the filter
    Char(char),
    /// Delete the last filter character
    Backspace,
    /// Move the highlight up
    Up,
    /// Move the highlight down
    Down,
    /// Confirm the highlighted entry
    Enter,
    /// Leave without doing anything
    Cancel,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Attempt a checkout
    Checkout(CheckoutIntent),
    /// Stash local changes, then attempt the same checkout again
    StashAndRetry(CheckoutIntent),
}

impl Effect {
    /// The checkout this effect ends with
    #[must_use]
    pub const fn intent(&self) -> &CheckoutIntent {
        match self {
            Self::Checkout(intent) | Self::StashAndRetry(intent) => intent,
        }
    }

    /// Carry out the effect. Blocks until git returns.
    pub fn perform(&self, executor: &impl Executor) -> EffectOutcome {
        if let Self::StashAndRetry(_) = self
            && let Err(err) = executor.stash()
        {
            return EffectOutcome::Stash(err);
        }
        match executor.checkout(self.intent()) {
            Ok(()) => EffectOutcome::Completed,
            Err(err) => EffectOutcome::Checkout(err),
        }
    }
}

/// What happened when an [`Effect`] was carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectOutcome {
    /// The checkout went through
    Completed,
    /// The checkout failed
    Checkout(CheckoutError),
    /// Stashing failed; no checkout was attempted
    Stash(StashError),
}

/// How the selector ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finish {
    /// The named branch is now checked out
    Switched(String),
    /// The user backed out
    Cancelled,
    /// The checkout or stash failed
    Failed(SwitchError),
}

/// The result of handling one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the input
    pub state: Selector,
    /// Effect to perform before the next input, if any
    pub effect: Option<Effect>,
}

impl Transition {
    const fn stay(state: Selector) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Interactive selector state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Filtering and moving through the branch list
    Browsing(BrowsingState),
    /// Asking whether to stash after a blocked checkout
    ConflictPrompt(ConflictPrompt),
    /// Finished; no further input is accepted
    Done(Finish),
}

impl Selector {
    /// Start browsing `candidates`. With `force`, checkouts discard local
    /// changes and the conflict prompt never appears.
    #[must_use]
    pub fn new(candidates: Vec<BranchRef>, force: bool) -> Self {
        Self::Browsing(BrowsingState::new(candidates, force))
    }

    /// The final result, once the selector is done
    #[must_use]
    pub const fn finish(&self) -> Option<&Finish> {
        match self {
            Self::Done(finish) => Some(finish),
            _ => None,
        }
    }

    /// Whether the selector has finished
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Apply one input
    #[must_use]
    pub fn handle(self, input: Input) -> Transition {
        match self {
            Self::Browsing(browsing) => Self::handle_browsing(browsing, input),
            Self::ConflictPrompt(prompt) => Self::handle_conflict(prompt, input),
            done @ Self::Done(_) => Transition::stay(done),
        }
    }

    fn handle_browsing(mut browsing: BrowsingState, input: Input) -> Transition {
        match input {
            Input::Char(c) => browsing.push_char(c),
            Input::Backspace => browsing.pop_char(),
            Input::Up => browsing.move_up(),
            Input::Down => browsing.move_down(),
            Input::Cancel => return Transition::stay(Self::Done(Finish::Cancelled)),
            Input::Enter => {
                let force = browsing.force();
                let effect = browsing
                    .highlighted()
                    .map(|branch| Effect::Checkout(CheckoutIntent::for_branch(branch, force)));
                return Transition {
                    state: Self::Browsing(browsing),
                    effect,
                };
            }
        }
        Transition::stay(Self::Browsing(browsing))
    }

    fn handle_conflict(mut prompt: ConflictPrompt, input: Input) -> Transition {
        match input {
            Input::Up => prompt.move_up(),
            Input::Down => prompt.move_down(),
            Input::Cancel => return Transition::stay(Self::Done(Finish::Cancelled)),
            Input::Enter => {
                return match prompt.choice() {
                    ConflictChoice::StashAndRetry => {
                        let effect = Effect::StashAndRetry(prompt.intent().clone());
                        Transition {
                            state: Self::ConflictPrompt(prompt),
                            effect: Some(effect),
                        }
                    }
                    ConflictChoice::Abort => Transition::stay(Self::Done(Finish::Cancelled)),
                };
            }
            Input::Char(_) | Input::Backspace => {}
        }
        Transition::stay(Self::ConflictPrompt(prompt))
    }

    /// Feed back the outcome of the effect returned by [`Self::handle`]
    #[must_use]
    pub fn resolve(self, effect: &Effect, outcome: EffectOutcome) -> Self {
        let intent = effect.intent();
        debug!(branch = %intent.name, ?outcome, "Selector effect finished");

        match (self, effect) {
            (Self::Browsing(_), Effect::Checkout(_)) => match outcome {
                EffectOutcome::Completed => Self::Done(Finish::Switched(intent.name.clone())),
                EffectOutcome::Checkout(CheckoutError::WouldOverwrite(_)) if !intent.force => {
                    Self::ConflictPrompt(ConflictPrompt::new(intent.clone()))
                }
                EffectOutcome::Checkout(err) => Self::Done(Finish::Failed(err.into())),
                EffectOutcome::Stash(err) => Self::Done(Finish::Failed(err.into())),
            },
            (Self::ConflictPrompt(_), Effect::StashAndRetry(_)) => match outcome {
                EffectOutcome::Completed => Self::Done(Finish::Switched(intent.name.clone())),
                EffectOutcome::Checkout(err) => Self::Done(Finish::Failed(err.into())),
                EffectOutcome::Stash(err) => Self::Done(Finish::Failed(err.into())),
            },
            (state, _) => state,
        }
    }

    /// Apply one input and carry out whatever effect it asks for
    #[must_use]
    pub fn step(self, input: Input, executor: &impl Executor) -> Self {
        let Transition { state, effect } = self.handle(input);
        match effect {
            Some(effect) => {
                let outcome = effect.perform(executor);
                state.resolve(&effect, outcome)
            }
            None => state,
        }
    }

    /// Feed inputs until the selector finishes or the inputs run out
    #[must_use]
    pub fn run(self, inputs: impl IntoIterator<Item = Input>, executor: &impl Executor) -> Self {
        let mut state = self;
        for input in inputs {
            if state.is_done() {
                break;
            }
            state = state.step(input, executor);
        }
        state
    }
}
