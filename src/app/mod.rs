//! Deciding what to check out and carrying it through

mod decision;
mod switch;

pub use decision::{Decision, decide};
pub use switch::{Outcome, Picker, Request, Switcher, Target};
