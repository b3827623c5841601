//! gch - smart git branch checkout
//!
//! Give `gch` part of a branch name and it checks out the branch you most
//! likely meant. When several branches match about equally well, an
//! interactive picker lets you choose; when a checkout would overwrite local
//! changes, the picker offers to stash them first.

pub mod app;
pub mod config;
pub mod error;
pub mod git;
pub mod matching;
pub mod state;
pub mod tui;

pub use app::{Outcome, Request, Switcher, Target};
pub use config::Config;
pub use error::SwitchError;
pub use git::{BranchRef, GitCli};
