//! Reading picker input from the terminal

use ratatui::crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

use super::input::key_to_input;
use crate::state::Input;

/// How long one poll waits before the picker redraws anyway
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Waits on the terminal and turns what arrives into selector [`Input`]s
#[derive(Debug)]
pub struct InputReader {
    poll_interval: Duration,
}

impl InputReader {
    /// A reader that gives up on each poll after `poll_interval`
    #[must_use]
    pub const fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Wait up to one poll interval for an input.
    ///
    /// `None` means the picker should redraw and ask again: the poll timed
    /// out, the terminal was resized, or the event carries no input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read
    pub fn next_input(&self) -> io::Result<Option<Input>> {
        if event::poll(self.poll_interval)? {
            Ok(translate(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// The configured poll interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl Default for InputReader {
    fn default() -> Self {
        Self::new(POLL_INTERVAL)
    }
}

/// Keys become inputs; every other terminal event is dropped
#[must_use]
pub fn translate(event: Event) -> Option<Input> {
    match event {
        Event::Key(key) => key_to_input(key),
        _ => None,
    }
}
