//! Terminal front end for the branch picker

mod event;
mod input;
mod render;

pub use event::{InputReader, translate};
pub use input::{key_to_input, map_key};
pub use render::{centered_rect_absolute, render};

use ratatui::crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use tracing::debug;

use crate::app::Picker;
use crate::config::Config;
use crate::error::SwitchError;
use crate::git::Executor;
use crate::state::{Finish, Input, Selector};

/// Picker that runs on the controlling terminal
#[derive(Debug)]
pub struct TerminalPicker {
    max_visible: usize,
    reader: InputReader,
}

impl TerminalPicker {
    /// Create a picker sized by `config`
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            max_visible: config.max_visible_branches,
            reader: InputReader::default(),
        }
    }
}

impl Picker for TerminalPicker {
    fn pick<E: Executor>(&mut self, selector: Selector, executor: &E) -> Result<Finish, SwitchError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        let reader = &self.reader;
        let result = drive(&mut terminal, selector, executor, self.max_visible, || {
            reader.next_input()
        });

        let restored = restore(&mut terminal);
        let finish = result?;
        restored?;
        Ok(finish)
    }
}

fn restore(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Draw, read an input, step; until the selector is done.
///
/// Effects run synchronously inside [`Selector::step`], so nothing is drawn
/// while git is working.
fn drive<B: Backend, E: Executor>(
    terminal: &mut Terminal<B>,
    mut selector: Selector,
    executor: &E,
    max_visible: usize,
    mut next_input: impl FnMut() -> io::Result<Option<Input>>,
) -> io::Result<Finish> {
    loop {
        if let Some(finish) = selector.finish() {
            return Ok(finish.clone());
        }

        terminal.draw(|frame| render(frame, &selector, max_visible))?;

        if let Some(input) = next_input()? {
            debug!(?input, "Picker input");
            selector = selector.step(input, executor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{BranchRef, CheckoutError, CheckoutIntent, NetworkError, StashError};
    use ratatui::backend::TestBackend;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    struct RecordingExecutor {
        checkouts: RefCell<Vec<String>>,
    }

    impl Executor for RecordingExecutor {
        fn checkout(&self, intent: &CheckoutIntent) -> Result<(), CheckoutError> {
            self.checkouts.borrow_mut().push(intent.name.clone());
            Ok(())
        }

        fn stash(&self) -> Result<(), StashError> {
            Ok(())
        }

        fn refresh_remotes(&self) -> Result<(), NetworkError> {
            Ok(())
        }
    }

    fn scripted(inputs: &[Option<Input>]) -> impl FnMut() -> io::Result<Option<Input>> {
        let mut queue: VecDeque<Option<Input>> = inputs.iter().copied().collect();
        move || {
            queue
                .pop_front()
                .ok_or_else(|| io::Error::other("ran out of input"))
        }
    }

    fn selector() -> Selector {
        Selector::new(
            vec![
                BranchRef::local("main", true),
                BranchRef::local("develop", false),
            ],
            false,
        )
    }

    #[test]
    fn test_drive_checks_out_selection() -> Result<(), Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        let executor = RecordingExecutor::default();

        let finish = drive(
            &mut terminal,
            selector(),
            &executor,
            10,
            scripted(&[None, Some(Input::Down), None, Some(Input::Enter)]),
        )?;

        assert_eq!(finish, Finish::Switched("develop".to_string()));
        assert_eq!(executor.checkouts.borrow().as_slice(), ["develop"]);
        Ok(())
    }

    #[test]
    fn test_drive_cancel() -> Result<(), Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        let executor = RecordingExecutor::default();

        let finish = drive(
            &mut terminal,
            selector(),
            &executor,
            10,
            scripted(&[Some(Input::Cancel)]),
        )?;

        assert_eq!(finish, Finish::Cancelled);
        assert!(executor.checkouts.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_drive_propagates_input_errors() -> Result<(), Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        let executor = RecordingExecutor::default();

        let result = drive(&mut terminal, selector(), &executor, 10, scripted(&[]));

        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_picker_uses_configured_height() {
        let config = Config {
            max_visible_branches: 4,
            ..Config::default()
        };
        let picker = TerminalPicker::new(&config);
        assert_eq!(picker.max_visible, 4);
    }
}
