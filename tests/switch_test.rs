//! End-to-end branch switching against real temporary repositories
//!
//! These tests need the `git` binary on PATH.

mod common;

use common::TestRepo;
use gch::app::Picker;
use gch::git::{CheckoutError, Executor};
use gch::state::{Finish, Input, Selector};
use gch::{Config, GitCli, Outcome, Request, SwitchError, Switcher, Target};

/// Replays fixed inputs and records the candidates it was offered
#[derive(Debug, Default)]
struct ScriptedPicker {
    inputs: Vec<Input>,
    offered: Vec<String>,
}

impl Picker for ScriptedPicker {
    fn pick<E: Executor>(
        &mut self,
        selector: Selector,
        executor: &E,
    ) -> Result<Finish, SwitchError> {
        if let Selector::Browsing(state) = &selector {
            self.offered = state.candidates().iter().map(|b| b.name.clone()).collect();
        }
        let done = selector.run(self.inputs.clone(), executor);
        Ok(done.finish().cloned().unwrap_or(Finish::Cancelled))
    }
}

fn switch(fixture: &TestRepo, request: &Request) -> Result<Outcome, Box<dyn std::error::Error>> {
    let config = Config::default();
    let repo = GitCli::discover(&fixture.path, &config)?;
    let mut picker = ScriptedPicker::default();
    Ok(Switcher::new(&repo, &config).run(request, &mut picker)?)
}

fn pattern(p: &str) -> Request {
    Request::new(Target::Pattern(p.to_string()))
}

#[test]
fn test_fuzzy_pattern_checks_out_clear_winner() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;
    fixture.branch("feature/login-page")?;
    fixture.branch("feature/logout")?;

    let outcome = switch(&fixture, &pattern("login"))?;

    assert_eq!(outcome, Outcome::Switched("feature/login-page".to_string()));
    assert_eq!(fixture.current_branch()?, "feature/login-page");
    Ok(())
}

#[test]
fn test_no_match_without_remote() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;
    let config = Config::default();
    let repo = GitCli::discover(&fixture.path, &config)?;
    let mut picker = ScriptedPicker::default();

    let result = Switcher::new(&repo, &config).run(&pattern("zzz"), &mut picker);

    assert_eq!(
        result,
        Err(SwitchError::NoMatch {
            pattern: "zzz".to_string()
        })
    );
    assert_eq!(fixture.current_branch()?, "master");
    Ok(())
}

#[test]
fn test_empty_repository_has_no_branches() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::empty()?;
    let config = Config::default();
    let repo = GitCli::discover(&fixture.path, &config)?;
    let mut picker = ScriptedPicker::default();
    let switcher = Switcher::new(&repo, &config);

    assert_eq!(
        switcher.run(&pattern("main"), &mut picker),
        Err(SwitchError::NoBranches)
    );
    assert_eq!(
        switcher.run(&Request::new(Target::Browse), &mut picker),
        Err(SwitchError::NoBranches)
    );
    Ok(())
}

#[test]
fn test_remote_only_branch_is_tracked() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = TestRepo::new()?;
    upstream.branch("hotfix/payments")?;
    let clone = TestRepo::clone_of(&upstream)?;
    assert!(!clone.has_local_branch("hotfix/payments")?);

    let outcome = switch(&clone, &pattern("payments"))?;

    assert_eq!(outcome, Outcome::Switched("hotfix/payments".to_string()));
    assert_eq!(clone.current_branch()?, "hotfix/payments");
    assert!(clone.has_local_branch("hotfix/payments")?);
    Ok(())
}

#[test]
fn test_branch_pushed_after_clone_is_found_by_refresh() -> Result<(), Box<dyn std::error::Error>> {
    let upstream = TestRepo::new()?;
    let clone = TestRepo::clone_of(&upstream)?;
    upstream.branch("release/quartz")?;

    let outcome = switch(&clone, &pattern("quartz"))?;

    assert_eq!(outcome, Outcome::Switched("release/quartz".to_string()));
    assert_eq!(clone.current_branch()?, "release/quartz");
    Ok(())
}

#[test]
fn test_create_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;

    let outcome = switch(&fixture, &Request::new(Target::Create("feature/new".to_string())))?;

    assert_eq!(outcome, Outcome::Created("feature/new".to_string()));
    assert_eq!(fixture.current_branch()?, "feature/new");
    Ok(())
}

#[test]
fn test_blocked_checkout_suggests_stash_or_force() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;
    fixture.diverging_branch("other")?;
    fixture.dirty_readme()?;
    let config = Config::default();
    let repo = GitCli::discover(&fixture.path, &config)?;
    let mut picker = ScriptedPicker::default();

    let result = Switcher::new(&repo, &config).run(&pattern("other"), &mut picker);

    let Err(SwitchError::Checkout(CheckoutError::Failed(message))) = result else {
        return Err(format!("expected a blocked checkout, got {result:?}").into());
    };
    assert!(message.contains("--stash"));
    assert_eq!(fixture.current_branch()?, "master");
    Ok(())
}

#[test]
fn test_stash_flag_clears_the_way() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;
    fixture.diverging_branch("other")?;
    fixture.dirty_readme()?;

    let request = Request {
        stash: true,
        ..pattern("other")
    };
    let outcome = switch(&fixture, &request)?;

    assert_eq!(outcome, Outcome::Switched("other".to_string()));
    assert_eq!(fixture.current_branch()?, "other");
    assert_eq!(fixture.stash_count()?, 1);
    Ok(())
}

#[test]
fn test_force_flag_discards_changes() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;
    fixture.diverging_branch("other")?;
    fixture.dirty_readme()?;

    let request = Request {
        force: true,
        ..pattern("other")
    };
    let outcome = switch(&fixture, &request)?;

    assert_eq!(outcome, Outcome::Switched("other".to_string()));
    assert_eq!(fixture.stash_count()?, 0);
    Ok(())
}

#[test]
fn test_selector_stash_and_retry_on_real_repo() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;
    fixture.diverging_branch("other")?;
    fixture.dirty_readme()?;
    let repo = GitCli::discover(&fixture.path, &Config::default())?;
    let branches = gch::git::load_branches(&repo)?;
    let mut selector = Selector::new(branches, false);

    // master is current and listed first
    selector = selector.step(Input::Down, &repo);
    selector = selector.step(Input::Enter, &repo);
    assert!(matches!(selector, Selector::ConflictPrompt(_)));

    selector = selector.step(Input::Enter, &repo);

    assert_eq!(
        selector.finish(),
        Some(&Finish::Switched("other".to_string()))
    );
    assert_eq!(fixture.current_branch()?, "other");
    assert_eq!(fixture.stash_count()?, 1);
    Ok(())
}

#[test]
fn test_browse_offers_every_branch() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestRepo::new()?;
    fixture.branch("dev")?;
    let config = Config::default();
    let repo = GitCli::discover(&fixture.path, &config)?;
    let mut picker = ScriptedPicker {
        inputs: vec![Input::Cancel],
        ..ScriptedPicker::default()
    };

    let outcome = Switcher::new(&repo, &config).run(&Request::new(Target::Browse), &mut picker)?;

    assert_eq!(outcome, Outcome::Cancelled);
    let mut offered = picker.offered.clone();
    offered.sort();
    assert_eq!(offered, vec!["dev".to_string(), "master".to_string()]);
    Ok(())
}
