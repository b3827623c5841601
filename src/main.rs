//! gch - smart git branch checkout

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use gch::tui::TerminalPicker;
use gch::{Config, GitCli, Outcome, Request, Switcher, Target};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "gch.log";
const LOG_ENV: &str = "GCH_LOG";

/// Check out the branch you mean from part of its name
#[derive(Debug, Parser)]
#[command(name = "gch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Part of the branch name; omit to browse every branch
    pattern: Option<String>,

    /// Create a new branch named PATTERN and check it out
    #[arg(short = 'b', long = "branch", requires = "pattern")]
    create: bool,

    /// Discard local changes that would block the checkout
    #[arg(short, long)]
    force: bool,

    /// Stash local changes before checking out
    #[arg(short, long)]
    stash: bool,

    /// Log at debug level and print the ranked matches to stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            // For actual errors, show error + help
            eprintln!("{}", e.render());
            let _ = Cli::command().print_help();
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.debug);

    match run(&cli) {
        Ok(Outcome::Switched(name)) => {
            println!("Switched to branch '{name}'");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Created(name)) => {
            println!("Switched to a new branch '{name}'");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Cancelled) => {
            eprintln!("checkout aborted");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Switch failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Ignoring config file");
            eprintln!("Warning: {e:#}; using default settings");
            Config::default()
        }
    };

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let repo = GitCli::discover(&cwd, &config)?;

    let request = Request {
        target: Target::from_args(cli.pattern.clone(), cli.create),
        force: cli.force,
        stash: cli.stash,
        debug: cli.debug,
    };
    let mut picker = TerminalPicker::new(&config);
    Ok(Switcher::new(&repo, &config).run(&request, &mut picker)?)
}

/// Log to `<tmp>/gch.log` - tail with: tail -f /tmp/gch.log
///
/// `GCH_LOG=0-3` controls verbosity (0=off, 1=warn, 2=info, 3=debug); any
/// other value is read as a filter directive such as `gch::git=debug`.
/// `--debug` always logs at debug level.
fn init_logging(debug: bool) {
    let setting = std::env::var(LOG_ENV).ok();
    let Some(directive) = log_directive(debug, setting.as_deref()) else {
        return;
    };
    let Ok(filter) = EnvFilter::try_new(&directive) else {
        eprintln!("Warning: invalid {LOG_ENV} value '{directive}', logging disabled");
        return;
    };

    let log_dir = std::env::temp_dir();
    // Clear the log file on startup
    if let Err(e) = std::fs::write(log_dir.join(LOG_FILE), "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();
}

fn log_directive(debug: bool, setting: Option<&str>) -> Option<String> {
    if debug {
        return Some("debug".to_string());
    }
    let setting = setting.map(str::trim).filter(|s| !s.is_empty())?;
    match setting.parse::<u8>() {
        Ok(0) => None,
        Ok(1) => Some("warn".to_string()),
        Ok(2) => Some("info".to_string()),
        Ok(_) => Some("debug".to_string()),
        Err(_) => Some(setting.to_string()),
    }
}
