//! # nc-cli
//!
//! Command-line entry point for the N Commandments monthly goal tracker.
//!
//! Run it on the first day of each month: it asks how last month's goals
//! went, collects new ones, and saves everything to `state.json`.
//!
//! Exit code 0 means the session completed; 1 means it was refused (wrong
//! day, already done this month) or failed (e.g., a corrupted state file).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nc_goal::{GoalError, GoalSession, SystemClock, TerminalPrompter, TrackerConfig};
use tracing_subscriber::EnvFilter;

/// Monthly goal tracker: reflect on last month's goals and set new ones.
#[derive(Parser)]
#[command(name = "commandments", version, about)]
struct Cli {
    /// State file to read and update.
    #[arg(long, default_value = nc_goal::config::STATE_FILE_NAME)]
    state_file: PathBuf,
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();
    let config = TrackerConfig::default().with_state_file(cli.state_file);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

fn run(config: &TrackerConfig) -> Result<(), GoalError> {
    tracing::debug!(state_file = %config.state_file.display(), "starting session");
    let store = config.store();
    let mut prompter = TerminalPrompter::stdio();
    GoalSession::new(&store, &SystemClock, &mut prompter).run()?;
    Ok(())
}

/// Print the user-facing message for a session-ending error and pick the exit code.
fn report(err: GoalError) -> ExitCode {
    if err.is_gate_refusal() {
        tracing::info!("session refused: {}", err);
        println!("{}", err);
    } else {
        tracing::error!("session failed: {}", err);
        eprintln!("Error: {}", err);
    }
    ExitCode::from(err.exit_code())
}

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "nc_goal=warn,commandments=warn";

// Logs go to stderr so they don't interleave with prompts on stdout.
fn init_tracing() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}
