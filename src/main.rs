mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use timed_door::config::DoorConfig;
use timed_door::ui::WaitProgress;
use timed_door::{TimedDoor, ThreadSleeper, run_watch};

// Exit code used when the demo ends with the door alarm.
const ALARM_EXIT_CODE: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = DoorConfig::load()?;
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    match cli.command {
        Command::Watch { hold } => {
            let hold_secs = hold.unwrap_or(config.hold_secs);
            watch(config.timeout_secs, hold_secs)
        }
        Command::Status => {
            println!("timeout_secs = {}", config.timeout_secs);
            println!("hold_secs    = {}", config.hold_secs);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "timed_door=debug" } else { "timed_door=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the watch demo on the real clock. The spinner reports the outcome as
/// soon as the timer fires.
fn watch(timeout_secs: u64, hold_secs: u64) -> Result<ExitCode> {
    let door = TimedDoor::new(timeout_secs)?;
    let progress = WaitProgress::start(timeout_secs);
    let run = run_watch(&door, hold_secs, &ThreadSleeper, &progress)?;

    match run.outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_alarm() => Ok(ExitCode::from(ALARM_EXIT_CODE)),
        Err(e) => Err(e.into()),
    }
}
