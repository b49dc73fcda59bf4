//! Command line for the timed-door demo binary.

use clap::{Parser, Subcommand};

/// Door with a timed auto-alarm.
#[derive(Debug, Parser)]
#[command(name = "timed-door", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Seconds the door may stay open before the alarm fires.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Unlock a door, lock it after `--hold` seconds, and let a timer check it.
    Watch {
        /// Seconds to keep the door open before locking it.
        #[arg(long)]
        hold: Option<u64>,
    },

    /// Show the effective configuration.
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_watch_subcommand() {
        let cli = Cli::parse_from(["timed-door", "watch", "--hold", "5"]);
        match cli.command {
            Command::Watch { hold } => assert_eq!(hold, Some(5)),
            Command::Status => panic!("expected Watch command"),
        }
        assert!(cli.timeout.is_none());
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["timed-door", "--timeout", "3", "--verbose", "status"]);
        assert!(cli.verbose);
        assert_eq!(cli.timeout, Some(3));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
