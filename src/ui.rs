//! Terminal output for the demo: a spinner while the timer blocks, colored
//! outcome lines, and the JSON report of a watch run.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::DoorError;
use crate::watch::{AlarmReport, WatchObserver};

/// Spinner shown while a timer registration blocks.
pub struct WaitProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
}

impl WaitProgress {
    pub fn start(timeout_secs: u64) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("door open, alarm in {timeout_secs}s"));
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Note that the door was locked while the timer is still pending.
    pub fn show_locked(&self, after_secs: u64) {
        self.pb.println(format!(
            "  {} door locked after {after_secs}s",
            self.yellow.apply_to("🔒")
        ));
    }

    pub fn complete(&self, outcome: &Result<(), DoorError>) {
        self.pb.finish_and_clear();
        match outcome {
            Ok(()) => println!("  {} door closed in time", self.green.apply_to("✓")),
            Err(e) => println!("  {} {e}", self.red.apply_to("✗")),
        }
    }

    pub fn print_report(&self, report: &AlarmReport) {
        let style = if report.alarm_raised { &self.red } else { &self.green };
        println!();
        println!("{}", style.apply_to("─── Alarm Report ───"));
        println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
    }
}

impl WatchObserver for WaitProgress {
    fn locked(&self, after_secs: u64) {
        self.show_locked(after_secs);
    }

    fn finished(&self, outcome: &Result<(), DoorError>, report: &AlarmReport) {
        self.complete(outcome);
        self.print_report(report);
    }
}
