//! Scripted watch run: unlock a door, lock it again after a hold period on a
//! second thread, and let a timer check it once the door's timeout elapses.
//!
//! A hold that reaches the timeout never locks the door, so the run always
//! finishes when the timer fires. The outcome and [`AlarmReport`] are handed
//! to the [`WatchObserver`] as soon as the check has run.

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::door::{DoorState, DoorTimerAdapter, TimedDoor};
use crate::error::DoorError;
use crate::timer::{Sleeper, Timer, TimerClient};

/// Summary of one watch run.
#[derive(Debug, Clone, Serialize)]
pub struct AlarmReport {
    pub timeout_secs: u64,
    pub hold_secs: u64,
    pub alarm_raised: bool,
    pub final_state: DoorState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl AlarmReport {
    pub fn new(
        timeout_secs: u64,
        hold_secs: u64,
        outcome: &Result<(), DoorError>,
        final_state: DoorState,
        started_at: DateTime<Utc>,
    ) -> Self {
        let finished_at = Utc::now();
        Self {
            timeout_secs,
            hold_secs,
            alarm_raised: matches!(outcome, Err(e) if e.is_alarm()),
            final_state,
            started_at,
            finished_at,
            duration_ms: (finished_at - started_at).num_milliseconds(),
        }
    }
}

/// Hooks called from inside a watch run.
pub trait WatchObserver: Sync {
    /// The hold thread locked the door.
    fn locked(&self, _after_secs: u64) {}

    /// The timer fired and the door was checked.
    fn finished(&self, _outcome: &Result<(), DoorError>, _report: &AlarmReport) {}
}

impl WatchObserver for () {}

#[derive(Debug)]
pub struct WatchRun {
    pub outcome: Result<(), DoorError>,
    pub state_at_timeout: DoorState,
    pub report: AlarmReport,
}

// Door check that first waits for a lock scheduled before the deadline.
struct ScheduledLock<'d> {
    adapter: DoorTimerAdapter<'d>,
    locked: Option<Receiver<()>>,
}

impl TimerClient for ScheduledLock<'_> {
    fn on_timeout(&self) -> Result<(), DoorError> {
        if let Some(locked) = &self.locked {
            // Err only means the hold thread is gone; check the door as is.
            let _ = locked.recv();
        }
        self.adapter.on_timeout()
    }
}

/// Unlock `door`, lock it after `hold_secs` if that is before its timeout,
/// and check it with a timer after the timeout. Both waits go through
/// `sleeper`.
pub fn run_watch<S, O>(
    door: &TimedDoor,
    hold_secs: u64,
    sleeper: &S,
    observer: &O,
) -> Result<WatchRun, DoorError>
where
    S: Sleeper + Sync,
    O: WatchObserver,
{
    door.unlock()?;
    let timeout_secs = door.timeout_secs();
    let started_at = Utc::now();
    info!(timeout_secs, hold_secs, "door unlocked");

    let run = thread::scope(|s| {
        let locked = if hold_secs < timeout_secs {
            let (tx, rx) = mpsc::channel();
            s.spawn(move || {
                sleeper.sleep(Duration::from_secs(hold_secs));
                match door.lock() {
                    Ok(()) => observer.locked(hold_secs),
                    Err(e) => warn!(error = %e, "could not lock door"),
                }
                let _ = tx.send(());
            });
            Some(rx)
        } else {
            debug!(hold_secs, timeout_secs, "door held through its timeout");
            None
        };

        let client = ScheduledLock {
            adapter: door.adapter(),
            locked,
        };
        let outcome = Timer::with_sleeper(sleeper).register_client(timeout_secs, &client);
        let state_at_timeout = door.state();
        let report = AlarmReport::new(
            timeout_secs,
            hold_secs,
            &outcome,
            state_at_timeout,
            started_at,
        );
        observer.finished(&outcome, &report);

        WatchRun {
            outcome,
            state_at_timeout,
            report,
        }
    });

    Ok(run)
}
